//! Diagnostic severity levels.

use serde::{Deserialize, Serialize};

/// The severity of a [`crate::types::diagnostic::Diagnostic`].
///
/// Ordered from most to least severe so that `Severity::Error < Severity::Hint`
/// comparisons read naturally when sorting or filtering diagnostics.
///
/// # Examples
///
/// ```
/// use cem_core::Severity;
///
/// assert!(Severity::Error < Severity::Warning);
/// assert_eq!(Severity::Warning.as_str(), "warning");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A definite problem: an unknown tag, a missing import, a type mismatch.
    Error,
    /// A likely problem that does not prevent the element from rendering.
    Warning,
    /// A note that does not indicate a problem, e.g. a redundant attribute value.
    Information,
    /// The lowest-priority annotation.
    Hint,
}

impl Severity {
    /// Returns the lowercase wire name of this severity.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Information => "information",
            Self::Hint => "hint",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error < Severity::Warning);
        assert!(Severity::Warning < Severity::Information);
        assert!(Severity::Information < Severity::Hint);
    }

    #[test]
    fn test_severity_as_str() {
        assert_eq!(Severity::Error.as_str(), "error");
        assert_eq!(Severity::Warning.as_str(), "warning");
        assert_eq!(Severity::Information.as_str(), "information");
        assert_eq!(Severity::Hint.as_str(), "hint");
    }

    #[test]
    fn test_severity_serialization() {
        assert_eq!(serde_json::to_string(&Severity::Error).unwrap(), r#""error""#);
        assert_eq!(
            serde_json::to_string(&Severity::Information).unwrap(),
            r#""information""#
        );
    }
}
