//! Diagnostics and their machine-readable autofix payloads.
//!
//! [`Diagnostic`] and [`AutofixData`] define the stable wire shape the
//! engine hands to its transport: a closed sum type with a `type`
//! discriminator, so serialization is stable and every consumer can match
//! exhaustively rather than guessing at optional fields.

use serde::{Deserialize, Serialize};

use super::location::Range;
use super::severity::Severity;

/// The fixed diagnostic source tag published with every [`Diagnostic`].
pub const DIAGNOSTIC_SOURCE: &str = "cem-lsp";

/// A single diagnostic produced by one of the analyzers.
///
/// # Examples
///
/// ```
/// use cem_core::{Diagnostic, Range, Severity, SourceLocation};
///
/// let diagnostic = Diagnostic::new(
///     Range::from_byte_offsets(10, 20),
///     Severity::Error,
///     "Unknown custom element 'my-elment'. Did you mean 'my-element'?".to_owned(),
/// );
/// assert_eq!(diagnostic.source, cem_core::DIAGNOSTIC_SOURCE);
/// assert!(diagnostic.data.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The span of source text this diagnostic applies to.
    pub range: Range,
    /// The diagnostic's severity.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Always [`DIAGNOSTIC_SOURCE`]; kept as a field (rather than hard-coded
    /// at serialization time) so it round-trips through `Deserialize`.
    pub source: &'static str,
    /// The machine-readable autofix payload, if a single best correction
    /// exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<AutofixData>,
}

impl Diagnostic {
    /// Creates a new diagnostic with no autofix data.
    #[must_use]
    pub const fn new(range: Range, severity: Severity, message: String) -> Self {
        Self {
            range,
            severity,
            message,
            source: DIAGNOSTIC_SOURCE,
            data: None,
        }
    }

    /// Builder-style variant of [`Self::new`] that attaches autofix data.
    #[must_use]
    pub fn with_autofix(range: Range, severity: Severity, message: String, data: AutofixData) -> Self {
        Self {
            range,
            severity,
            message,
            source: DIAGNOSTIC_SOURCE,
            data: Some(data),
        }
    }

    /// The key used by the publisher to deduplicate diagnostics: range,
    /// message, and the autofix discriminator plus its original/suggestion
    /// text.
    #[must_use]
    pub fn dedupe_key(&self) -> (Range, &str, Option<(&'static str, &str, &str)>) {
        let autofix_key = self.data.as_ref().map(|d| (d.type_name(), d.original(), d.suggestion()));
        (self.range, self.message.as_str(), autofix_key)
    }
}

/// Tagged autofix payload attached to a subset of diagnostics.
///
/// Serializes with a `type` discriminator matching the stable wire names
/// from the external interface contract (`attribute-suggestion`,
/// `attribute-value-suggestion`, `slot-suggestion`, `tag-suggestion`,
/// `missing-import`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AutofixData {
    /// Suggests a replacement for an unrecognized attribute name.
    #[serde(rename_all = "camelCase")]
    AttributeSuggestion {
        /// The text as written in the document.
        original: String,
        /// The suggested replacement.
        suggestion: String,
        /// The range of `original`.
        range: Range,
    },
    /// Suggests a replacement for an unrecognized attribute value.
    #[serde(rename_all = "camelCase")]
    AttributeValueSuggestion {
        /// The text as written in the document.
        original: String,
        /// The suggested replacement.
        suggestion: String,
        /// The range of `original`.
        range: Range,
    },
    /// Suggests a replacement for an unrecognized slot name.
    #[serde(rename_all = "camelCase")]
    SlotSuggestion {
        /// The text as written in the document.
        original: String,
        /// The suggested replacement.
        suggestion: String,
        /// The range of `original`.
        range: Range,
    },
    /// Suggests a replacement for an unrecognized tag name.
    #[serde(rename_all = "camelCase")]
    TagSuggestion {
        /// The text as written in the document.
        original: String,
        /// The suggested replacement.
        suggestion: String,
        /// The range of `original`.
        range: Range,
    },
    /// Proposes adding an import statement for a known-but-unimported tag.
    #[serde(rename_all = "camelCase")]
    MissingImport {
        /// The tag name as written in the document (mirrors `tag_name`).
        original: String,
        /// The full import statement text to insert, e.g. `import './button.js';`.
        suggestion: String,
        /// The range of the offending tag name.
        range: Range,
        /// The module path the tag should be imported from.
        import_path: String,
        /// The tag name that is missing an import.
        tag_name: String,
    },
}

impl AutofixData {
    /// The wire-format `type` discriminator for this variant.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::AttributeSuggestion { .. } => "attribute-suggestion",
            Self::AttributeValueSuggestion { .. } => "attribute-value-suggestion",
            Self::SlotSuggestion { .. } => "slot-suggestion",
            Self::TagSuggestion { .. } => "tag-suggestion",
            Self::MissingImport { .. } => "missing-import",
        }
    }

    /// The common `original` field.
    #[must_use]
    pub fn original(&self) -> &str {
        match self {
            Self::AttributeSuggestion { original, .. }
            | Self::AttributeValueSuggestion { original, .. }
            | Self::SlotSuggestion { original, .. }
            | Self::TagSuggestion { original, .. }
            | Self::MissingImport { original, .. } => original,
        }
    }

    /// The common `suggestion` field.
    #[must_use]
    pub fn suggestion(&self) -> &str {
        match self {
            Self::AttributeSuggestion { suggestion, .. }
            | Self::AttributeValueSuggestion { suggestion, .. }
            | Self::SlotSuggestion { suggestion, .. }
            | Self::TagSuggestion { suggestion, .. }
            | Self::MissingImport { suggestion, .. } => suggestion,
        }
    }

    /// The common `range` field.
    #[must_use]
    pub const fn range(&self) -> Range {
        match self {
            Self::AttributeSuggestion { range, .. }
            | Self::AttributeValueSuggestion { range, .. }
            | Self::SlotSuggestion { range, .. }
            | Self::TagSuggestion { range, .. }
            | Self::MissingImport { range, .. } => *range,
        }
    }
}
