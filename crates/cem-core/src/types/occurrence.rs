//! Syntactic occurrences of custom elements and their attributes in a parsed document.

use serde::{Deserialize, Serialize};

use super::location::Range;
use crate::hash::FxHashMap;

/// A single attribute as it appears on a start tag.
///
/// # Examples
///
/// ```
/// use cem_core::{AttributeOccurrence, Range, SourceLocation};
///
/// let range = Range::from_byte_offsets(5, 13);
/// let occ = AttributeOccurrence::with_value("disabled".to_owned(), "false".to_owned(), range);
/// assert!(occ.has_value);
/// assert_eq!(occ.value.as_deref(), Some("false"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeOccurrence {
    /// The attribute's local name, e.g. `disabled` or `data-id`.
    pub name: String,
    /// The attribute's value text, if it has one. `None` for a bare
    /// attribute like `<input disabled>`.
    pub value: Option<String>,
    /// Distinguishes `disabled` (false) from `disabled=""` (true): some
    /// analyzers treat an empty-string value differently from no value at
    /// all, so this is tracked independently of `value.is_some()`.
    pub has_value: bool,
    /// The range covering the attribute *name*, not its value.
    pub range: Range,
}

impl AttributeOccurrence {
    /// Creates an occurrence for a bare attribute with no value.
    #[must_use]
    pub const fn bare(name: String, range: Range) -> Self {
        Self {
            name,
            value: None,
            has_value: false,
            range,
        }
    }

    /// Creates an occurrence for an attribute with a value.
    #[must_use]
    pub const fn with_value(name: String, value: String, range: Range) -> Self {
        Self {
            name,
            value: Some(value),
            has_value: true,
            range,
        }
    }
}

/// One occurrence of a custom-element start tag in a document.
///
/// # Examples
///
/// ```
/// use cem_core::{CustomElementMatch, Range};
///
/// let m = CustomElementMatch::new("my-element".to_owned(), Range::from_byte_offsets(0, 10));
/// assert!(m.attributes.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomElementMatch {
    /// The tag name as written, e.g. `my-element`.
    pub tag_name: String,
    /// The range of the tag name text itself (not the whole start tag),
    /// matching where analyzers anchor their diagnostics.
    pub range: Range,
    /// Attributes present on this occurrence, keyed by local name.
    pub attributes: FxHashMap<String, AttributeOccurrence>,
}

impl CustomElementMatch {
    /// Creates a match with no attributes recorded yet.
    #[must_use]
    pub fn new(tag_name: String, range: Range) -> Self {
        Self {
            tag_name,
            range,
            attributes: FxHashMap::default(),
        }
    }

    /// A name is recognized as a custom-element tag iff it contains `-`, is
    /// all lowercase, and does not start with `xml`/`xmlns`.
    #[must_use]
    pub fn is_custom_element_name(name: &str) -> bool {
        name.contains('-')
            && name.chars().all(|c| !c.is_ascii_uppercase())
            && !name.starts_with("xml")
            && !name.starts_with("xmlns")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_element_name_recognition() {
        assert!(CustomElementMatch::is_custom_element_name("my-element"));
        assert!(!CustomElementMatch::is_custom_element_name("div"));
        assert!(!CustomElementMatch::is_custom_element_name("My-Element"));
        assert!(!CustomElementMatch::is_custom_element_name("xml-thing"));
        assert!(!CustomElementMatch::is_custom_element_name("xmlns-thing"));
    }

    #[test]
    fn test_attribute_occurrence_bare_vs_valued() {
        let range = Range::from_byte_offsets(0, 8);
        let bare = AttributeOccurrence::bare("disabled".to_owned(), range);
        assert!(!bare.has_value);
        assert_eq!(bare.value, None);

        let valued = AttributeOccurrence::with_value("disabled".to_owned(), String::new(), range);
        assert!(valued.has_value);
        assert_eq!(valued.value.as_deref(), Some(""));
    }

    #[test]
    fn test_custom_element_match_attribute_insertion() {
        let mut m = CustomElementMatch::new("my-element".to_owned(), Range::from_byte_offsets(0, 10));
        m.attributes.insert(
            "size".to_owned(),
            AttributeOccurrence::bare("size".to_owned(), Range::from_byte_offsets(11, 15)),
        );
        assert!(m.attributes.contains_key("size"));
    }
}
