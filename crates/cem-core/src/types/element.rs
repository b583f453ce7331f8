//! Immutable, registry-owned element definitions derived from CEM packages.

use serde::{Deserialize, Serialize};

/// One attribute declared on a custom element in a Custom Elements Manifest.
///
/// # Examples
///
/// ```
/// use cem_core::AttributeDefinition;
///
/// let attr = AttributeDefinition::new("size".to_owned());
/// assert!(attr.type_text.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    /// The attribute's name as written in markup.
    pub name: String,
    /// Free-form, TypeScript-like declared type text, e.g. `"boolean"` or
    /// `"'small' | 'medium' | 'large'"`. Absent when the manifest did not
    /// declare a type for this attribute.
    pub type_text: Option<String>,
    /// Optional documentation string carried through from the manifest.
    pub documentation: Option<String>,
}

impl AttributeDefinition {
    /// Creates an attribute definition with no declared type or docs.
    #[must_use]
    pub const fn new(name: String) -> Self {
        Self {
            name,
            type_text: None,
            documentation: None,
        }
    }

    /// Returns whether this attribute's declared type is exactly `boolean`.
    #[must_use]
    pub fn is_boolean(&self) -> bool {
        self.type_text.as_deref().is_some_and(|t| t.trim() == "boolean")
    }

    /// Returns whether this attribute's declared type is exactly `number`.
    #[must_use]
    pub fn is_number(&self) -> bool {
        self.type_text.as_deref().is_some_and(|t| t.trim() == "number")
    }

    /// Returns whether this attribute's declared type text contains a `|`,
    /// marking it as a union type.
    #[must_use]
    pub fn is_union(&self) -> bool {
        self.type_text.as_deref().is_some_and(|t| t.contains('|'))
    }

    /// Returns whether this attribute's declared type text is a single
    /// quoted string literal, e.g. `"'large'"`.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.type_text.as_deref().is_some_and(|t| {
            let t = t.trim();
            t.len() >= 2
                && ((t.starts_with('\'') && t.ends_with('\'')) || (t.starts_with('"') && t.ends_with('"')))
        })
    }

    /// Returns whether this attribute's declared type text describes an
    /// array: `T[]`, `Array<...>`, or contains the token `array`.
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.type_text.as_deref().is_some_and(|t| {
            let t = t.trim();
            t.ends_with("[]") || t.starts_with("Array<") || t.to_ascii_lowercase().contains("array")
        })
    }
}

/// An immutable custom-element definition owned by the [manifest
/// registry](crate) once built from a loaded CEM package.
///
/// # Examples
///
/// ```
/// use cem_core::ElementDefinition;
///
/// let def = ElementDefinition::new("my-button".to_owned(), "./button.js".to_owned());
/// assert_eq!(def.tag_name, "my-button");
/// assert!(def.attributes.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementDefinition {
    /// The custom element's tag name.
    pub tag_name: String,
    /// Declared attributes.
    pub attributes: Vec<AttributeDefinition>,
    /// Declared slot names.
    pub slots: Vec<String>,
    /// Path to the module that defines this element, relative to the
    /// package root.
    pub module_path: String,
    /// The owning package's name, when known.
    pub package_name: Option<String>,
}

impl ElementDefinition {
    /// Creates an element definition with no attributes or slots.
    #[must_use]
    pub const fn new(tag_name: String, module_path: String) -> Self {
        Self {
            tag_name,
            attributes: Vec::new(),
            slots: Vec::new(),
            module_path,
            package_name: None,
        }
    }

    /// Finds the declared attribute named `name`, if any.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeDefinition> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// Returns whether `slot` is among this element's declared slot names.
    #[must_use]
    pub fn has_slot(&self, slot: &str) -> bool {
        self.slots.iter().any(|s| s == slot)
    }

    /// The human-oriented "import from" hint used in missing-import
    /// messages: package name + module path when both are available, else
    /// just the module path. A leading `./` on the module path is stripped
    /// when prefixing a package name, so `@acme/components` +
    /// `./my-button.js` reads `@acme/components/my-button.js` rather than
    /// `@acme/components/./my-button.js`.
    #[must_use]
    pub fn import_hint(&self) -> String {
        match &self.package_name {
            Some(pkg) => {
                let relative = self.module_path.strip_prefix("./").unwrap_or(&self.module_path);
                format!("{pkg}/{relative}")
            }
            None => self.module_path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_type_classification() {
        let boolean = AttributeDefinition {
            type_text: Some("boolean".to_owned()),
            ..AttributeDefinition::new("disabled".to_owned())
        };
        assert!(boolean.is_boolean());
        assert!(!boolean.is_number());

        let union = AttributeDefinition {
            type_text: Some("'small' | 'medium' | 'large'".to_owned()),
            ..AttributeDefinition::new("size".to_owned())
        };
        assert!(union.is_union());
        assert!(!union.is_literal());

        let literal = AttributeDefinition {
            type_text: Some("'large'".to_owned()),
            ..AttributeDefinition::new("size".to_owned())
        };
        assert!(literal.is_literal());
        assert!(!literal.is_union());

        let array = AttributeDefinition {
            type_text: Some("string[]".to_owned()),
            ..AttributeDefinition::new("items".to_owned())
        };
        assert!(array.is_array());
    }

    #[test]
    fn test_element_definition_attribute_lookup() {
        let mut def = ElementDefinition::new("my-element".to_owned(), "./my-element.js".to_owned());
        def.attributes.push(AttributeDefinition::new("size".to_owned()));
        assert!(def.attribute("size").is_some());
        assert!(def.attribute("missing").is_none());
    }

    #[test]
    fn test_import_hint_prefers_package_name() {
        let mut def = ElementDefinition::new("my-button".to_owned(), "./button.js".to_owned());
        assert_eq!(def.import_hint(), "./button.js");
        def.package_name = Some("@acme/components".to_owned());
        assert_eq!(def.import_hint(), "@acme/components/button.js");
    }
}
