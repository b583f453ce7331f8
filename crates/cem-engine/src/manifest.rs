//! Custom Elements Manifest (CEM) JSON input types.
//!
//! Deserialization is deliberately permissive, using the same `#[serde(default)]`
//! tolerant-deserialization convention as `cem_core::EngineConfig`: every
//! field the registry does not consume is simply ignored rather than
//! rejected, since `serde` drops unknown JSON fields unless a struct opts
//! into `deny_unknown_fields` (which none of these do, by design - the
//! registry must tolerate unknown manifest fields).

use cem_core::{AttributeDefinition, ElementDefinition};
use serde::Deserialize;

/// A loaded CEM package: a collection of modules, each a collection of
/// declarations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestPackage {
    /// The package's name, used to build `tagToSource` hints
    /// ([`ElementDefinition::import_hint`]).
    #[serde(default)]
    pub name: Option<String>,
    /// The package's modules.
    #[serde(default)]
    pub modules: Vec<ManifestModule>,
}

impl ManifestPackage {
    /// Yields one [`ElementDefinition`] per custom-element declaration
    /// found anywhere in this package's modules.
    pub fn element_definitions(&self) -> impl Iterator<Item = ElementDefinition> + '_ {
        self.modules.iter().flat_map(move |module| {
            module
                .declarations
                .iter()
                .filter_map(move |decl| decl.to_element_definition(&module.path, self.name.clone()))
        })
    }
}

/// One module entry in a CEM package, identified by a path relative to the
/// package root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestModule {
    /// The module's path, relative to the package root.
    pub path: String,
    /// The declarations exported by this module.
    #[serde(default)]
    pub declarations: Vec<ManifestDeclaration>,
}

/// One declaration within a module. Most fields only apply when
/// `custom_element` is set; a declaration without it is ignored by the
/// registry (it describes some other exported symbol the manifest
/// happens to also record).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestDeclaration {
    /// Whether this declaration is a custom element (`customElement: true`
    /// in the CEM schema).
    #[serde(default, rename = "customElement")]
    pub custom_element: bool,
    /// The custom element's tag name.
    #[serde(default, rename = "tagName")]
    pub tag_name: Option<String>,
    /// Declared public attributes.
    #[serde(default)]
    pub attributes: Vec<ManifestAttribute>,
    /// Declared named slots.
    #[serde(default)]
    pub slots: Vec<ManifestSlot>,
}

impl ManifestDeclaration {
    fn to_element_definition(&self, module_path: &str, package_name: Option<String>) -> Option<ElementDefinition> {
        if !self.custom_element {
            return None;
        }
        let tag_name = self.tag_name.clone()?;
        let mut def = ElementDefinition::new(tag_name, module_path.to_owned());
        def.package_name = package_name;
        def.attributes = self
            .attributes
            .iter()
            .map(|attr| AttributeDefinition {
                name: attr.name.clone(),
                type_text: attr.type_def.as_ref().map(|t| t.text.clone()),
                documentation: attr.description.clone(),
            })
            .collect();
        def.slots = self
            .slots
            .iter()
            .filter(|slot| !slot.name.is_empty())
            .map(|slot| slot.name.clone())
            .collect();
        Some(def)
    }
}

/// One attribute entry in a CEM declaration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestAttribute {
    /// The attribute's name as written in markup.
    pub name: String,
    /// The declared type, when present.
    #[serde(default, rename = "type")]
    pub type_def: Option<ManifestTypeRef>,
    /// Free-form documentation text.
    #[serde(default)]
    pub description: Option<String>,
}

/// A CEM type reference: `{ "text": "boolean" }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestTypeRef {
    /// The free-form, TypeScript-like type text.
    pub text: String,
}

/// One slot entry in a CEM declaration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestSlot {
    /// The slot's name. The CEM schema allows an unnamed default slot
    /// (`name` omitted or empty); the registry does not track those, since
    /// the slot analyzer only ever validates a `slot="..."` attribute's
    /// non-empty value.
    #[serde(default)]
    pub name: String,
    /// Free-form documentation text.
    #[serde(default)]
    pub description: Option<String>,
}
