//! Manifest registry: the index built from loaded CEM packages.
//!
//! An index-building pass logged with `tracing`, covering CEM tag,
//! attribute, and slot definitions. Rebuilds are atomic: internal mutable
//! state is never exposed directly, only swapped behind a
//! `parking_lot::RwLock<Arc<RegistrySnapshot>>` reference, so analyzers
//! reading a snapshot never observe a partially rebuilt index.

use std::sync::Arc;

use cem_core::{fx_hash_map, fx_hash_set, ElementDefinition, FxHashMap, FxHashSet};
use parking_lot::RwLock;
use tracing::info;

use crate::manifest::ManifestPackage;

/// An immutable, fully built view of the manifest registry's indexes.
///
/// Every index here is read-only once constructed; the only way to get a
/// new one is [`ManifestRegistry::rebuild`], which constructs a fresh
/// `RegistrySnapshot` and swaps it in atomically.
#[derive(Debug, Default)]
pub struct RegistrySnapshot {
    tag_to_definition: FxHashMap<String, ElementDefinition>,
    all_tag_names: Vec<String>,
    module_to_tags: FxHashMap<String, FxHashSet<String>>,
}

impl RegistrySnapshot {
    fn build(packages: &[ManifestPackage]) -> Self {
        let mut tag_to_definition = fx_hash_map();
        let mut module_to_tags: FxHashMap<String, FxHashSet<String>> = fx_hash_map();

        for package in packages {
            for def in package.element_definitions() {
                module_to_tags
                    .entry(def.module_path.clone())
                    .or_insert_with(fx_hash_set)
                    .insert(def.tag_name.clone());
                tag_to_definition.insert(def.tag_name.clone(), def);
            }
        }

        let mut all_tag_names: Vec<String> = tag_to_definition.keys().cloned().collect();
        all_tag_names.sort_unstable();
        all_tag_names.dedup();

        Self {
            tag_to_definition,
            all_tag_names,
            module_to_tags,
        }
    }

    /// Looks up the element definition for `tag`, if the registry knows it.
    #[must_use]
    pub fn definition(&self, tag: &str) -> Option<&ElementDefinition> {
        self.tag_to_definition.get(tag)
    }

    /// Returns whether `tag` is a known custom element.
    #[must_use]
    pub fn contains_tag(&self, tag: &str) -> bool {
        self.tag_to_definition.contains_key(tag)
    }

    /// The sorted, deduplicated set of every known tag name.
    #[must_use]
    pub fn all_tag_names(&self) -> &[String] {
        &self.all_tag_names
    }

    /// The set of tag names directly defined by the module at
    /// `module_path`, used to seed a [`crate::graph::ModuleGraph`] node's
    /// "directly defines" set.
    #[must_use]
    pub fn tags_for_module(&self, module_path: &str) -> FxHashSet<String> {
        self.module_to_tags.get(module_path).cloned().unwrap_or_default()
    }

    /// A human-oriented "import from" hint for `tag`.
    #[must_use]
    pub fn tag_to_source(&self, tag: &str) -> Option<String> {
        self.definition(tag).map(ElementDefinition::import_hint)
    }

    /// Every module path the registry has indexed, used by the import
    /// resolver's path matching.
    pub fn module_paths(&self) -> impl Iterator<Item = &str> {
        self.module_to_tags.keys().map(String::as_str)
    }

    /// The number of distinct tags known to this snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tag_to_definition.len()
    }

    /// Whether this snapshot has no known tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tag_to_definition.is_empty()
    }
}

/// The manifest registry: an atomically-swappable, reader-many/writer-one
/// index over loaded CEM packages.
///
/// # Examples
///
/// ```
/// use cem_engine::registry::ManifestRegistry;
/// use cem_engine::manifest::ManifestPackage;
///
/// let registry = ManifestRegistry::new();
/// assert!(registry.snapshot().is_empty());
///
/// let package: ManifestPackage = serde_json::from_str(r#"{
///     "modules": [{ "path": "./my-button.js", "declarations": [
///         { "customElement": true, "tagName": "my-button" }
///     ]}]
/// }"#).unwrap();
/// registry.rebuild(vec![package]);
/// assert!(registry.snapshot().contains_tag("my-button"));
/// ```
pub struct ManifestRegistry {
    snapshot: RwLock<Arc<RegistrySnapshot>>,
}

impl Default for ManifestRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestRegistry {
    /// Creates a registry with an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(RegistrySnapshot::default())),
        }
    }

    /// Builds a registry directly from a set of packages.
    #[must_use]
    pub fn from_packages(packages: Vec<ManifestPackage>) -> Self {
        let registry = Self::new();
        registry.rebuild(packages);
        registry
    }

    /// Rebuilds the registry's index from `packages` and swaps it in.
    /// Readers holding an older [`RegistrySnapshot`] (via [`Self::snapshot`])
    /// continue to see that snapshot until they re-acquire one.
    pub fn rebuild(&self, packages: Vec<ManifestPackage>) {
        let package_count = packages.len();
        let next = Arc::new(RegistrySnapshot::build(&packages));
        info!(packages = package_count, tags = next.len(), "manifest registry rebuilt");
        *self.snapshot.write() = next;
    }

    /// Returns a cheap, reference-counted handle to the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        Arc::clone(&self.snapshot.read())
    }
}
