//! Import resolver: turns a document's import specifiers into the set of
//! tags it transitively makes available.
//!
//! Resolution proceeds by the same path-matching discipline used
//! throughout this workspace, generalized to manifest- and
//! module-graph-backed matching.

use std::sync::Arc;

use cem_core::{fx_hash_set, FxHashSet, WorkspaceFs};

use crate::document::Document;
use crate::graph::ModuleGraph;
use crate::registry::RegistrySnapshot;

/// The result of resolving one document's imports: either every known tag
/// is considered imported (the ignore-sentinel case), or the specific set
/// reachable through its import specifiers.
#[derive(Debug, Clone, Default)]
pub struct ResolvedImports {
    /// Set when the document carries the ignore sentinel: every tag the registry knows about is treated as imported.
    pub all_known_tags_imported: bool,
    /// The tags reachable through the document's import specifiers. Not
    /// consulted when `all_known_tags_imported` is set.
    pub tags: FxHashSet<String>,
}

impl ResolvedImports {
    /// Whether `tag` is considered imported by this result.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.all_known_tags_imported || self.tags.contains(tag)
    }
}

/// Resolves a document's transitively-imported tag set against a manifest
/// registry and a module graph.
pub struct ImportResolver<F> {
    registry: Arc<RegistrySnapshot>,
    graph: Arc<ModuleGraph<F>>,
}

impl<F: WorkspaceFs> ImportResolver<F> {
    /// Creates a resolver over `registry` and `graph`.
    #[must_use]
    pub fn new(registry: Arc<RegistrySnapshot>, graph: Arc<ModuleGraph<F>>) -> Self {
        Self { registry, graph }
    }

    /// Resolves `document`'s imports.
    #[must_use]
    pub fn resolve(&self, document: &Document) -> ResolvedImports {
        if document.suppress_missing_import {
            return ResolvedImports {
                all_known_tags_imported: true,
                tags: fx_hash_set(),
            };
        }

        let mut tags = fx_hash_set();
        for (specifier, _kind) in document.import_specifiers() {
            self.resolve_specifier(&specifier, &document.import_map, &mut tags);
        }
        ResolvedImports {
            all_known_tags_imported: false,
            tags,
        }
    }

    fn resolve_specifier(&self, specifier: &str, import_map: &cem_core::ImportMap, tags: &mut FxHashSet<String>) {
        let mut candidates = vec![specifier.to_owned()];
        if let Some(mapped) = import_map.resolve(specifier) {
            candidates.push(mapped.to_owned());
        }

        for candidate in &candidates {
            for module_path in matching_modules(candidate, self.registry.module_paths()) {
                tags.extend(self.registry.tags_for_module(module_path));
            }

            self.graph.build_for_import_path(candidate);
            let module_paths: Vec<String> = self.graph.all_module_paths().iter().map(|p| p.to_string()).collect();
            if let Some(matched) = find_matching_module(candidate, module_paths.iter().map(String::as_str)) {
                tags.extend(self.graph.transitive_elements(matched));
            }
        }
    }
}

/// Every module path in `candidates` that matches `specifier` under
/// [`path_matches`]'s rules.
fn matching_modules<'a>(specifier: &str, candidates: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    candidates.filter(|candidate| path_matches(specifier, candidate)).collect()
}

/// The first module path in `candidates` that matches `specifier`, if any.
fn find_matching_module<'a>(specifier: &str, mut candidates: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    candidates.find(|candidate| path_matches(specifier, candidate))
}

/// Matches a specifier `s` against a manifest or module-graph path `m`:
/// exact, extension-normalized, suffix, basename, or scoped-package-aware.
#[must_use]
pub fn path_matches(s: &str, m: &str) -> bool {
    if s == m {
        return true;
    }
    if normalize_suffix(s) == normalize_suffix(m) {
        return true;
    }
    if s.ends_with(m) || m.ends_with(s) {
        return true;
    }
    if basename(s) == basename(m) {
        return true;
    }
    if let Some(rest) = scoped_package_rest(s) {
        if m.ends_with(rest) {
            return true;
        }
    }
    false
}

/// Strips leading `./`, `../`, `/` segments and keeps the last two path
/// segments.
fn normalize_suffix(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty() && *s != "." && *s != "..").collect();
    let len = segments.len();
    if len <= 2 {
        segments.join("/")
    } else {
        segments[len - 2..].join("/")
    }
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// For a scoped-package specifier `@scope/pkg/rest`, returns `rest`.
fn scoped_package_rest(specifier: &str) -> Option<&str> {
    let rest = specifier.strip_prefix('@')?;
    let mut parts = rest.splitn(3, '/');
    let _scope = parts.next()?;
    let _pkg = parts.next()?;
    parts.next().filter(|r| !r.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentStore;
    use crate::manifest::ManifestPackage;
    use crate::registry::ManifestRegistry;
    use cem_core::InMemoryWorkspaceFs;
    use cem_parser::pool::ParserPool;

    fn setup(
        manifest_json: &str,
        files: InMemoryWorkspaceFs,
    ) -> (DocumentStore, ImportResolver<InMemoryWorkspaceFs>) {
        let package: ManifestPackage = serde_json::from_str(manifest_json).unwrap();
        let registry = ManifestRegistry::from_packages(vec![package]).snapshot();
        let parsers = Arc::new(ParserPool::new());
        let graph = Arc::new(ModuleGraph::new(files, Arc::clone(&registry), Arc::clone(&parsers)));
        let store = DocumentStore::new(parsers);
        (store, ImportResolver::new(registry, graph))
    }

    #[test]
    fn test_path_matches_exact_and_suffix() {
        assert!(path_matches("./my-tab.js", "./my-tab.js"));
        assert!(path_matches("components/my-tab.js", "./src/components/my-tab.js"));
        assert!(path_matches("my-tab.js", "./components/my-tab.js"));
    }

    #[test]
    fn test_path_matches_scoped_package_suffix() {
        assert!(path_matches("@acme/components/my-tab.js", "./my-tab.js"));
    }

    #[test]
    fn test_resolve_manifest_direct_match() {
        let manifest = r#"{"modules":[{"path":"./my-tab.js","declarations":[{"customElement":true,"tagName":"my-tab"}]}]}"#;
        let (store, resolver) = setup(manifest, InMemoryWorkspaceFs::new());
        let doc = store.open("file:///index.html", "<script src=\"./my-tab.js\"></script>", 1);
        let resolved = resolver.resolve(&doc);
        assert!(resolved.contains("my-tab"));
    }

    #[test]
    fn test_resolve_via_module_graph_reexport() {
        let manifest = r#"{"modules":[{"path":"./my-tab.js","declarations":[{"customElement":true,"tagName":"my-tab"}]}]}"#;
        let fs = InMemoryWorkspaceFs::new()
            .with_file("./index.js", "export { MyTab } from './my-tab.js';")
            .with_file("./my-tab.js", "export class MyTab {}");
        let (store, resolver) = setup(manifest, fs);
        let doc = store.open("file:///app.ts", "import './index.js';", 1);
        let resolved = resolver.resolve(&doc);
        assert!(resolved.contains("my-tab"));
    }

    #[test]
    fn test_ignore_sentinel_imports_everything() {
        let manifest = r#"{"modules":[{"path":"./x.js","declarations":[{"customElement":true,"tagName":"my-x"}]}]}"#;
        let (store, resolver) = setup(manifest, InMemoryWorkspaceFs::new());
        let doc = store.open(
            "file:///app.ts",
            "// cem-lsp ignore missing-import\nconst x = 1;",
            1,
        );
        let resolved = resolver.resolve(&doc);
        assert!(resolved.all_known_tags_imported);
        assert!(resolved.contains("anything-at-all"));
    }

    #[test]
    fn test_importmap_resolves_both_original_and_mapped_specifier() {
        let manifest = r#"{"modules":[{"path":"./vendor/my-tab.js","declarations":[{"customElement":true,"tagName":"my-tab"}]}]}"#;
        let (store, resolver) = setup(manifest, InMemoryWorkspaceFs::new());
        let html = r#"
            <script type="importmap">{"imports": {"my-tab": "./vendor/my-tab.js"}}</script>
            <script type="module">import 'my-tab';</script>
        "#;
        let doc = store.open("file:///index.html", html, 1);
        let resolved = resolver.resolve(&doc);
        assert!(resolved.contains("my-tab"));
    }
}
