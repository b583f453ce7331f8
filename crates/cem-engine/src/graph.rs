//! Module graph: lazy, cycle-safe reachability of custom elements through
//! import and re-export edges.
//!
//! Uses a `DashMap` for sharded, lock-free reads with a `parking_lot::Mutex`
//! per node for the rare write path. Per-node build locks give an "at most
//! one build proceeds for a given path, others observe the completed
//! result" guarantee without taking a single workspace-wide lock.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use cem_core::{fx_hash_set, FxHashSet, WorkspaceFs};
use cem_parser::pool::{Language, ParserPool};
use dashmap::{DashMap, DashSet};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::GraphError;
use crate::registry::RegistrySnapshot;

/// One module in the graph: its own import edges and the tags it directly
/// defines or re-exports.
#[derive(Debug, Clone, Default)]
pub struct ModuleNode {
    /// The module's normalized path.
    pub path: Utf8PathBuf,
    /// Every module path this module imports or re-exports from,
    /// resolved relative to this module. A specifier that could not be
    /// resolved to an existing file is omitted (it becomes an unresolved
    /// leaf rather than a graph edge).
    pub imports: Vec<Utf8PathBuf>,
    /// Tag names this module itself defines, per the manifest registry's
    /// `moduleToTags` index.
    pub directly_defined: FxHashSet<String>,
}

/// The lazily built module graph.
///
/// Construction happens through [`Self::build_for_import_path`], which
/// ensures every module transitively reachable from a specifier is parsed
/// and inserted, following static imports and `export ... from` edges
/// alike - both contribute to [`Self::transitive_elements`]'s fixpoint per
/// the `ModuleNode` invariant "elements directly defined plus transitive
/// elements of all imports".
pub struct ModuleGraph<F> {
    fs: F,
    registry: Arc<RegistrySnapshot>,
    parsers: Arc<ParserPool>,
    nodes: DashMap<Utf8PathBuf, Arc<ModuleNode>>,
    unresolved: DashSet<Utf8PathBuf>,
    build_locks: DashMap<Utf8PathBuf, Arc<Mutex<()>>>,
}

impl<F: WorkspaceFs> ModuleGraph<F> {
    /// Creates an empty graph over `fs`, consulting `registry` for each
    /// module's directly-defined tag set and `parsers` to parse module
    /// bodies for import/re-export edges.
    pub fn new(fs: F, registry: Arc<RegistrySnapshot>, parsers: Arc<ParserPool>) -> Self {
        Self {
            fs,
            registry,
            parsers,
            nodes: DashMap::new(),
            unresolved: DashSet::new(),
            build_locks: DashMap::new(),
        }
    }

    /// Ensures every module reachable from `spec` is parsed and inserted
    /// into the graph. Idempotent: a specifier already built (or in
    /// progress on another thread) is not rebuilt.
    pub fn build_for_import_path(&self, spec: &str) {
        let root = normalize(Utf8Path::new(spec));
        let mut worklist = vec![root];
        let mut queued: FxHashSet<Utf8PathBuf> = fx_hash_set();

        while let Some(path) = worklist.pop() {
            if !queued.insert(path.clone()) {
                continue;
            }
            for next in self.ensure_built(&path) {
                worklist.push(next);
            }
        }
    }

    /// Builds the single node at `path` if not already present, returning
    /// the paths it imports so the caller can continue the traversal.
    fn ensure_built(&self, path: &Utf8Path) -> Vec<Utf8PathBuf> {
        if let Some(node) = self.nodes.get(path) {
            return node.imports.clone();
        }
        if self.unresolved.contains(path) {
            return Vec::new();
        }

        let lock = self
            .build_locks
            .entry(path.to_owned())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock();

        // Re-check: another thread may have finished building while we
        // waited for the lock.
        if let Some(node) = self.nodes.get(path) {
            return node.imports.clone();
        }
        if self.unresolved.contains(path) {
            return Vec::new();
        }

        match self.fs.read_module(path) {
            Some(source) => {
                let node = self.parse_node(path, &source);
                let imports = node.imports.clone();
                self.nodes.insert(path.to_owned(), Arc::new(node));
                imports
            }
            None => {
                let err = GraphError::ModuleNotFound {
                    specifier: path.to_string(),
                };
                debug!(%err, "module graph: unresolved leaf");
                self.unresolved.insert(path.to_owned());
                Vec::new()
            }
        }
    }

    fn parse_node(&self, path: &Utf8Path, source: &str) -> ModuleNode {
        let mut imports = Vec::new();

        match self.parsers.acquire(Language::TypeScript) {
            Ok(mut parser) => {
                if let Some(tree) = parser.parse(source, None) {
                    if let Ok(query) = cem_parser::queries::get_matcher(Language::TypeScript, "typescript.imports") {
                        for import in cem_parser::imports::extract_imports(&tree, source, query) {
                            imports.push(self.resolve_specifier(path, &import.specifier));
                        }
                    }
                    if let Ok(query) = cem_parser::queries::get_matcher(Language::TypeScript, "typescript.exports") {
                        for edge in cem_parser::exports::extract_reexports(&tree, source, query) {
                            imports.push(self.resolve_specifier(path, &edge.specifier));
                        }
                    }
                } else {
                    let err = GraphError::Parse {
                        path: path.to_owned(),
                        source: cem_parser::ParseError::Parse,
                    };
                    warn!(%err, "module graph: failed to parse module body");
                }
                self.parsers.release(Language::TypeScript, parser);
            }
            Err(source) => {
                let err = GraphError::Parse {
                    path: path.to_owned(),
                    source,
                };
                warn!(%err, "module graph: failed to acquire parser");
            }
        }

        imports.sort_unstable();
        imports.dedup();

        ModuleNode {
            path: path.to_owned(),
            imports,
            directly_defined: self.registry.tags_for_module(path.as_str()),
        }
    }

    fn resolve_specifier(&self, importer: &Utf8Path, specifier: &str) -> Utf8PathBuf {
        if specifier.starts_with('.') {
            let dir = importer.parent().unwrap_or_else(|| Utf8Path::new(""));
            normalize(&dir.join(specifier))
        } else {
            normalize(Utf8Path::new(specifier))
        }
    }

    /// Returns the fixpoint of tags reachable from `module_path`: its own
    /// directly defined tags plus the transitive elements of every module
    /// it imports, with cycles handled by a visiting set.
    #[must_use]
    pub fn transitive_elements(&self, module_path: &str) -> FxHashSet<String> {
        let mut visited = fx_hash_set();
        let mut result = fx_hash_set();
        self.collect_transitive(&normalize(Utf8Path::new(module_path)), &mut visited, &mut result);
        result
    }

    fn collect_transitive(&self, path: &Utf8Path, visited: &mut FxHashSet<Utf8PathBuf>, out: &mut FxHashSet<String>) {
        if !visited.insert(path.to_owned()) {
            return;
        }
        let Some(node) = self.nodes.get(path) else {
            return;
        };
        out.extend(node.directly_defined.iter().cloned());
        let imports = node.imports.clone();
        drop(node);
        for import in &imports {
            self.collect_transitive(import, visited, out);
        }
    }

    /// Every module known to directly define `tag`.
    #[must_use]
    pub fn element_sources(&self, tag: &str) -> Vec<Utf8PathBuf> {
        self.nodes
            .iter()
            .filter(|entry| entry.value().directly_defined.contains(tag))
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Every module path currently known to the graph.
    #[must_use]
    pub fn all_module_paths(&self) -> Vec<Utf8PathBuf> {
        self.nodes.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Whether `module_path` is a node the graph has successfully built.
    #[must_use]
    pub fn contains_module(&self, module_path: &str) -> bool {
        self.nodes.contains_key(Utf8Path::new(module_path))
    }
}

/// Collapses `.`/`..` segments in `path` without touching the filesystem.
fn normalize(path: &Utf8Path) -> Utf8PathBuf {
    let mut out: Vec<&str> = Vec::new();
    for component in path.as_str().split('/') {
        match component {
            "" | "." => continue,
            ".." => {
                if matches!(out.last(), Some(last) if *last != "..") {
                    out.pop();
                } else {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    let joined = out.join("/");
    if path.as_str().starts_with('/') {
        Utf8PathBuf::from(format!("/{joined}"))
    } else {
        Utf8PathBuf::from(format!("./{joined}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ManifestPackage;
    use crate::registry::ManifestRegistry;
    use cem_core::InMemoryWorkspaceFs;

    fn registry_with(package_json: &str) -> Arc<RegistrySnapshot> {
        let package: ManifestPackage = serde_json::from_str(package_json).unwrap();
        ManifestRegistry::from_packages(vec![package]).snapshot()
    }

    #[test]
    fn test_normalize_collapses_dot_segments() {
        assert_eq!(normalize(Utf8Path::new("./a/./b/../c")), Utf8PathBuf::from("./a/c"));
    }

    #[test]
    fn test_build_for_import_path_follows_static_imports() {
        let fs = InMemoryWorkspaceFs::new()
            .with_file("./a.js", "import './b.js';")
            .with_file("./b.js", "export class B {}");
        let registry = registry_with(
            r#"{"modules":[{"path":"./b.js","declarations":[{"customElement":true,"tagName":"my-b"}]}]}"#,
        );
        let graph = ModuleGraph::new(fs, registry, Arc::new(ParserPool::new()));
        graph.build_for_import_path("./a.js");
        assert!(graph.contains_module("./a.js"));
        assert!(graph.contains_module("./b.js"));
    }

    #[test]
    fn test_transitive_elements_follows_reexports() {
        let fs = InMemoryWorkspaceFs::new()
            .with_file("./index.js", "export { MyTab } from './my-tab.js';")
            .with_file("./my-tab.js", "export class MyTab {}");
        let registry = registry_with(
            r#"{"modules":[{"path":"./my-tab.js","declarations":[{"customElement":true,"tagName":"my-tab"}]}]}"#,
        );
        let graph = ModuleGraph::new(fs, registry, Arc::new(ParserPool::new()));
        graph.build_for_import_path("./index.js");
        let elements = graph.transitive_elements("./index.js");
        assert!(elements.contains("my-tab"));
    }

    #[test]
    fn test_cycle_does_not_loop_forever() {
        let fs = InMemoryWorkspaceFs::new()
            .with_file("./a.js", "import './b.js';")
            .with_file("./b.js", "import './a.js';");
        let registry = registry_with("{}");
        let graph = ModuleGraph::new(fs, registry, Arc::new(ParserPool::new()));
        graph.build_for_import_path("./a.js");
        let elements = graph.transitive_elements("./a.js");
        assert!(elements.is_empty());
    }

    #[test]
    fn test_unresolved_module_does_not_panic() {
        let fs = InMemoryWorkspaceFs::new().with_file("./a.js", "import './missing.js';");
        let registry = registry_with("{}");
        let graph = ModuleGraph::new(fs, registry, Arc::new(ParserPool::new()));
        graph.build_for_import_path("./a.js");
        assert!(graph.contains_module("./a.js"));
        assert!(!graph.contains_module("./missing.js"));
    }

    #[test]
    fn test_element_sources_and_all_module_paths() {
        let fs = InMemoryWorkspaceFs::new().with_file("./my-tab.js", "export class MyTab {}");
        let registry = registry_with(
            r#"{"modules":[{"path":"./my-tab.js","declarations":[{"customElement":true,"tagName":"my-tab"}]}]}"#,
        );
        let graph = ModuleGraph::new(fs, registry, Arc::new(ParserPool::new()));
        graph.build_for_import_path("./my-tab.js");
        assert_eq!(graph.element_sources("my-tab"), vec![Utf8PathBuf::from("./my-tab.js")]);
        assert_eq!(graph.all_module_paths(), vec![Utf8PathBuf::from("./my-tab.js")]);
    }
}
