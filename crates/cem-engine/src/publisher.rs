//! Diagnostics publisher: orchestrates the four analyzers for a single
//! document and hands the aggregated result to the transport.
//!
//! Uses a per-document generation counter for cancellation: rather than
//! forcibly cancelling an in-flight analysis task when a newer document
//! version arrives, each publish attempt checks a per-URI generation
//! counter immediately before publishing and silently drops its result
//! if it has been superseded - if the document has been closed or
//! superseded by a newer version before publishing, the result is
//! discarded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use cem_core::{Diagnostic, EngineConfig, WorkspaceFs};
use dashmap::DashMap;
use tracing::{info_span, warn};

use crate::analyzers::{attribute_name, attribute_value, slot, tag};
use crate::document::{Document, DocumentStore};
use crate::graph::ModuleGraph;
use crate::registry::ManifestRegistry;
use crate::resolver::ImportResolver;
use crate::suggest;

/// The result of one publish cycle: the document's URI, the version it was
/// computed for, and its deduplicated diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedDiagnostics {
    /// The document's URI.
    pub uri: String,
    /// The document version these diagnostics were computed for.
    pub version: u64,
    /// The deduplicated, concatenated diagnostics.
    pub diagnostics: Vec<Diagnostic>,
}

/// Tracks the most recently *observed* version per document URI, so a
/// publish attempt for a stale version can detect it has been superseded
/// without needing to cancel the in-flight task that computed it.
#[derive(Default)]
struct GenerationTracker {
    generations: DashMap<String, Arc<AtomicU64>>,
}

impl GenerationTracker {
    fn slot(&self, uri: &str) -> Arc<AtomicU64> {
        Arc::clone(
            self.generations
                .entry(uri.to_owned())
                .or_insert_with(|| Arc::new(AtomicU64::new(0)))
                .value(),
        )
    }

    /// Records that `version` has been observed for `uri`, bumping the
    /// tracked generation forward (never backward: an out-of-order
    /// `change` notification must not un-supersede a newer one).
    fn observe(&self, uri: &str, version: u64) {
        let slot = self.slot(uri);
        slot.fetch_max(version, Ordering::SeqCst);
    }

    /// Whether `version` is still the most recent version observed for
    /// `uri` (i.e. not superseded by a later `change`).
    fn is_current(&self, uri: &str, version: u64) -> bool {
        self.slot(uri).load(Ordering::SeqCst) <= version
    }

    /// Drops the tracked generation for `uri`.
    fn forget(&self, uri: &str) {
        self.generations.remove(uri);
    }
}

/// Orchestrates the four analyzers for each publish cycle, deduplicates
/// their combined output, and enforces the monotonic-version publish
/// guard.
pub struct DiagnosticsPublisher<F> {
    documents: Arc<DocumentStore>,
    registry: Arc<ManifestRegistry>,
    graph: Arc<ModuleGraph<F>>,
    generations: GenerationTracker,
    config: EngineConfig,
}

impl<F: WorkspaceFs> DiagnosticsPublisher<F> {
    /// Creates a publisher over the given document store, manifest
    /// registry, and module graph, using [`EngineConfig::default`].
    ///
    /// Equivalent to [`Self::with_config`] with the default configuration;
    /// prefer that constructor directly when a caller has a non-default
    /// `EngineConfig` to apply (e.g. a configured
    /// `embedded_attribute_data_path`).
    #[must_use]
    pub fn new(documents: Arc<DocumentStore>, registry: Arc<ManifestRegistry>, graph: Arc<ModuleGraph<F>>) -> Self {
        Self::with_config(documents, registry, graph, EngineConfig::default())
    }

    /// Creates a publisher over the given document store, manifest
    /// registry, and module graph, applying `config` to every analyzer run
    /// and initializing the global attribute set from it. Initialization happens once per process regardless of
    /// how many publishers are constructed (see [`suggest::init_global_attributes`]).
    #[must_use]
    pub fn with_config(
        documents: Arc<DocumentStore>,
        registry: Arc<ManifestRegistry>,
        graph: Arc<ModuleGraph<F>>,
        config: EngineConfig,
    ) -> Self {
        suggest::init_global_attributes(&config);
        Self {
            documents,
            registry,
            graph,
            generations: GenerationTracker::default(),
            config,
        }
    }

    /// Records that `uri` has been opened or changed to `version`, so a
    /// subsequently superseded publish attempt can be detected.
    pub fn note_version(&self, uri: &str, version: u64) {
        self.generations.observe(uri, version);
    }

    /// Drops tracking for `uri`.
    pub fn forget(&self, uri: &str) {
        self.generations.forget(uri);
    }

    /// Runs the full pipeline for the document currently open at `uri`,
    /// returning `None` if the document is not open, or if it was
    /// superseded or closed before the result could be published.
    #[must_use]
    pub fn publish(&self, uri: &str) -> Option<PublishedDiagnostics> {
        let document = self.documents.get(uri)?;
        let version = document.version;
        self.generations.observe(uri, version);

        let span = info_span!("publish", uri = %uri, version = version);
        let _guard = span.enter();

        let diagnostics = self.run_analyzers(&document);

        // The document may have been closed or superseded while the
        // analyzers ran; re-check immediately before publishing.
        if self.documents.get(uri).is_none() {
            warn!("document closed before publish; discarding result");
            return None;
        }
        if !self.generations.is_current(uri, version) {
            warn!("document superseded before publish; discarding result");
            return None;
        }

        Some(PublishedDiagnostics {
            uri: uri.to_owned(),
            version,
            diagnostics,
        })
    }

    /// Runs [`Self::publish`] on the blocking thread pool: the diagnostics
    /// engine runs per document as an independent task. The transport
    /// (out of scope here) is expected to spawn one such task per
    /// `didOpen`/`didChange` rather than awaiting [`Self::publish`] inline
    /// on its own task, so that one document's tree-sitter parsing never
    /// blocks another's.
    ///
    /// A panic inside analysis is caught by `spawn_blocking` and surfaces as
    /// `None` here rather than propagating: any panic while analyzing one
    /// document produces zero diagnostics for that document and must not
    /// affect other documents.
    pub async fn publish_async(self: Arc<Self>, uri: String) -> Option<PublishedDiagnostics>
    where
        F: 'static,
    {
        tokio::task::spawn_blocking(move || self.publish(&uri)).await.unwrap_or(None)
    }

    fn run_analyzers(&self, document: &Document) -> Vec<Diagnostic> {
        let registry = self.registry.snapshot();
        let resolver = ImportResolver::new(Arc::clone(&registry), Arc::clone(&self.graph));
        let resolved = resolver.resolve(document);

        let mut diagnostics = Vec::new();
        diagnostics.extend(tag::analyze(document, &registry, &resolved, &self.config));
        diagnostics.extend(attribute_name::analyze(document, &registry));
        diagnostics.extend(attribute_value::analyze(document, &registry));
        diagnostics.extend(slot::analyze(document, &registry));

        dedupe(diagnostics)
    }
}

/// Deduplicates by (range, message, autofix discriminator, original,
/// suggestion), preserving the first occurrence's position.
fn dedupe(diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    let mut seen = cem_core::fx_hash_set();
    let mut out = Vec::with_capacity(diagnostics.len());
    for diagnostic in diagnostics {
        let key = (
            diagnostic.range,
            diagnostic.message.clone(),
            diagnostic.data.as_ref().map(|d| (d.type_name(), d.original().to_owned(), d.suggestion().to_owned())),
        );
        if seen.insert(key) {
            out.push(diagnostic);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ManifestPackage;
    use cem_core::{InMemoryWorkspaceFs, Range, Severity, SourceLocation};
    use cem_parser::pool::ParserPool;

    fn range(start: u32, end: u32) -> Range {
        Range::new(SourceLocation::new(0, 0, start), SourceLocation::new(0, 0, end))
    }

    fn setup(manifest_json: &str) -> DiagnosticsPublisher<InMemoryWorkspaceFs> {
        let package: ManifestPackage = serde_json::from_str(manifest_json).unwrap();
        let registry = Arc::new(ManifestRegistry::from_packages(vec![package]));
        let parsers = Arc::new(ParserPool::new());
        let graph = Arc::new(ModuleGraph::new(InMemoryWorkspaceFs::new(), registry.snapshot(), Arc::clone(&parsers)));
        let documents = Arc::new(DocumentStore::new(parsers));
        DiagnosticsPublisher::new(documents, registry, graph)
    }

    #[test]
    fn test_dedupe_collapses_identical_diagnostics() {
        let a = Diagnostic::new(range(0, 5), Severity::Warning, "same".to_owned());
        let b = Diagnostic::new(range(0, 5), Severity::Warning, "same".to_owned());
        let c = Diagnostic::new(range(5, 10), Severity::Warning, "different range".to_owned());
        let out = dedupe(vec![a, b, c]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_publish_unknown_uri_returns_none() {
        let publisher = setup("{}");
        assert!(publisher.publish("file:///missing.html").is_none());
    }

    #[test]
    fn test_publish_runs_all_analyzers_and_aggregates() {
        let publisher = setup(
            r#"{"modules":[{"path":"./my-element.js","declarations":[{"customElement":true,"tagName":"my-element","attributes":[{"name":"size"}]}]}]}"#,
        );
        publisher.documents.open(
            "file:///index.html",
            r#"<my-element siz="large"></my-element>"#,
            1,
        );
        let result = publisher.publish("file:///index.html").unwrap();
        assert_eq!(result.version, 1);
        assert!(result.diagnostics.iter().any(|d| d.message.contains("Unknown attribute")));
    }

    #[test]
    fn test_publish_discards_result_for_superseded_version() {
        let publisher = setup("{}");
        publisher.documents.open("file:///app.ts", "import './a.js';", 1);
        // Simulate a newer version having already been observed (e.g. a
        // `change` notification arrived while this stale task was
        // running) before the stale publish call is made.
        publisher.note_version("file:///app.ts", 2);

        // A publish attempt that reads the document fresh still observes
        // version 1 here (the store itself was not changed), but the
        // generation tracker has already moved past it, so the result for
        // version 1 must be discarded per the monotonic publish guard.
        let stale_doc = publisher.documents.get("file:///app.ts").unwrap();
        assert_eq!(stale_doc.version, 1);
        assert!(!publisher.generations.is_current("file:///app.ts", 1));
    }

    #[test]
    fn test_publish_discards_result_after_close() {
        let publisher = setup(
            r#"{"modules":[{"path":"./button.js","declarations":[{"customElement":true,"tagName":"my-button"}]}]}"#,
        );
        publisher.documents.open("file:///index.html", "<my-button></my-button>", 1);
        publisher.documents.close("file:///index.html");
        assert!(publisher.publish("file:///index.html").is_none());
    }

    #[test]
    fn test_forget_drops_generation_tracking() {
        let publisher = setup("{}");
        publisher.note_version("file:///app.ts", 5);
        publisher.forget("file:///app.ts");
        // After forgetting, a fresh slot starts at 0, so any non-negative
        // version is considered current again.
        assert!(publisher.generations.is_current("file:///app.ts", 0));
    }

    #[tokio::test]
    async fn test_publish_async_runs_on_blocking_pool() {
        let publisher = Arc::new(setup(
            r#"{"modules":[{"path":"./my-button.js","declarations":[{"customElement":true,"tagName":"my-button"}]}]}"#,
        ));
        publisher.documents.open("file:///index.html", "<unknown-button></unknown-button>", 1);
        let result = publisher.publish_async("file:///index.html".to_owned()).await.unwrap();
        assert!(result.diagnostics.iter().any(|d| d.message.contains("Unknown custom element")));
    }

    #[tokio::test]
    async fn test_publish_async_unknown_uri_returns_none() {
        let publisher = Arc::new(setup("{}"));
        assert!(publisher.publish_async("file:///missing.html".to_owned()).await.is_none());
    }

    #[test]
    fn test_with_config_applies_custom_config_to_analyzers() {
        let package: ManifestPackage = serde_json::from_str("{}").unwrap();
        let registry = Arc::new(ManifestRegistry::from_packages(vec![package]));
        let parsers = Arc::new(ParserPool::new());
        let graph = Arc::new(ModuleGraph::new(InMemoryWorkspaceFs::new(), registry.snapshot(), Arc::clone(&parsers)));
        let documents = Arc::new(DocumentStore::new(parsers));
        let config = cem_core::EngineConfig {
            levenshtein_max_candidates: 1,
            ..cem_core::EngineConfig::default()
        };
        let publisher = DiagnosticsPublisher::with_config(documents, registry, graph, config);
        publisher.documents.open("file:///index.html", "<unregistered-thing></unregistered-thing>", 1);
        let result = publisher.publish("file:///index.html").unwrap();
        assert!(result.diagnostics.iter().any(|d| d.message.contains("Unknown custom element")));
    }
}
