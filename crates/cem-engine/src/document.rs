//! Document store: the owner of a document's text, parse trees, and
//! derived caches.
//!
//! A `DashMap`-backed store exposing only narrow read projections, never
//! the map itself, keyed by URI. A document's version is
//! replaced atomically on each `change`; readers always see a
//! self-consistent (text, trees, caches) snapshot for the version they
//! observed. An already-observed `Document` is never mutated in place.

use std::sync::Arc;

use cem_core::{
    AttributeOccurrence, CustomElementMatch, ImportKind, ImportMap, ImportStatement, ScriptBody, ScriptTag,
};
use cem_parser::html::{self, AttributeSite, SlotSite};
use cem_parser::imports::extract_imports;
use cem_parser::pool::{Language, ParserPool};
use cem_parser::queries::get_matcher;
use dashmap::DashMap;
use tracing::{debug, warn};

const IGNORE_SENTINEL_TS: &str = "// cem-lsp ignore missing-import";
const IGNORE_SENTINEL_HTML: &str = "<!-- cem-lsp ignore missing-import -->";

/// The language a document is written in, derived from its URI suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentLanguage {
    /// An HTML document, parsed with the HTML grammar; module `<script>`
    /// bodies are additionally parsed as TypeScript.
    Html,
    /// A TS/JS document, parsed with the TypeScript grammar only.
    Script,
}

impl DocumentLanguage {
    /// Derives a document's language from its URI's file extension.
    /// Unrecognized extensions fall back to [`Self::Script`]: anything not
    /// explicitly HTML is treated as source.
    #[must_use]
    pub fn from_uri(uri: &str) -> Self {
        match uri.rsplit('.').next() {
            Some("html" | "htm") => Self::Html,
            _ => Self::Script,
        }
    }

    fn tree_sitter_language(self, uri: &str) -> Language {
        match self {
            Self::Html => Language::Html,
            Self::Script if uri.ends_with(".tsx") || uri.ends_with(".jsx") => Language::Tsx,
            Self::Script => Language::TypeScript,
        }
    }
}

/// An open document: its text, version, language, and every derived cache
/// the analyzers and resolver read from.
#[derive(Debug, Clone)]
pub struct Document {
    /// The document's identifying URI.
    pub uri: String,
    /// The document's current text.
    pub text: String,
    /// Monotonically increasing version, bumped on every `change`.
    pub version: u64,
    /// The document's language.
    pub language: DocumentLanguage,
    /// Custom-element start-tag occurrences (HTML documents only).
    pub elements: Vec<CustomElementMatch>,
    /// Attribute occurrences on every element, custom or standard (HTML
    /// documents only).
    pub attributes: Vec<AttributeSite>,
    /// `slot="..."` occurrences on descendants of custom elements (HTML
    /// documents only).
    pub slots: Vec<SlotSite>,
    /// `<script>` tags found in the document, each with its body's imports
    /// populated when it is an inline module script (HTML documents only).
    pub scripts: Vec<ScriptTag>,
    /// Import statements found directly in the document body (TS/JS
    /// documents only; HTML documents carry theirs on `scripts` instead).
    pub body_imports: Vec<ImportStatement>,
    /// The merged importmap, built from every `<script type="importmap">`
    /// body in the document (HTML documents only).
    pub import_map: ImportMap,
    /// Whether the ignore sentinel is present anywhere in the document's
    /// text, suppressing all tag diagnostics for it.
    pub suppress_missing_import: bool,
}

impl Document {
    fn build(uri: String, text: String, version: u64, parsers: &ParserPool) -> Self {
        let language = DocumentLanguage::from_uri(&uri);
        let suppress_missing_import = text.contains(IGNORE_SENTINEL_TS) || text.contains(IGNORE_SENTINEL_HTML);

        let mut doc = Self {
            uri: uri.clone(),
            text: text.clone(),
            version,
            language,
            elements: Vec::new(),
            attributes: Vec::new(),
            slots: Vec::new(),
            scripts: Vec::new(),
            body_imports: Vec::new(),
            import_map: ImportMap::default(),
            suppress_missing_import,
        };

        match language {
            DocumentLanguage::Html => doc.parse_html(parsers),
            DocumentLanguage::Script => doc.parse_script(parsers),
        }

        doc
    }

    fn parse_html(&mut self, parsers: &ParserPool) {
        let Ok(mut parser) = parsers.acquire(Language::Html) else {
            warn!(uri = %self.uri, "failed to acquire HTML parser");
            return;
        };
        let tree = parser.parse(&self.text, None);
        parsers.release(Language::Html, parser);

        let Some(tree) = tree else {
            warn!(uri = %self.uri, "HTML parse produced no tree");
            return;
        };

        let mut extraction = html::extract(&tree, &self.text);

        for script in &mut extraction.scripts {
            if !script.is_module {
                continue;
            }
            let ScriptBody::Inline(body) = &script.body else {
                continue;
            };
            script.imports = Self::extract_script_imports(body, Language::TypeScript, parsers).into();
        }

        for body in &extraction.importmap_bodies {
            self.import_map.merge(&ImportMap::parse(body));
        }

        self.elements = extraction.elements;
        self.attributes = extraction.attributes;
        self.slots = extraction.slots;
        self.scripts = extraction.scripts;
    }

    fn parse_script(&mut self, parsers: &ParserPool) {
        let language = self.language.tree_sitter_language(&self.uri);
        self.body_imports = Self::extract_script_imports(&self.text, language, parsers);
    }

    fn extract_script_imports(body: &str, language: Language, parsers: &ParserPool) -> Vec<ImportStatement> {
        let Ok(mut parser) = parsers.acquire(language) else {
            return Vec::new();
        };
        let tree = parser.parse(body, None);
        parsers.release(language, parser);

        let Some(tree) = tree else {
            debug!("embedded script body failed to parse");
            return Vec::new();
        };
        let Ok(query) = get_matcher(language, "typescript.imports") else {
            return Vec::new();
        };
        extract_imports(&tree, body, query)
    }

    /// Every import specifier this document references, paired with how it
    /// was discovered: body imports for a TS/JS document, or
    /// module-script imports plus non-module `src` references for an HTML
    /// document.
    #[must_use]
    pub fn import_specifiers(&self) -> Vec<(String, ImportKind)> {
        let mut specifiers = Vec::new();
        for import in &self.body_imports {
            specifiers.push((import.specifier.clone(), import.kind));
        }
        for script in &self.scripts {
            match &script.body {
                ScriptBody::Inline(_) if script.is_module => {
                    for import in &script.imports {
                        specifiers.push((import.specifier.clone(), import.kind));
                    }
                }
                ScriptBody::External { src } if !script.is_module => {
                    specifiers.push((src.clone(), ImportKind::Legacy));
                }
                _ => {}
            }
        }
        specifiers
    }

    /// Every attribute occurrence with a non-`None` value, used by the
    /// attribute-value analyzer.
    #[must_use]
    pub fn attributes_with_values(&self) -> Vec<(&AttributeSite, &AttributeOccurrence)> {
        self.attributes
            .iter()
            .filter_map(|site| site.attribute.value.as_ref().map(|_| (site, &site.attribute)))
            .collect()
    }
}

/// The document store: a `DashMap`-backed cache of open documents, keyed
/// by URI.
pub struct DocumentStore {
    parsers: Arc<ParserPool>,
    documents: DashMap<String, Arc<Document>>,
}

impl DocumentStore {
    /// Creates an empty store that parses through `parsers`.
    #[must_use]
    pub fn new(parsers: Arc<ParserPool>) -> Self {
        Self {
            parsers,
            documents: DashMap::new(),
        }
    }

    /// Opens a document: parses it and populates its caches.
    pub fn open(&self, uri: impl Into<String>, text: impl Into<String>, version: u64) -> Arc<Document> {
        let uri = uri.into();
        let doc = Arc::new(Document::build(uri.clone(), text.into(), version, &self.parsers));
        self.documents.insert(uri, Arc::clone(&doc));
        doc
    }

    /// Replaces a document's text and version atomically, re-parsing and
    /// recomputing every derived cache. Returns `None` if the document was
    /// not open.
    pub fn change(&self, uri: &str, text: impl Into<String>, version: u64) -> Option<Arc<Document>> {
        if !self.documents.contains_key(uri) {
            return None;
        }
        let doc = Arc::new(Document::build(uri.to_owned(), text.into(), version, &self.parsers));
        self.documents.insert(uri.to_owned(), Arc::clone(&doc));
        Some(doc)
    }

    /// Closes a document, releasing its trees and caches.
    pub fn close(&self, uri: &str) {
        self.documents.remove(uri);
    }

    /// Returns the current handle for `uri`, if open.
    #[must_use]
    pub fn get(&self, uri: &str) -> Option<Arc<Document>> {
        self.documents.get(uri).map(|entry| Arc::clone(entry.value()))
    }

    /// The document's current text.
    #[must_use]
    pub fn content(&self, uri: &str) -> Option<String> {
        self.get(uri).map(|doc| doc.text.clone())
    }

    /// The document's `<script>` tags (empty for non-HTML documents).
    #[must_use]
    pub fn script_tags(&self, uri: &str) -> Option<Vec<ScriptTag>> {
        self.get(uri).map(|doc| doc.scripts.clone())
    }

    /// The document's merged importmap.
    #[must_use]
    pub fn import_map(&self, uri: &str) -> Option<ImportMap> {
        self.get(uri).map(|doc| doc.import_map.clone())
    }

    /// The document's custom-element occurrences.
    #[must_use]
    pub fn find_custom_elements(&self, uri: &str) -> Option<Vec<CustomElementMatch>> {
        self.get(uri).map(|doc| doc.elements.clone())
    }

    /// The document's attribute occurrences that carry a value.
    #[must_use]
    pub fn find_attributes_with_values(&self, uri: &str) -> Option<Vec<AttributeSite>> {
        self.get(uri).map(|doc| {
            doc.attributes
                .iter()
                .filter(|site| site.attribute.value.is_some())
                .cloned()
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> DocumentStore {
        DocumentStore::new(Arc::new(ParserPool::new()))
    }

    #[test]
    fn test_open_html_document_extracts_elements() {
        let store = store();
        let doc = store.open("file:///index.html", r#"<my-button size="large"></my-button>"#, 1);
        assert_eq!(doc.elements.len(), 1);
        assert_eq!(doc.elements[0].tag_name, "my-button");
    }

    #[test]
    fn test_open_script_document_extracts_body_imports() {
        let store = store();
        let doc = store.open("file:///app.ts", "import './my-button.js';", 1);
        assert_eq!(doc.body_imports.len(), 1);
        assert_eq!(doc.body_imports[0].specifier, "./my-button.js");
    }

    #[test]
    fn test_change_replaces_text_and_version() {
        let store = store();
        store.open("file:///app.ts", "import './a.js';", 1);
        let updated = store.change("file:///app.ts", "import './b.js';", 2).unwrap();
        assert_eq!(updated.version, 2);
        assert_eq!(updated.body_imports[0].specifier, "./b.js");
    }

    #[test]
    fn test_change_on_unopened_document_returns_none() {
        let store = store();
        assert!(store.change("file:///missing.ts", "x", 1).is_none());
    }

    #[test]
    fn test_close_drops_document() {
        let store = store();
        store.open("file:///app.ts", "import './a.js';", 1);
        store.close("file:///app.ts");
        assert!(store.get("file:///app.ts").is_none());
    }

    #[test]
    fn test_module_script_imports_are_extracted_in_html() {
        let store = store();
        let doc = store.open(
            "file:///index.html",
            r#"<script type="module">import './my-tab.js';</script>"#,
            1,
        );
        assert_eq!(doc.scripts.len(), 1);
        assert_eq!(doc.scripts[0].imports.len(), 1);
        assert_eq!(doc.scripts[0].imports[0].specifier, "./my-tab.js");
    }

    #[test]
    fn test_importmap_bodies_are_merged() {
        let store = store();
        let html = r#"
            <script type="importmap">{"imports": {"a": "./vendor/a.js"}}</script>
            <script type="importmap">{"imports": {"b": "./vendor/b.js"}}</script>
        "#;
        let doc = store.open("file:///index.html", html, 1);
        assert_eq!(doc.import_map.resolve("a"), Some("./vendor/a.js"));
        assert_eq!(doc.import_map.resolve("b"), Some("./vendor/b.js"));
    }

    #[test]
    fn test_ignore_sentinel_detected_in_ts() {
        let store = store();
        let doc = store.open(
            "file:///app.ts",
            "// cem-lsp ignore missing-import\nimport './a.js';",
            1,
        );
        assert!(doc.suppress_missing_import);
    }

    #[test]
    fn test_ignore_sentinel_detected_in_html() {
        let store = store();
        let doc = store.open(
            "file:///index.html",
            "<!-- cem-lsp ignore missing-import -->\n<my-button></my-button>",
            1,
        );
        assert!(doc.suppress_missing_import);
    }

    #[test]
    fn test_import_specifiers_combines_module_and_legacy_scripts() {
        let store = store();
        let html = r#"<script type="module">import './modern.js';</script><script src="./legacy.js"></script>"#;
        let doc = store.open("file:///index.html", html, 1);
        let specifiers = doc.import_specifiers();
        assert!(specifiers.contains(&("./modern.js".to_owned(), ImportKind::Static)));
        assert!(specifiers.contains(&("./legacy.js".to_owned(), ImportKind::Legacy)));
    }

    #[test]
    fn test_tsx_extension_uses_tsx_grammar_without_panicking() {
        let store = store();
        let doc = store.open("file:///app.tsx", "import './button.js';\nconst x = <div/>;", 1);
        assert_eq!(doc.language, DocumentLanguage::Script);
    }
}
