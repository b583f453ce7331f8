//! Script tags, import statements, and importmaps extracted from documents.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::hash::FxHashMap;

/// The kind of an `import` form, as distinguished by the import resolver
///. This is coarser than a full ECMAScript import-kind taxonomy: the
/// resolver only needs to know whether a specifier came from a statically
/// analyzable form or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    /// A static `import ... from '...'` or `export ... from '...'` form.
    Static,
    /// A `import('...')` call with a literal string specifier.
    Dynamic,
    /// A `<script src="...">` reference without `type="module"`, treated as
    /// a specifier source during import-graph resolution even though it is
    /// not an ECMAScript import form.
    Legacy,
}

impl ImportKind {
    /// Dynamic imports with non-literal specifiers are out of scope;
    /// only this fully-static subset ever reaches an [`ImportStatement`].
    #[must_use]
    pub const fn is_dynamic(self) -> bool {
        matches!(self, Self::Dynamic)
    }
}

/// One import statement or import-like reference collected from a document
/// or module body.
///
/// # Examples
///
/// ```
/// use cem_core::{ImportKind, ImportStatement};
///
/// let import = ImportStatement::new("./button.js".to_owned(), ImportKind::Static);
/// assert_eq!(import.specifier, "./button.js");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStatement {
    /// The specifier text as written, e.g. `./button.js` or `@scope/pkg/x`.
    pub specifier: String,
    /// How this specifier was discovered.
    pub kind: ImportKind,
}

impl ImportStatement {
    /// Creates a new import statement.
    #[must_use]
    pub const fn new(specifier: String, kind: ImportKind) -> Self {
        Self { specifier, kind }
    }
}

/// The body of a `<script>` tag: either inline text or an external `src`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptBody {
    /// An inline script body, always treated as TypeScript for import
    /// extraction purposes.
    Inline(String),
    /// An external script reference.
    External {
        /// The `src` attribute value.
        src: String,
    },
}

/// A `<script>` tag found in an HTML document.
///
/// # Examples
///
/// ```
/// use cem_core::{ScriptBody, ScriptTag};
///
/// let tag = ScriptTag::new(true, ScriptBody::External { src: "./button.js".to_owned() });
/// assert!(tag.is_module);
/// assert!(tag.imports.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptTag {
    /// Whether this tag has `type="module"`.
    pub is_module: bool,
    /// The tag's body.
    pub body: ScriptBody,
    /// Import statements found in this script's body (only populated for
    /// inline module scripts; external scripts are resolved via the module
    /// graph instead).
    pub imports: SmallVec<[ImportStatement; 4]>,
}

impl ScriptTag {
    /// Creates a script tag with no imports recorded yet.
    #[must_use]
    pub const fn new(is_module: bool, body: ScriptBody) -> Self {
        Self {
            is_module,
            body,
            imports: SmallVec::new_const(),
        }
    }
}

/// A parsed `<script type="importmap">` table: bare specifier → resolved
/// path.
///
/// # Examples
///
/// ```
/// use cem_core::ImportMap;
///
/// let mut map = ImportMap::default();
/// map.insert("my-lib".to_owned(), "./vendor/my-lib.js".to_owned());
/// assert_eq!(map.resolve("my-lib"), Some("./vendor/my-lib.js"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportMap {
    entries: FxHashMap<String, String>,
}

impl ImportMap {
    /// Inserts or replaces a mapping.
    pub fn insert(&mut self, specifier: String, resolved: String) {
        self.entries.insert(specifier, resolved);
    }

    /// Looks up the resolved path for a bare specifier, if mapped.
    #[must_use]
    pub fn resolve(&self, specifier: &str) -> Option<&str> {
        self.entries.get(specifier).map(String::as_str)
    }

    /// Returns whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(specifier, resolved)` pairs, in unspecified order.
    /// Used to merge a document's importmap bodies into the resolver's
    /// view without exposing the backing map's representation.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merges `other`'s entries into `self`, `other` taking precedence on
    /// key collision. Used when a document contains more than one
    /// `<script type="importmap">` tag.
    pub fn merge(&mut self, other: &Self) {
        for (k, v) in other.iter() {
            self.entries.insert(k.to_owned(), v.to_owned());
        }
    }

    /// Parses an importmap from its JSON text, e.g. the body of a
    /// `<script type="importmap">` tag: `{"imports": {"bare": "./resolved.js"}}`.
    /// Tolerates missing or malformed input by returning an empty map,
    /// matching the rest of this crate's failure-isolation stance: unknown
    /// or malformed input produces no diagnostics rather than an error.
    #[must_use]
    pub fn parse(json_text: &str) -> Self {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            imports: FxHashMap<String, String>,
        }
        serde_json::from_str::<Raw>(json_text)
            .map(|raw| Self { entries: raw.imports })
            .unwrap_or_default()
    }
}
