//! Compiled, cached tree-sitter queries shared across documents.
//!
//! Each named query is compiled at most once per language, process-wide,
//! and cached behind a [`std::sync::OnceLock`]. Compiled [`Query`] values
//! are immutable and safe to share across threads, so [`get_matcher`] never
//! takes a lock beyond the one-time compile.
//!
//! HTML structure (nested elements, ancestor-aware slot resolution) is
//! walked directly over the syntax tree in [`crate::html`] rather than
//! queried: tree-sitter query captures are flat match sets and cannot
//! naturally express "the nearest ancestor start tag containing a dash",
//! so only the two flat, order-independent extractions this crate performs
//! on TypeScript (imports, exports) go through the query cache.

use std::sync::OnceLock;

use tree_sitter::{Language as TsLanguage, Query};

use crate::error::ParseError;
use crate::pool::Language;

/// Tree-sitter query matching TypeScript/TSX import forms:
/// static `import ... from '...'`, and `import('...')` calls with a
/// literal string specifier.
///
/// # Capture Names
///
/// - `import.statement` - the full `import_statement` node
/// - `import.source` - the specifier string of a static import
/// - `import.dynamic.source` - the specifier string of a dynamic import
pub const IMPORT_QUERY: &str = r"
(import_statement
  source: (string) @import.source) @import.statement

(call_expression
  function: (import)
  arguments: (arguments
    (string) @import.dynamic.source))
";

/// Tree-sitter query matching TypeScript/TSX re-export forms, the data the
/// module graph's re-export transitivity is built from.
///
/// Matches any `export ... from '...'` statement (named re-exports,
/// `export * from`, `export * as ns from`) by its `source` field; whether
/// the statement also names specific exported identifiers is determined by
/// walking the matched statement's children in [`crate::exports`], since a
/// query's flat captures cannot cleanly express "has no `export_clause`".
///
/// # Capture Names
///
/// - `export.reexport.source` - the module specifier re-exported from
/// - `export.reexport.statement` - the full `export_statement` node
pub const EXPORT_QUERY: &str = r"
(export_statement
  source: (string) @export.reexport.source) @export.reexport.statement
";

macro_rules! cached_query {
    ($fn_name:ident, $cache_ts:ident, $cache_tsx:ident, $source:expr) => {
        static $cache_ts: OnceLock<Query> = OnceLock::new();
        static $cache_tsx: OnceLock<Query> = OnceLock::new();

        fn $fn_name(language: Language) -> Result<&'static Query, ParseError> {
            let (cache, ts_language): (&OnceLock<Query>, TsLanguage) = match language {
                Language::TypeScript => (&$cache_ts, tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
                Language::Tsx => (&$cache_tsx, tree_sitter_typescript::LANGUAGE_TSX.into()),
                Language::Html => return Err(ParseError::LanguageInit),
            };
            if let Some(query) = cache.get() {
                return Ok(query);
            }
            let compiled = Query::new(&ts_language, $source).map_err(|e| ParseError::QueryCompile {
                offset: e.offset,
                kind: e,
            })?;
            Ok(cache.get_or_init(|| compiled))
        }
    };
}

cached_query!(imports_query, IMPORT_QUERY_TS, IMPORT_QUERY_TSX, IMPORT_QUERY);
cached_query!(exports_query, EXPORT_QUERY_TS, EXPORT_QUERY_TSX, EXPORT_QUERY);

/// Returns the compiled, cached matcher for `name` under `language`.
///
/// Known names: `"typescript.imports"`, `"typescript.exports"`.
///
/// # Errors
///
/// Returns [`ParseError::QueryCompile`] if the query source fails to
/// compile, or [`ParseError::LanguageInit`] for an unknown name or a
/// language that has no queries defined (HTML, whose structure is walked
/// directly - see the module docs).
pub fn get_matcher(language: Language, name: &str) -> Result<&'static Query, ParseError> {
    match name {
        "typescript.imports" => imports_query(language),
        "typescript.exports" => exports_query(language),
        _ => Err(ParseError::LanguageInit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_query_compiles_for_both_languages() {
        assert!(get_matcher(Language::TypeScript, "typescript.imports").is_ok());
        assert!(get_matcher(Language::Tsx, "typescript.imports").is_ok());
    }

    #[test]
    fn test_export_query_compiles() {
        assert!(get_matcher(Language::TypeScript, "typescript.exports").is_ok());
    }

    #[test]
    fn test_unknown_matcher_name_errors() {
        assert!(get_matcher(Language::TypeScript, "nonsense").is_err());
    }

    #[test]
    fn test_html_has_no_query_matchers() {
        assert!(get_matcher(Language::Html, "typescript.imports").is_err());
    }

    #[test]
    fn test_matcher_is_cached_across_calls() {
        let first = get_matcher(Language::TypeScript, "typescript.imports").unwrap() as *const Query;
        let second = get_matcher(Language::TypeScript, "typescript.imports").unwrap() as *const Query;
        assert_eq!(first, second);
    }
}
