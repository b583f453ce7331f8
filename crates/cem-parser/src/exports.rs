//! Re-export edge extraction from a parsed TypeScript/TSX syntax tree.
//!
//! Uses the same `EXPORT_QUERY`/capture-index dispatch as this crate's
//! import extraction, trimmed to the one fact the module graph needs: which
//! specifier a statement re-exports from, and which names it re-exports
//! (or, for `export * from '...'`, that it re-exports everything).

use cem_core::FxHashSet;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Query, QueryCursor, Tree};

/// One `export ... from '...'` edge found in a module body.
///
/// An empty [`Self::names`] with [`Self::is_namespace`] set means the
/// statement is `export * from '...'` (or `export * as ns from '...'`):
/// every tag the target module transitively provides is re-exported,
/// matching the module graph's fixpoint definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReexportEdge {
    /// The specifier re-exported from, e.g. `./my-tab/my-tab.js`.
    pub specifier: String,
    /// The identifiers named in the export clause, e.g. `["MyTab"]` for
    /// `export { MyTab } from './my-tab.js'`. Empty for a namespace
    /// re-export.
    pub names: Vec<String>,
    /// Whether this edge is a namespace re-export (`export * from`).
    pub is_namespace: bool,
}

/// Extracts every re-export edge from `tree`.
///
/// # Examples
///
/// ```
/// use cem_parser::exports::extract_reexports;
/// use cem_parser::pool::Language;
/// use cem_parser::queries::get_matcher;
/// use tree_sitter::Parser;
///
/// let mut parser = Parser::new();
/// parser.set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()).unwrap();
/// let source = "export { MyTab } from './my-tab/my-tab.js';";
/// let tree = parser.parse(source, None).unwrap();
/// let query = get_matcher(Language::TypeScript, "typescript.exports").unwrap();
/// let edges = extract_reexports(&tree, source, query);
/// assert_eq!(edges.len(), 1);
/// assert_eq!(edges[0].specifier, "./my-tab/my-tab.js");
/// assert_eq!(edges[0].names, vec!["MyTab".to_owned()]);
/// ```
#[must_use]
pub fn extract_reexports(tree: &Tree, source: &str, query: &Query) -> Vec<ReexportEdge> {
    let source_bytes = source.as_bytes();
    let mut cursor = QueryCursor::new();
    let mut seen = FxHashSet::default();
    let mut edges = Vec::new();

    let source_idx = capture_index(query, "export.reexport.source");
    let statement_idx = capture_index(query, "export.reexport.statement");

    let mut matches = cursor.matches(query, tree.root_node(), source_bytes);
    while let Some(m) = matches.next() {
        let mut specifier = None;
        let mut statement = None;
        for capture in m.captures {
            let idx = Some(capture.index);
            if idx == source_idx {
                specifier = string_literal_text(capture.node, source_bytes);
            } else if idx == statement_idx {
                statement = Some(capture.node);
            }
        }
        let (Some(specifier), Some(statement)) = (specifier, statement) else {
            continue;
        };
        let key = (statement.start_byte(), statement.end_byte());
        if !seen.insert(key) {
            continue;
        }
        let names = named_specifiers(statement, source_bytes);
        let is_namespace = names.is_empty();
        edges.push(ReexportEdge {
            specifier,
            names,
            is_namespace,
        });
    }

    edges
}

/// Walks an `export_statement`'s children to find an `export_clause` and
/// collect the identifiers it names. Returns an empty vector for a
/// namespace (`export *`) form, which has no `export_clause` child.
fn named_specifiers(statement: Node<'_>, source: &[u8]) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = statement.walk();
    for child in statement.children(&mut cursor) {
        if child.kind() != "export_clause" {
            continue;
        }
        let mut clause_cursor = child.walk();
        for specifier in child.children(&mut clause_cursor) {
            if specifier.kind() != "export_specifier" {
                continue;
            }
            if let Some(name_node) = specifier.child_by_field_name("name") {
                if let Ok(text) = name_node.utf8_text(source) {
                    names.push(text.to_owned());
                }
            }
        }
    }
    names
}

fn capture_index(query: &Query, name: &str) -> Option<u32> {
    query
        .capture_names()
        .iter()
        .position(|n| *n == name)
        .map(|i| i as u32)
}

fn string_literal_text(node: Node<'_>, source: &[u8]) -> Option<String> {
    let text = node.utf8_text(source).ok()?;
    let trimmed = text.trim_matches(|c| c == '\'' || c == '"' || c == '`');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Language;
    use crate::queries::get_matcher;
    use tree_sitter::Parser;

    fn parse(source: &str) -> Tree {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .unwrap();
        parser.parse(source, None).unwrap()
    }

    #[test]
    fn test_named_reexport() {
        let source = "export { MyTab } from './my-tab/my-tab.js';";
        let tree = parse(source);
        let query = get_matcher(Language::TypeScript, "typescript.exports").unwrap();
        let edges = extract_reexports(&tree, source, query);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].specifier, "./my-tab/my-tab.js");
        assert_eq!(edges[0].names, vec!["MyTab".to_owned()]);
        assert!(!edges[0].is_namespace);
    }

    #[test]
    fn test_namespace_reexport() {
        let source = "export * from './button.js';";
        let tree = parse(source);
        let query = get_matcher(Language::TypeScript, "typescript.exports").unwrap();
        let edges = extract_reexports(&tree, source, query);
        assert_eq!(edges.len(), 1);
        assert!(edges[0].is_namespace);
        assert!(edges[0].names.is_empty());
    }

    #[test]
    fn test_multiple_names_in_one_clause() {
        let source = "export { Foo, Bar } from './shared.js';";
        let tree = parse(source);
        let query = get_matcher(Language::TypeScript, "typescript.exports").unwrap();
        let edges = extract_reexports(&tree, source, query);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].names, vec!["Foo".to_owned(), "Bar".to_owned()]);
    }

    #[test]
    fn test_local_export_without_source_is_ignored() {
        let source = "export class Foo {}";
        let tree = parse(source);
        let query = get_matcher(Language::TypeScript, "typescript.exports").unwrap();
        assert!(extract_reexports(&tree, source, query).is_empty());
    }

    #[test]
    fn test_no_duplicate_edges_for_overlapping_captures() {
        let source = "export { A } from './a.js';\nexport { B } from './b.js';";
        let tree = parse(source);
        let query = get_matcher(Language::TypeScript, "typescript.exports").unwrap();
        let edges = extract_reexports(&tree, source, query);
        assert_eq!(edges.len(), 2);
    }
}
