//! Import extraction from a parsed TypeScript/TSX syntax tree.
//!
//! Trimmed to the three-kind model the resolver actually distinguishes:
//! a document only needs a specifier and whether it came from a
//! statically analyzable form, never the bound local names.

use cem_core::{ImportKind, ImportStatement};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Query, QueryCursor, Tree};

/// Extracts every static and literal-specifier dynamic import from `tree`.
///
/// Dynamic imports with a non-literal specifier (`import(computeName())`)
/// are silently skipped; resolving a computed specifier is out of scope.
///
/// # Examples
///
/// ```
/// use cem_parser::imports::extract_imports;
/// use cem_parser::pool::Language;
/// use cem_parser::queries::get_matcher;
/// use tree_sitter::Parser;
///
/// let mut parser = Parser::new();
/// parser.set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()).unwrap();
/// let source = "import './button.js';\nconst m = await import('./tabs.js');";
/// let tree = parser.parse(source, None).unwrap();
/// let query = get_matcher(Language::TypeScript, "typescript.imports").unwrap();
/// let imports = extract_imports(&tree, source, query);
/// assert_eq!(imports.len(), 2);
/// ```
#[must_use]
pub fn extract_imports(tree: &Tree, source: &str, query: &Query) -> Vec<ImportStatement> {
    let source_bytes = source.as_bytes();
    let mut cursor = QueryCursor::new();
    let mut imports = Vec::new();

    let import_source_idx = capture_index(query, "import.source");
    let dynamic_source_idx = capture_index(query, "import.dynamic.source");

    let mut matches = cursor.matches(query, tree.root_node(), source_bytes);
    while let Some(m) = matches.next() {
        for capture in m.captures {
            let idx = Some(capture.index);
            let kind = if idx == import_source_idx {
                ImportKind::Static
            } else if idx == dynamic_source_idx {
                ImportKind::Dynamic
            } else {
                continue;
            };
            if let Some(specifier) = string_literal_text(capture.node, source_bytes) {
                imports.push(ImportStatement::new(specifier, kind));
            }
        }
    }

    imports
}

fn capture_index(query: &Query, name: &str) -> Option<u32> {
    query
        .capture_names()
        .iter()
        .position(|n| *n == name)
        .map(|i| i as u32)
}

/// Extracts the unquoted text of a tree-sitter `string` node.
fn string_literal_text(node: tree_sitter::Node<'_>, source: &[u8]) -> Option<String> {
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
    fn test_extracts_static_import() {
        let source = "import { Foo } from './button.js';";
        let tree = parse(source);
        let query = get_matcher(Language::TypeScript, "typescript.imports").unwrap();
        let imports = extract_imports(&tree, source, query);
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].specifier, "./button.js");
        assert_eq!(imports[0].kind, ImportKind::Static);
    }

    #[test]
    fn test_extracts_dynamic_import_with_literal_specifier() {
        let source = "const m = await import('./tabs.js');";
        let tree = parse(source);
        let query = get_matcher(Language::TypeScript, "typescript.imports").unwrap();
        let imports = extract_imports(&tree, source, query);
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].specifier, "./tabs.js");
        assert_eq!(imports[0].kind, ImportKind::Dynamic);
    }

    #[test]
    fn test_skips_dynamic_import_with_computed_specifier() {
        let source = "const m = await import(computeName());";
        let tree = parse(source);
        let query = get_matcher(Language::TypeScript, "typescript.imports").unwrap();
        let imports = extract_imports(&tree, source, query);
        assert!(imports.is_empty());
    }

    #[test]
    fn test_extracts_multiple_imports_in_order() {
        let source = "import './a.js';\nimport './b.js';\n";
        let tree = parse(source);
        let query = get_matcher(Language::TypeScript, "typescript.imports").unwrap();
        let imports = extract_imports(&tree, source, query);
        assert_eq!(imports.len(), 2);
        assert_eq!(imports[0].specifier, "./a.js");
        assert_eq!(imports[1].specifier, "./b.js");
    }

    #[test]
    fn test_no_imports_in_source() {
        let source = "const x = 1;";
        let tree = parse(source);
        let query = get_matcher(Language::TypeScript, "typescript.imports").unwrap();
        assert!(extract_imports(&tree, source, query).is_empty());
    }
}
