//! HTML structural extraction: custom elements, attributes, slots, script
//! tags, and importmap bodies.
//!
//! Unlike [`crate::imports`] and [`crate::exports`], this module walks the
//! tree directly instead of going through the query cache: a custom
//! element's attributes and a slot attribute's nearest custom-element
//! ancestor are both structural, nested facts that a flat query capture
//! set cannot express without re-deriving the tree's shape from captured
//! byte ranges. A single recursive walk, applying the same
//! capture-and-group-by-parent-range discipline this crate's query-based
//! extraction uses but to tree structure instead of query captures,
//! produces every derived collection the document store needs in one pass.

use cem_core::{AttributeOccurrence, CustomElementMatch, Range, ScriptBody, ScriptTag, SourceLocation};
use tree_sitter::{Node, Tree};

/// One attribute occurrence together with the element it was found on.
/// The attribute-name analyzer needs this for every element, not
/// just custom ones, to decide between "unknown attribute on a custom
/// element" and "near-miss of a global attribute on a standard element".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSite {
    /// The enclosing element's tag name, e.g. `div` or `my-element`.
    pub element_name: String,
    /// Whether `element_name` is recognized as a custom element.
    pub is_custom_element: bool,
    /// The attribute occurrence itself.
    pub attribute: AttributeOccurrence,
}

/// One `slot="..."` attribute found on a descendant of a custom element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSite {
    /// The slot name as written.
    pub value: String,
    /// The range of the value text.
    pub range: Range,
    /// The tag name of the nearest ancestor start tag containing a dash.
    pub ancestor_tag: String,
}

/// Every structural fact extracted from one HTML parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlExtraction {
    /// Custom-element start-tag occurrences.
    pub elements: Vec<CustomElementMatch>,
    /// Attribute occurrences on every element, custom or standard.
    pub attributes: Vec<AttributeSite>,
    /// `slot="..."` occurrences on descendants of custom elements.
    pub slots: Vec<SlotSite>,
    /// `<script>` tags found anywhere in the document, in document order.
    pub scripts: Vec<ScriptTag>,
    /// Raw JSON bodies of `<script type="importmap">` tags, in document
    /// order; the document store parses and merges these.
    pub importmap_bodies: Vec<String>,
}

/// Walks `tree` and extracts every structural fact in one pass.
///
/// # Examples
///
/// ```
/// use cem_parser::html::extract;
/// use tree_sitter::Parser;
///
/// let mut parser = Parser::new();
/// parser.set_language(&tree_sitter_html::LANGUAGE.into()).unwrap();
/// let source = r#"<my-button size="large"></my-button>"#;
/// let tree = parser.parse(source, None).unwrap();
/// let extraction = extract(&tree, source);
/// assert_eq!(extraction.elements.len(), 1);
/// assert_eq!(extraction.elements[0].tag_name, "my-button");
/// ```
#[must_use]
pub fn extract(tree: &Tree, source: &str) -> HtmlExtraction {
    let mut out = HtmlExtraction::default();
    let mut ancestors: Vec<String> = Vec::new();
    walk(tree.root_node(), source.as_bytes(), &mut ancestors, &mut out);
    out
}

fn walk(node: Node<'_>, source: &[u8], ancestors: &mut Vec<String>, out: &mut HtmlExtraction) {
    match node.kind() {
        "element" => walk_element(node, source, ancestors, out),
        "script_element" => walk_script_element(node, source, out),
        _ => {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                walk(child, source, ancestors, out);
            }
        }
    }
}

fn walk_element(node: Node<'_>, source: &[u8], ancestors: &mut Vec<String>, out: &mut HtmlExtraction) {
    let Some(start_tag) = find_child(node, "start_tag") else {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            walk(child, source, ancestors, out);
        }
        return;
    };
    let Some(tag_name_node) = find_child(start_tag, "tag_name") else {
        return;
    };
    let Ok(tag_name) = tag_name_node.utf8_text(source) else {
        return;
    };
    let tag_name = tag_name.to_owned();
    let is_custom = CustomElementMatch::is_custom_element_name(&tag_name);

    let mut element_match = CustomElementMatch::new(tag_name.clone(), node_range(tag_name_node));

    let mut attr_cursor = start_tag.walk();
    for attr_node in start_tag.children(&mut attr_cursor) {
        if attr_node.kind() != "attribute" {
            continue;
        }
        let Some(occurrence) = attribute_occurrence(attr_node, source) else {
            continue;
        };

        if occurrence.name == "slot" {
            if let (Some(value), Some(ancestor_tag)) = (occurrence.value.as_ref(), ancestors.last()) {
                if !value.is_empty() {
                    out.slots.push(SlotSite {
                        value: value.clone(),
                        range: occurrence.range,
                        ancestor_tag: ancestor_tag.clone(),
                    });
                }
            }
        }

        out.attributes.push(AttributeSite {
            element_name: tag_name.clone(),
            is_custom_element: is_custom,
            attribute: occurrence.clone(),
        });
        if is_custom {
            element_match.attributes.insert(occurrence.name.clone(), occurrence);
        }
    }

    if is_custom {
        out.elements.push(element_match);
        ancestors.push(tag_name);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.id() == start_tag.id() {
            continue;
        }
        walk(child, source, ancestors, out);
    }

    if is_custom {
        ancestors.pop();
    }
}

fn walk_script_element(node: Node<'_>, source: &[u8], out: &mut HtmlExtraction) {
    let Some(start_tag) = find_child(node, "start_tag") else {
        return;
    };

    let mut is_module = false;
    let mut is_importmap = false;
    let mut src = None;
    let mut attr_cursor = start_tag.walk();
    for attr_node in start_tag.children(&mut attr_cursor) {
        if attr_node.kind() != "attribute" {
            continue;
        }
        let Some(occ) = attribute_occurrence(attr_node, source) else {
            continue;
        };
        match occ.name.as_str() {
            "type" => match occ.value.as_deref() {
                Some("module") => is_module = true,
                Some("importmap") => is_importmap = true,
                _ => {}
            },
            "src" => src = occ.value.clone(),
            _ => {}
        }
    }

    let body_text = find_child(node, "raw_text")
        .and_then(|n| n.utf8_text(source).ok())
        .unwrap_or_default()
        .to_owned();

    if is_importmap {
        out.importmap_bodies.push(body_text);
        return;
    }

    let body = match src {
        Some(src) => ScriptBody::External { src },
        None => ScriptBody::Inline(body_text),
    };
    out.scripts.push(ScriptTag::new(is_module, body));
}

fn attribute_occurrence(attr_node: Node<'_>, source: &[u8]) -> Option<AttributeOccurrence> {
    let name_node = find_child(attr_node, "attribute_name")?;
    let name = name_node.utf8_text(source).ok()?.to_owned();
    let range = node_range(name_node);

    let value_node = find_child(attr_node, "quoted_attribute_value")
        .and_then(|quoted| find_child(quoted, "attribute_value"))
        .or_else(|| find_child(attr_node, "attribute_value"));

    Some(match value_node {
        Some(value_node) => {
            let value = value_node.utf8_text(source).ok().unwrap_or_default().to_owned();
            AttributeOccurrence::with_value(name, value, range)
        }
        None => {
            if find_child(attr_node, "quoted_attribute_value").is_some() {
                AttributeOccurrence::with_value(name, String::new(), range)
            } else {
                AttributeOccurrence::bare(name, range)
            }
        }
    })
}

fn find_child<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).find(|c| c.kind() == kind)
}

fn node_range(node: Node<'_>) -> Range {
    let start = node.start_position();
    let end = node.end_position();
    Range::new(
        SourceLocation::new(start.row as u32 + 1, start.column as u32, node.start_byte() as u32),
        SourceLocation::new(end.row as u32 + 1, end.column as u32, node.end_byte() as u32),
    )
}
