//! Slot analyzer.
//!
//! Grounded on the same pure-classification shape as the other three
//! analyzers in this module, consuming [`cem_parser::html::SlotSite`]'s
//! pre-computed nearest dashed ancestor instead of re-walking the tree.

use cem_core::{AutofixData, Diagnostic, Severity};

use crate::document::Document;
use crate::registry::RegistrySnapshot;
use crate::suggest::{format_candidate_list, nearest_match};

/// Runs the slot analyzer over every `slot="..."` occurrence in
/// `document`.
#[must_use]
pub fn analyze(document: &Document, registry: &RegistrySnapshot) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for site in &document.slots {
        let Some(definition) = registry.definition(&site.ancestor_tag) else {
            continue;
        };
        if definition.slots.is_empty() {
            continue;
        }
        if definition.has_slot(&site.value) {
            continue;
        }

        let message_prefix = format!("Unknown slot '{}' for element '{}'", site.value, site.ancestor_tag);
        match nearest_match(&site.value, definition.slots.iter().map(String::as_str), 3) {
            Some((candidate, distance)) if distance <= 2 => {
                diagnostics.push(Diagnostic::with_autofix(
                    site.range,
                    Severity::Error,
                    format!("{message_prefix}. Did you mean '{candidate}'?"),
                    AutofixData::SlotSuggestion {
                        original: site.value.clone(),
                        suggestion: candidate.to_owned(),
                        range: site.range,
                    },
                ));
            }
            _ => {
                let list = format_candidate_list(&definition.slots, definition.slots.len());
                diagnostics.push(Diagnostic::new(
                    site.range,
                    Severity::Error,
                    format!("{message_prefix}. Available slots: {list}."),
                ));
            }
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentStore;
    use crate::manifest::ManifestPackage;
    use crate::registry::ManifestRegistry;
    use cem_parser::pool::ParserPool;
    use std::sync::Arc;

    fn registry_with(json: &str) -> Arc<RegistrySnapshot> {
        let package: ManifestPackage = serde_json::from_str(json).unwrap();
        ManifestRegistry::from_packages(vec![package]).snapshot()
    }

    fn doc(html: &str) -> Arc<Document> {
        let store = DocumentStore::new(Arc::new(ParserPool::new()));
        store.open("file:///index.html", html, 1)
    }

    fn manifest_with_slots() -> String {
        r#"{"modules":[{"path":"./x.js","declarations":[{"customElement":true,"tagName":"my-element","slots":[{"name":"header"},{"name":"footer"}]}]}]}"#
            .to_owned()
    }

    #[test]
    fn test_known_slot_emits_nothing() {
        let registry = registry_with(&manifest_with_slots());
        let document = doc(r#"<my-element><div slot="header"></div></my-element>"#);
        let diagnostics = analyze(&document, &registry);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_near_miss_slot_suggests_autofix() {
        let registry = registry_with(&manifest_with_slots());
        let document = doc(r#"<my-element><div slot="heade"></div></my-element>"#);
        let diagnostics = analyze(&document, &registry);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        match &diagnostics[0].data {
            Some(AutofixData::SlotSuggestion { suggestion, .. }) => assert_eq!(suggestion, "header"),
            other => panic!("expected SlotSuggestion, got {other:?}"),
        }
    }

    #[test]
    fn test_far_miss_slot_lists_available() {
        let registry = registry_with(&manifest_with_slots());
        let document = doc(r#"<my-element><div slot="totally-unrelated"></div></my-element>"#);
        let diagnostics = analyze(&document, &registry);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("Available slots"));
        assert!(diagnostics[0].data.is_none());
    }

    #[test]
    fn test_element_with_no_manifest_slots_is_skipped() {
        let registry = registry_with(
            r#"{"modules":[{"path":"./x.js","declarations":[{"customElement":true,"tagName":"my-element"}]}]}"#,
        );
        let document = doc(r#"<my-element><div slot="anything"></div></my-element>"#);
        let diagnostics = analyze(&document, &registry);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unregistered_ancestor_is_skipped() {
        let registry = registry_with("{}");
        let document = doc(r#"<my-element><div slot="anything"></div></my-element>"#);
        let diagnostics = analyze(&document, &registry);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_empty_slot_value_is_never_recorded() {
        let registry = registry_with(&manifest_with_slots());
        let document = doc(r#"<my-element><div slot=""></div></my-element>"#);
        let diagnostics = analyze(&document, &registry);
        assert!(diagnostics.is_empty());
    }
}
