//! Attribute name analyzer.
//!
//! Same pure-classification shape as [`crate::analyzers::tag`],
//! specialized to a three-way dispatch: skip global attributes outright,
//! suggest-or-warn on custom elements, and only ever suggest (never warn
//! "unknown") on standard elements.

use cem_core::{AutofixData, Diagnostic, Severity};

use crate::document::Document;
use crate::registry::RegistrySnapshot;
use crate::suggest::{global_attribute_names, is_global_attribute, nearest_match};

/// Runs the attribute name analyzer over every attribute occurrence in
/// `document`.
#[must_use]
pub fn analyze(document: &Document, registry: &RegistrySnapshot) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for site in &document.attributes {
        let name = site.attribute.name.as_str();
        if is_global_attribute(name) {
            continue;
        }

        if site.is_custom_element {
            diagnostics.extend(analyze_custom_element_attribute(site, registry));
        } else {
            diagnostics.extend(analyze_standard_element_attribute(site));
        }
    }

    diagnostics
}

fn analyze_custom_element_attribute(
    site: &cem_parser::html::AttributeSite,
    registry: &RegistrySnapshot,
) -> Option<Diagnostic> {
    let name = &site.attribute.name;
    let range = site.attribute.range;

    let Some(definition) = registry.definition(&site.element_name) else {
        return Some(Diagnostic::new(
            range,
            Severity::Warning,
            format!("Unknown attribute '{name}' for custom element '{}'", site.element_name),
        ));
    };

    if definition.attribute(name).is_some() {
        return None;
    }

    let known_names = definition.attributes.iter().map(|attr| attr.name.as_str());
    if let Some((candidate, _distance)) = nearest_match(name, known_names, 3) {
        return Some(Diagnostic::with_autofix(
            range,
            Severity::Warning,
            format!("Unknown attribute '{name}'. Did you mean '{candidate}'?"),
            AutofixData::AttributeSuggestion {
                original: name.clone(),
                suggestion: candidate.to_owned(),
                range,
            },
        ));
    }

    Some(Diagnostic::new(
        range,
        Severity::Warning,
        format!("Unknown attribute '{name}' for custom element '{}'", site.element_name),
    ))
}

fn analyze_standard_element_attribute(site: &cem_parser::html::AttributeSite) -> Option<Diagnostic> {
    let name = &site.attribute.name;
    let range = site.attribute.range;

    let (candidate, distance) = nearest_match(name, global_attribute_names(), 2)?;
    if distance == 0 {
        return None;
    }
    Some(Diagnostic::with_autofix(
        range,
        Severity::Warning,
        format!("Unknown attribute '{name}'. Did you mean '{candidate}'?"),
        AutofixData::AttributeSuggestion {
            original: name.clone(),
            suggestion: candidate.to_owned(),
            range,
        },
    ))
}
