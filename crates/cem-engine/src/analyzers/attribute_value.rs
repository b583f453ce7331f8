//! Attribute value analyzer.
//!
//! Grounded on the same classification shape as [`crate::analyzers::tag`],
//! dispatching on an attribute's declared manifest type text: one input,
//! one outcome, no branch left unreachable.

use cem_core::{AttributeDefinition, AutofixData, Diagnostic, Severity};

use crate::document::Document;
use crate::registry::RegistrySnapshot;
use crate::suggest::{format_option_list, literal_value, nearest_match, union_options};

const MAX_UNION_CANDIDATES: usize = 10;

/// Runs the attribute value analyzer over every manifest-typed attribute
/// occurrence with a value in `document`.
#[must_use]
pub fn analyze(document: &Document, registry: &RegistrySnapshot) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for site in &document.attributes {
        if !site.is_custom_element {
            continue;
        }
        let Some(definition) = registry.definition(&site.element_name) else {
            continue;
        };
        let Some(attr) = definition.attribute(&site.attribute.name) else {
            continue;
        };
        if let Some(diagnostic) = analyze_one(&site.element_name, attr, &site.attribute) {
            diagnostics.push(diagnostic);
        }
    }

    diagnostics
}

fn analyze_one(element_name: &str, attr: &AttributeDefinition, occurrence: &cem_core::AttributeOccurrence) -> Option<Diagnostic> {
    let range = occurrence.range;
    let name = &occurrence.name;

    if attr.is_boolean() {
        return analyze_boolean(element_name, name, occurrence.value.as_deref(), range);
    }
    if attr.is_number() {
        return analyze_number(name, occurrence.value.as_deref(), range);
    }
    if attr.is_union() {
        let options = union_options(attr.type_text.as_deref().unwrap_or_default());
        return analyze_union(name, occurrence.value.as_deref(), &options, range);
    }
    if attr.is_literal() {
        let literal = literal_value(attr.type_text.as_deref().unwrap_or_default())?;
        return analyze_literal(name, occurrence.value.as_deref(), literal, range);
    }
    if attr.is_array() {
        return Some(Diagnostic::new(
            range,
            Severity::Information,
            "Array attributes support multiple formats (JSON, comma-separated, space-separated). Refer to component documentation.".to_owned(),
        ));
    }

    None
}

fn analyze_boolean(element_name: &str, name: &str, value: Option<&str>, range: cem_core::Range) -> Option<Diagnostic> {
    let value = value?;
    if value.is_empty() || value == name {
        return None;
    }
    match value {
        "false" => Some(Diagnostic::new(
            range,
            Severity::Warning,
            format!("Boolean attribute '{name}' with value 'false' is still true. Remove the attribute entirely to make it false."),
        )),
        "true" => Some(Diagnostic::new(
            range,
            Severity::Information,
            format!("Value \"true\" on attribute '{name}' is redundant. Use <{element_name} {name}> instead."),
        )),
        other => Some(Diagnostic::new(
            range,
            Severity::Information,
            format!("Boolean attribute '{name}' should not have value '{other}'. Use <{element_name} {name}> instead."),
        )),
    }
}

fn analyze_number(name: &str, value: Option<&str>, range: cem_core::Range) -> Option<Diagnostic> {
    let value = value.unwrap_or("");
    if value.is_empty() {
        return Some(Diagnostic::new(
            range,
            Severity::Error,
            format!("Attribute '{name}' requires a numeric value"),
        ));
    }
    if value.parse::<f64>().map(f64::is_finite).unwrap_or(false) {
        return None;
    }
    Some(Diagnostic::new(
        range,
        Severity::Error,
        format!("Expected number for attribute '{name}', got '{value}'"),
    ))
}

fn analyze_union(name: &str, value: Option<&str>, options: &[String], range: cem_core::Range) -> Option<Diagnostic> {
    let Some(value) = value else {
        return Some(Diagnostic::new(
            range,
            Severity::Error,
            format!("Union type attribute '{name}' requires a value"),
        ));
    };
    if options.iter().any(|opt| opt == value) {
        return None;
    }

    let list = format_option_list(options, MAX_UNION_CANDIDATES);
    let suggestion = nearest_match(value, options.iter().map(String::as_str), 2);
    match suggestion {
        Some((candidate, _distance)) => Some(Diagnostic::with_autofix(
            range,
            Severity::Error,
            format!("Expected one of: {list} for attribute '{name}', got '{value}'. Did you mean '{candidate}'?"),
            AutofixData::AttributeValueSuggestion {
                original: value.to_owned(),
                suggestion: candidate.to_owned(),
                range,
            },
        )),
        None => Some(Diagnostic::new(
            range,
            Severity::Error,
            format!("Expected one of: {list} for attribute '{name}', got '{value}'."),
        )),
    }
}

fn analyze_literal(name: &str, value: Option<&str>, literal: &str, range: cem_core::Range) -> Option<Diagnostic> {
    let value = value.unwrap_or("");
    if value == literal {
        return None;
    }
    if value.eq_ignore_ascii_case(literal) {
        return Some(Diagnostic::with_autofix(
            range,
            Severity::Error,
            format!("Invalid value '{value}' for attribute '{name}'. Expected '{literal}'."),
            AutofixData::AttributeValueSuggestion {
                original: value.to_owned(),
                suggestion: literal.to_owned(),
                range,
            },
        ));
    }
    Some(Diagnostic::new(
        range,
        Severity::Error,
        format!("Invalid value '{value}' for attribute '{name}'. Expected '{literal}'."),
    ))
}
