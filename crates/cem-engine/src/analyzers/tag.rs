//! Tag name analyzer.
//!
//! One classification per occurrence: a tag is exactly one of unknown,
//! typo-suggested, or locally-defined, never more than one outcome per
//! tag, so at most one tag-analyzer diagnostic is ever emitted for a
//! given tag per cycle.

use cem_core::{AutofixData, Diagnostic, EngineConfig, Severity};

use crate::document::Document;
use crate::registry::RegistrySnapshot;
use crate::resolver::ResolvedImports;
use crate::suggest::{format_candidate_list, nearest_match};

const KNOWN_EXTENSIONS: &[&str] = &["ts", "js", "tsx", "jsx"];

/// Strips a trailing known script extension and any leading path
/// separators, keeping only the basename, so that `file:///src/button.ts`
/// and `./button.js` compare equal modulo extension.
fn basename_without_extension(path: &str) -> &str {
    let basename = path.rsplit('/').next().unwrap_or(path);
    for ext in KNOWN_EXTENSIONS {
        if let Some(stripped) = basename.strip_suffix(&format!(".{ext}")) {
            return stripped;
        }
    }
    basename
}

/// Returns whether the element's defining module is the document itself,
/// modulo extension.
fn is_locally_defined(document_uri: &str, module_path: &str) -> bool {
    basename_without_extension(document_uri) == basename_without_extension(module_path)
}

/// Runs the tag name analyzer over `document`'s custom-element
/// occurrences.
#[must_use]
pub fn analyze(document: &Document, registry: &RegistrySnapshot, resolved: &ResolvedImports, config: &EngineConfig) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for element in &document.elements {
        let tag = element.tag_name.as_str();

        if !registry.contains_tag(tag) {
            diagnostics.push(unknown_tag_diagnostic(tag, element.range, registry, config));
            continue;
        }

        if resolved.contains(tag) {
            continue;
        }

        let Some(definition) = registry.definition(tag) else {
            continue;
        };
        if is_locally_defined(&document.uri, &definition.module_path) {
            continue;
        }

        let import_path = definition.import_hint();
        let message = format!("Custom element '{tag}' is not imported. Add import from '{import_path}'");
        diagnostics.push(Diagnostic::with_autofix(
            element.range,
            Severity::Error,
            message,
            AutofixData::MissingImport {
                original: tag.to_owned(),
                suggestion: format!("import '{import_path}';"),
                range: element.range,
                import_path,
                tag_name: tag.to_owned(),
            },
        ));
    }

    diagnostics
}

fn unknown_tag_diagnostic(
    tag: &str,
    range: cem_core::Range,
    registry: &RegistrySnapshot,
    config: &EngineConfig,
) -> Diagnostic {
    if registry.is_empty() {
        return Diagnostic::new(
            range,
            Severity::Error,
            format!("Unknown custom element '{tag}'. No custom elements found in manifest."),
        );
    }

    if let Some((candidate, distance)) = nearest_match(tag, registry.all_tag_names().iter().map(String::as_str), 3) {
        if distance <= 2 {
            return Diagnostic::with_autofix(
                range,
                Severity::Error,
                format!("Unknown custom element '{tag}'. Did you mean '{candidate}'?"),
                AutofixData::TagSuggestion {
                    original: tag.to_owned(),
                    suggestion: candidate.to_owned(),
                    range,
                },
            );
        }
    }

    if registry.all_tag_names().len() <= 5 {
        let list = format_candidate_list(registry.all_tag_names(), config.levenshtein_max_candidates.max(5));
        return Diagnostic::new(
            range,
            Severity::Error,
            format!("Unknown custom element '{tag}'. Available elements: {list}."),
        );
    }

    Diagnostic::new(
        range,
        Severity::Error,
        format!("Unknown custom element '{tag}'. Check available elements in the workspace manifest."),
    )
}
