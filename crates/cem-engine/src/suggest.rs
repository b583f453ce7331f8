//! Suggestion utilities: Levenshtein nearest-match, the embedded global
//! HTML attribute set, and attribute-value type reasoning.
//!
//! Uses an embedded-resource loading pattern: an `OnceLock`-backed static
//! parsed once from a compiled-in JSON blob, falling back to an empty set
//! on parse failure rather than failing the whole engine.

use std::sync::OnceLock;

use cem_core::{EngineConfig, FxHashSet};
use serde::Deserialize;

/// The global HTML attribute data compiled into the binary, used whenever
/// no override path is configured, and as the fallback if the override
/// file cannot be read or parsed.
const EMBEDDED_GLOBAL_ATTRIBUTES_JSON: &str = include_str!("data/global_attributes.json");

static GLOBAL_ATTRIBUTES: OnceLock<FxHashSet<String>> = OnceLock::new();

#[derive(Deserialize)]
struct RawAttributeData {
    #[serde(default)]
    attributes: Vec<String>,
}

fn parse_global_attributes(json: &str) -> FxHashSet<String> {
    serde_json::from_str::<RawAttributeData>(json)
        .map(|raw| raw.attributes.into_iter().collect())
        .unwrap_or_default()
}

/// Loads the global attribute set per `config`: reads
/// `embedded_attribute_data_path` if set, falling back to the bundled
/// default on any read or parse failure, or on a missing or invalid
/// override file.
fn load_global_attributes(config: &EngineConfig) -> FxHashSet<String> {
    if let Some(path) = &config.embedded_attribute_data_path {
        if let Ok(contents) = std::fs::read_to_string(path) {
            return parse_global_attributes(&contents);
        }
    }
    parse_global_attributes(EMBEDDED_GLOBAL_ATTRIBUTES_JSON)
}

/// Initializes the global attribute set from `config`. Idempotent: only
/// the first call (per process) has any effect, so it is safe to call
/// once up front (e.g. when constructing a [`crate::publisher::DiagnosticsPublisher`])
/// without coordinating with every analyzer call site.
pub fn init_global_attributes(config: &EngineConfig) {
    let _ = GLOBAL_ATTRIBUTES.get_or_init(|| load_global_attributes(config));
}

/// The embedded set of MDN global attribute names, parsed once. If
/// [`init_global_attributes`] was never called, falls back to parsing the
/// bundled default on first access.
fn global_attributes() -> &'static FxHashSet<String> {
    GLOBAL_ATTRIBUTES.get_or_init(|| parse_global_attributes(EMBEDDED_GLOBAL_ATTRIBUTES_JSON))
}

/// Returns whether `name` is a global HTML attribute: a member of the
/// embedded MDN set, or matching one of the three structural rules
/// `data-*`, `aria-*`, or `on*` of length at least 3.
#[must_use]
pub fn is_global_attribute(name: &str) -> bool {
    name.starts_with("data-")
        || name.starts_with("aria-")
        || (name.starts_with("on") && name.len() >= 3)
        || global_attributes().contains(name)
}

/// The embedded set of MDN global attribute names, for near-miss
/// suggestion against attributes on standard HTML elements. The `data-*`/`aria-*`/`on*` structural rules are not
/// enumerable members and are intentionally excluded from this iterator.
pub fn global_attribute_names() -> impl Iterator<Item = &'static str> {
    global_attributes().iter().map(String::as_str)
}

/// A case-insensitive Levenshtein nearest match among `candidates`, along
/// with its edit distance, restricted to matches within `max_distance`.
///
/// # Examples
///
/// ```
/// use cem_engine::suggest::nearest_match;
///
/// let candidates = ["my-button".to_owned(), "my-tab".to_owned()];
/// let found = nearest_match("my-buton", candidates.iter().map(String::as_str), 3);
/// assert_eq!(found, Some(("my-button", 1)));
/// ```
#[must_use]
pub fn nearest_match<'a>(
    target: &str,
    candidates: impl Iterator<Item = &'a str>,
    max_distance: usize,
) -> Option<(&'a str, usize)> {
    let target_lower = target.to_lowercase();
    candidates
        .map(|candidate| (candidate, strsim::levenshtein(&target_lower, &candidate.to_lowercase())))
        .filter(|(_, distance)| *distance <= max_distance)
        .min_by_key(|(_, distance)| *distance)
}

/// Formats a sorted, comma-separated candidate list, capping it at `max`
/// entries. Used for the tag analyzer's "listing all available tags"
/// message and the slot analyzer's "available slots" message, which
/// [`cem_core::EngineConfig::levenshtein_max_candidates`] bounds to avoid
/// an unbounded message for a very large manifest.
#[must_use]
pub fn format_candidate_list(candidates: &[String], max: usize) -> String {
    let mut sorted: Vec<&str> = candidates.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    join_quoted(&sorted, max)
}

/// Formats a comma-separated option list in declaration order (not sorted),
/// capping it at `max` entries. Used for the union type's "full option
/// list" message, whose options must read back in the order the manifest
/// declared them (e.g. `'small' | 'medium' | 'large'`), not alphabetically.
#[must_use]
pub fn format_option_list(options: &[String], max: usize) -> String {
    let as_str: Vec<&str> = options.iter().map(String::as_str).collect();
    join_quoted(&as_str, max)
}

fn join_quoted(items: &[&str], max: usize) -> String {
    let shown: Vec<String> = items.iter().take(max).map(|s| format!("'{s}'")).collect();
    match shown.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {last}", rest.join(", ")),
    }
}

/// One option parsed from a union type's declared text, e.g.
/// `"small"` out of `'small' | 'medium' | 'large'`.
#[must_use]
pub fn union_options(type_text: &str) -> Vec<String> {
    type_text
        .split('|')
        .map(|opt| opt.trim().trim_matches(|c| c == '\'' || c == '"').to_owned())
        .filter(|opt| !opt.is_empty())
        .collect()
}

/// The literal text inside a quoted-string type, e.g. `large` out of
/// `"'large'"`.
#[must_use]
pub fn literal_value(type_text: &str) -> Option<&str> {
    let trimmed = type_text.trim();
    if trimmed.len() >= 2
        && ((trimmed.starts_with('\'') && trimmed.ends_with('\'')) || (trimmed.starts_with('"') && trimmed.ends_with('"')))
    {
        Some(&trimmed[1..trimmed.len() - 1])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_attribute_structural_rules() {
        assert!(is_global_attribute("data-id"));
        assert!(is_global_attribute("aria-label"));
        assert!(is_global_attribute("onclick"));
        assert!(!is_global_attribute("on"));
        assert!(!is_global_attribute("size"));
    }

    #[test]
    fn test_global_attribute_embedded_set() {
        assert!(is_global_attribute("class"));
        assert!(is_global_attribute("tabindex"));
        assert!(!is_global_attribute("not-a-real-attribute"));
    }

    #[test]
    fn test_load_global_attributes_missing_override_falls_back_to_embedded() {
        let config = EngineConfig {
            embedded_attribute_data_path: Some(camino::Utf8PathBuf::from("/nonexistent/path/global_attributes.json")),
            ..EngineConfig::default()
        };
        let loaded = load_global_attributes(&config);
        assert!(loaded.contains("class"));
    }

    #[test]
    fn test_load_global_attributes_no_override_uses_embedded() {
        let loaded = load_global_attributes(&EngineConfig::default());
        assert!(loaded.contains("tabindex"));
    }

    #[test]
    fn test_nearest_match_within_budget() {
        let candidates = vec!["my-button".to_owned(), "my-tab".to_owned()];
        let found = nearest_match("my-buton", candidates.iter().map(String::as_str), 3);
        assert_eq!(found, Some(("my-button", 1)));
    }

    #[test]
    fn test_nearest_match_outside_budget_returns_none() {
        let candidates = vec!["completely-different".to_owned()];
        let found = nearest_match("my-buton", candidates.iter().map(String::as_str), 2);
        assert_eq!(found, None);
    }

    #[test]
    fn test_union_options_parses_and_trims() {
        let opts = union_options("'small' | 'medium' | 'large'");
        assert_eq!(opts, vec!["small".to_owned(), "medium".to_owned(), "large".to_owned()]);
    }

    #[test]
    fn test_literal_value_extraction() {
        assert_eq!(literal_value("'large'"), Some("large"));
        assert_eq!(literal_value("\"large\""), Some("large"));
        assert_eq!(literal_value("boolean"), None);
    }

    #[test]
    fn test_format_candidate_list() {
        let candidates = vec!["medium".to_owned(), "small".to_owned(), "large".to_owned()];
        assert_eq!(format_candidate_list(&candidates, 5), "'large', 'medium' or 'small'");
        assert_eq!(format_candidate_list(&[], 5), "");
    }
}
