//! Configuration for the diagnostics engine.
//!
//! The engine's own configuration surface is deliberately small: the pieces
//! of this crate that are genuinely tunable (parser pool sizing, suggestion
//! candidate limits, where to find the embedded attribute data on disk if
//! overridden). Loading this structure from a workspace configuration file
//! or CLI flags is out of scope; this module only defines its shape and
//! defaults, the way every other configuration surface in this workspace
//! is defined.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Configuration for the diagnostics engine.
///
/// # Examples
///
/// ```
/// use cem_core::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.levenshtein_max_candidates, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of parsers to pre-allocate per language when the parser pool
    /// is first constructed. The pool remains elastic beyond this.
    pub parser_pool_initial_capacity: usize,

    /// Edit-distance budget used when the analyzers list all candidates for
    /// a "did you mean" suggestion, capped to avoid unbounded message size.
    pub levenshtein_max_candidates: usize,

    /// Override path for the embedded MDN global-attribute data set.
    /// `None` uses the data compiled into the binary.
    pub embedded_attribute_data_path: Option<Utf8PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parser_pool_initial_capacity: 2,
            levenshtein_max_candidates: 3,
            embedded_attribute_data_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.parser_pool_initial_capacity, 2);
        assert_eq!(config.levenshtein_max_candidates, 3);
        assert!(config.embedded_attribute_data_path.is_none());
    }

    #[test]
    fn test_engine_config_serialization_round_trip() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_engine_config_deserialize_with_missing_fields() {
        let json = r#"{"parser_pool_initial_capacity": 8}"#;
        let config: EngineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.parser_pool_initial_capacity, 8);
        assert_eq!(config.levenshtein_max_candidates, 3);
    }
}
