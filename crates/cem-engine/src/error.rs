//! Error types for the cem-engine crate.
//!
//! Split into one enum per subsystem rather than one catch-all: a
//! [`RegistryError`] for manifest loading and a [`GraphError`] for
//! module-graph construction. Following this crate's "kinds, not types"
//! failure-isolation policy, every one of these is caught at its call
//! site and downgraded to a logged warning; none of them cross the
//! analyzer boundary - analyzers return plain `Vec<Diagnostic>`.

use camino::Utf8PathBuf;

/// Errors that can occur while loading a CEM manifest into the registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The manifest file could not be read from disk.
    #[error("failed to read manifest {path}: {source}")]
    Read {
        /// The manifest path that failed to read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest's top-level JSON could not be parsed.
    ///
    /// Unknown fields within an otherwise-valid manifest are tolerated;
    /// this variant is for JSON that fails to parse at all.
    #[error("failed to parse manifest {path}: {source}")]
    Parse {
        /// The manifest path that failed to parse.
        path: Utf8PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur while the module graph lazily builds a module.
///
/// A [`GraphError`] is always logged and downgraded to an unresolved-leaf
/// marker; the graph never exposes partial construction state past the
/// node that failed.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The module's source file could not be located through the
    /// workspace filesystem abstraction.
    #[error("module not found: {specifier}")]
    ModuleNotFound {
        /// The import specifier that could not be resolved to a file.
        specifier: String,
    },

    /// The module's source failed to parse.
    #[error("failed to parse module {path}: {source}")]
    Parse {
        /// The resolved module path.
        path: Utf8PathBuf,
        /// The underlying parse error.
        #[source]
        source: cem_parser::ParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_not_found_display() {
        let err = GraphError::ModuleNotFound {
            specifier: "./missing.js".to_owned(),
        };
        assert_eq!(err.to_string(), "module not found: ./missing.js");
    }

    #[test]
    fn test_parse_error_display_includes_path() {
        let err = GraphError::Parse {
            path: Utf8PathBuf::from("./my-tab.js"),
            source: cem_parser::ParseError::Parse,
        };
        assert!(err.to_string().contains("./my-tab.js"));
    }
}
