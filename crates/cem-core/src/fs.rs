//! Workspace filesystem abstraction.
//!
//! The module graph (see the `cem-engine` crate) reads module source files
//! lazily while it resolves import specifiers. Reading through a trait
//! rather than calling [`std::fs`] directly lets module-graph tests
//! substitute an in-memory mapping of path to source text instead of
//! exposing raw filesystem state.

use camino::{Utf8Path, Utf8PathBuf};

/// A source of module text, keyed by workspace-relative or absolute path.
///
/// Implementations must be safe to call concurrently from multiple reader
/// tasks; they are never expected to observe writes to the same path within
/// a single diagnostics cycle.
pub trait WorkspaceFs: Send + Sync {
    /// Reads the full UTF-8 text of the module at `path`.
    ///
    /// Returns `None` if the path cannot be resolved to an existing file.
    /// Implementations should not panic on I/O errors; they should log and
    /// return `None`, matching the module graph's "unresolved leaf" failure
    /// model (see the module graph's build error handling).
    fn read_module(&self, path: &Utf8Path) -> Option<String>;
}

/// A [`WorkspaceFs`] backed by real filesystem access via [`std::fs`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StdWorkspaceFs;

impl WorkspaceFs for StdWorkspaceFs {
    fn read_module(&self, path: &Utf8Path) -> Option<String> {
        std::fs::read_to_string(path.as_std_path())
            .inspect_err(|err| tracing::debug!(%path, %err, "failed to read module source"))
            .ok()
    }
}

/// A [`WorkspaceFs`] backed by an in-memory map, for tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryWorkspaceFs {
    files: crate::hash::FxHashMap<Utf8PathBuf, String>,
}

impl InMemoryWorkspaceFs {
    /// Creates an empty in-memory filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the source text for `path`.
    pub fn insert(&mut self, path: impl Into<Utf8PathBuf>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Builder-style variant of [`Self::insert`].
    #[must_use]
    pub fn with_file(mut self, path: impl Into<Utf8PathBuf>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }
}

impl WorkspaceFs for InMemoryWorkspaceFs {
    fn read_module(&self, path: &Utf8Path) -> Option<String> {
        self.files.get(path).cloned()
    }
}
