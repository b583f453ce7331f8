//! Core types, errors, and utilities for the cem-lsp diagnostics engine.
//!
//! This crate provides the foundational, tree-sitter-independent types used
//! across the workspace for validating custom-element usage in HTML/
//! TypeScript documents against a corpus of Custom Elements Manifests.
//!
//! # Overview
//!
//! The cem-core crate is the foundation layer with no parsing or async
//! dependencies. It provides:
//!
//! - **Error types**: [`ConfigError`] for configuration and embedded-data errors
//! - **Configuration**: [`EngineConfig`]
//! - **Domain types**: [`Diagnostic`], [`AutofixData`], [`ElementDefinition`],
//!   [`CustomElementMatch`], [`AttributeOccurrence`], [`ScriptTag`], [`ImportMap`]
//! - **Filesystem abstraction**: [`fs::WorkspaceFs`] for module-graph source reads
//! - **Hash utilities**: [`FxHashMap`], [`FxHashSet`] (faster than std for string keys)
//!
//! # Crate Dependencies
//!
//! This crate is designed to be the base dependency for all other crates in
//! the workspace. It has minimal dependencies and no parsing or async
//! runtime requirements.
//!
//! ```text
//! cem-cli ──► cem-engine ──► cem-parser ──► cem-core
//! ```
//!
//! # Examples
//!
//! ## Building a diagnostic
//!
//! ```
//! use cem_core::{AutofixData, Diagnostic, Range, Severity};
//!
//! let range = Range::from_byte_offsets(10, 20);
//! let diagnostic = Diagnostic::with_autofix(
//!     range,
//!     Severity::Error,
//!     "Unknown custom element 'my-elment'. Did you mean 'my-element'?".to_owned(),
//!     AutofixData::TagSuggestion {
//!         original: "my-elment".to_owned(),
//!         suggestion: "my-element".to_owned(),
//!         range,
//!     },
//! );
//! assert_eq!(diagnostic.source, "cem-lsp");
//! ```
//!
//! ## Using Fast Hash Maps
//!
//! ```
//! use cem_core::{FxHashMap, fx_hash_map};
//!
//! let mut cache: FxHashMap<String, i32> = fx_hash_map();
//! cache.insert("key".to_owned(), 42);
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod fs;
pub mod hash;
pub mod types;

// Re-export configuration types
pub use config::EngineConfig;

// Re-export error types
pub use error::ConfigError;

// Re-export filesystem abstraction
pub use fs::{InMemoryWorkspaceFs, StdWorkspaceFs, WorkspaceFs};

// Re-export hash utilities
pub use hash::{
    fx_hash_map, fx_hash_map_with_capacity, fx_hash_set, fx_hash_set_with_capacity, FxBuildHasher,
    FxHashMap, FxHashSet,
};

// Re-export domain types
pub use types::{
    AttributeDefinition, AttributeOccurrence, AutofixData, CustomElementMatch, Diagnostic,
    ElementDefinition, ImportKind, ImportMap, ImportStatement, Range, ScriptBody, ScriptTag,
    Severity, SourceLocation, DIAGNOSTIC_SOURCE,
};
