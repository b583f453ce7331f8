//! Domain types for the diagnostics engine.
//!
//! This module contains the core data-model types shared across the
//! workspace: documents' parsed occurrences, registry-owned element
//! definitions, diagnostics and their autofix payloads, and the import/
//! script metadata the resolver consumes.
//!
//! # Module Organization
//!
//! - [`diagnostic`] - Diagnostics and tagged autofix payloads
//! - [`element`] - Immutable, registry-owned element/attribute definitions
//! - [`location`] - Source locations and ranges
//! - [`occurrence`] - Parsed custom-element and attribute occurrences
//! - [`script`] - Script tags, import statements, and importmaps
//! - [`severity`] - Diagnostic severity levels
//!
//! # Re-exports
//!
//! All public types are re-exported at this module level and at the crate
//! root for convenience:
//!
//! ```
//! use cem_core::types::{Diagnostic, ElementDefinition, Severity};
//! use cem_core::{Diagnostic as _Diagnostic, ElementDefinition as _ElementDefinition};
//! ```

mod diagnostic;
mod element;
mod location;
mod occurrence;
mod script;
mod severity;

// Re-export all public types
pub use diagnostic::{AutofixData, Diagnostic, DIAGNOSTIC_SOURCE};
pub use element::{AttributeDefinition, ElementDefinition};
pub use location::{Range, SourceLocation};
pub use occurrence::{AttributeOccurrence, CustomElementMatch};
pub use script::{ImportKind, ImportMap, ImportStatement, ScriptBody, ScriptTag};
pub use severity::Severity;
