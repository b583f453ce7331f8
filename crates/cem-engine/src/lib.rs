//! Diagnostics engine for Custom Elements usage in HTML/TypeScript documents.
//!
//! This crate handles:
//!
//! - Document storage and incremental re-parsing (`document`)
//! - Manifest ingestion and lock-free snapshot reads (`registry`, `manifest`)
//! - Lazily-built, cycle-safe ES module import graphs (`graph`)
//! - Import reachability resolution (`resolver`)
//! - Fuzzy suggestion and embedded MDN global-attribute data (`suggest`)
//! - The four independent diagnostic analyzers (`analyzers`)
//! - Per-document diagnostics orchestration and publish cancellation (`publisher`)

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod analyzers;
pub mod document;
pub mod error;
pub mod graph;
pub mod manifest;
pub mod publisher;
pub mod registry;
pub mod resolver;
pub mod suggest;

pub use document::{Document, DocumentLanguage, DocumentStore};
pub use error::{GraphError, RegistryError};
pub use graph::{ModuleGraph, ModuleNode};
pub use manifest::{ManifestAttribute, ManifestDeclaration, ManifestModule, ManifestPackage, ManifestSlot, ManifestTypeRef};
pub use publisher::{DiagnosticsPublisher, PublishedDiagnostics};
pub use registry::{ManifestRegistry, RegistrySnapshot};
pub use resolver::{ImportResolver, ResolvedImports};
