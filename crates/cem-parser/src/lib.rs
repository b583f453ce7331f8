//! Tree-sitter parsing of HTML and TypeScript documents for the cem-lsp
//! diagnostics engine.
//!
//! This crate owns the parsing layer: a process-wide
//! [`pool::ParserPool`] of tree-sitter parsers, a [`queries`] cache of
//! compiled queries shared across documents, and the extraction functions
//! that turn a parsed tree into the structural facts the rest of the
//! workspace consumes:
//!
//! - [`html::extract`] - custom-element occurrences, attribute occurrences,
//!   slot occurrences, script tags, and importmap bodies from an HTML tree.
//! - [`imports::extract_imports`] - static and dynamic import specifiers
//!   from a TypeScript/TSX tree.
//! - [`exports::extract_reexports`] - re-export edges from a TypeScript/TSX
//!   tree, the data the module graph's re-export transitivity is built
//!   from.
//!
//! # Crate Dependencies
//!
//! ```text
//! cem-cli ──► cem-engine ──► cem-parser ──► cem-core
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod exports;
pub mod html;
pub mod imports;
pub mod pool;
pub mod queries;

pub use error::ParseError;
pub use exports::ReexportEdge;
pub use html::HtmlExtraction;
pub use pool::{Language, ParserPool};
