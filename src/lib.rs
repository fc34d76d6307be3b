//! nt-pref-ls: a Language Server for N-Triples documents
//!
//! Shows the `skos:prefLabel` of an IRI wherever that IRI is written in the
//! same document.
//!
//! # Overview
//!
//! - **Hover**: the label and the full IRI under the cursor
//! - **Inlay hints**: the label rendered right after each labelled `<iri>`
//! - **Diagnostics**: a hint on IRIs used as subject or object without a label
//!
//! # Architecture
//!
//! - [`ntriples`]: statement parser, behind the [`ntriples::TripleParser`] trait
//! - [`scanner`]: line/column positions of every `<iri>` in the raw text
//! - [`index`]: merges both into a [`index::DocumentIndex`]
//! - [`resolve`]: cursor position to IRI
//! - [`hover`], [`diagnostics`], [`inlay_hints`]: editor features over an index
//! - [`session`]: one index per open document
//! - [`server`]: the `tower-lsp` backend
//!
//! # Usage
//!
//! ```ignore
//! use nt_pref_ls::index::build_index;
//! use nt_pref_ls::diagnostics::missing_labels;
//!
//! let index = build_index(&text)?;
//! for missing in missing_labels(&index) {
//!     println!("{}:{} {}", missing.line, missing.character, missing.message());
//! }
//! ```

// Document model
pub mod error;
pub mod index;
pub mod iri;
pub mod ntriples;
pub mod resolve;
pub mod scanner;
pub mod session;

// LSP feature modules
pub mod diagnostics;
pub mod hover;
pub mod inlay_hints;
pub mod server;

// Configuration and command line
pub mod cli;
pub mod config;

// Test utilities (only available in test builds)
#[cfg(test)]
pub mod test_utils;
