//! Shared test utilities for nt-pref-ls.
//!
//! This module provides common helpers used across multiple test modules.
//! It is only compiled when running tests.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::index::{build_index, DocumentIndex, PREF_LABEL};

/// Build an index, failing the test on a parse error.
pub fn index_of(text: &str) -> DocumentIndex {
    build_index(text).expect("Failed to build index")
}

/// `<iri> skos:prefLabel "label" .`
pub fn label_line(iri: &str, label: &str) -> String {
    format!("<{iri}> <{PREF_LABEL}> \"{label}\" .")
}

/// Creates a temporary workspace root for testing settings files.
///
/// Returns a tuple of (TempDir, PathBuf). The TempDir handle must be kept
/// alive for the test duration.
///
/// A non-hidden subdirectory is used so the root never looks like a dotfile
/// directory on systems where temp paths start with `.`.
pub fn create_test_root_dir() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let root_dir = temp_dir.path().join("workspace");
    fs::create_dir(&root_dir).expect("Failed to create workspace subdirectory");
    (temp_dir, root_dir)
}
