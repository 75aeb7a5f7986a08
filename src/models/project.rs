use std::path::PathBuf;

use super::Probe;

/// Project-level facts gathered for the snapshot document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFacts {
    /// The target directory the facts were gathered from.
    pub root: PathBuf,
    /// Project name, taken from the directory basename.
    pub name: String,
    /// Marker files from the allow-list that exist in the directory.
    pub markers: Vec<String>,
    /// Summary of `PROJECT_INDEX.json`, when present and parseable.
    pub index: Probe<IndexSummary>,
}

/// Summary extracted from a `PROJECT_INDEX.json` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSummary {
    /// Number of entries in the index's `files` array.
    pub total_files: usize,
    /// The `metadata.updated` field, or `"unknown"` when missing.
    pub updated: String,
}
