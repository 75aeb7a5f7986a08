//! Filesystem probing: project markers, the project index, and recently
//! modified files.

use std::path::Path;
use std::time::{Duration, SystemTime};

use serde::Deserialize;
use walkdir::{DirEntry, WalkDir};

use crate::models::{IndexSummary, Probe};

/// Marker filenames checked when describing the project's toolchain.
pub const PROJECT_MARKERS: &[&str] = &[
    "package.json",
    "requirements.txt",
    "Cargo.toml",
    "go.mod",
    "Makefile",
    "CMakeLists.txt",
    "pom.xml",
    "build.gradle",
    "setup.py",
    "pyproject.toml",
];

/// Project index filename probed in the target directory.
pub const PROJECT_INDEX_FILE: &str = "PROJECT_INDEX.json";

/// Directories excluded from the recent-files walk: version control,
/// dependency caches, bytecode caches, and the session state directory.
const SKIP_DIRS: &[&str] = &[".git", "node_modules", "__pycache__", ".claude", "target"];

/// Marker files from [`PROJECT_MARKERS`] that exist in `dir`, in allow-list
/// order.
pub fn detect_markers(dir: &Path) -> Vec<String> {
    PROJECT_MARKERS
        .iter()
        .filter(|name| dir.join(name).is_file())
        .map(|name| name.to_string())
        .collect()
}

#[derive(Debug, Deserialize)]
struct ProjectIndex {
    #[serde(default)]
    files: Vec<serde_json::Value>,
    #[serde(default)]
    metadata: IndexMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct IndexMetadata {
    updated: Option<String>,
}

/// Parse `PROJECT_INDEX.json` in `dir` into a summary.
///
/// A missing file is `Absent`; an unreadable file or malformed JSON is
/// `Failed` ("index unavailable") and never propagates.
pub fn read_index(dir: &Path) -> Probe<IndexSummary> {
    let path = dir.join(PROJECT_INDEX_FILE);
    if !path.is_file() {
        return Probe::Absent;
    }

    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => return Probe::Failed(format!("index unavailable: {}", e)),
    };

    match serde_json::from_str::<ProjectIndex>(&text) {
        Ok(index) => Probe::Found(IndexSummary {
            total_files: index.files.len(),
            updated: index
                .metadata
                .updated
                .unwrap_or_else(|| "unknown".to_string()),
        }),
        Err(e) => Probe::Failed(format!("index unavailable: {}", e)),
    }
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIP_DIRS.contains(&name))
}

/// Relative paths of regular files under `dir` modified within `window`.
///
/// Paths named in `exclude` (relative to `dir`) are dropped before the cap
/// is applied, so an excluded file never occupies a listing slot. Results
/// are sorted lexicographically before the cap, so the listing is
/// deterministic across runs regardless of traversal order. Unreadable
/// entries are skipped.
pub fn recent_files(dir: &Path, window: Duration, limit: usize, exclude: &[&str]) -> Vec<String> {
    let cutoff = SystemTime::now()
        .checked_sub(window)
        .unwrap_or(SystemTime::UNIX_EPOCH);

    let mut paths = Vec::new();
    let walker = WalkDir::new(dir).into_iter().filter_entry(|e| !is_skipped(e));
    for entry in walker.flatten() {
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(meta) = entry.metadata() else {
            continue;
        };
        let Ok(modified) = meta.modified() else {
            continue;
        };
        if modified < cutoff {
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(dir) {
            let rel = rel.to_string_lossy().into_owned();
            if exclude.contains(&rel.as_str()) {
                continue;
            }
            paths.push(rel);
        }
    }

    paths.sort();
    paths.truncate(limit);
    paths
}
