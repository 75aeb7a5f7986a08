//! Snapshot generator: writes `CONTEXT_STATE.md`.
//!
//! Captures transient project state (git facts, project markers, index
//! summary, recent file activity) into a fixed-template Markdown document,
//! fully replacing any previous snapshot. Sections whose data is absent are
//! omitted, never rendered empty.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Local};

use crate::error::HandoffError;
use crate::models::{GitFacts, Probe, ProjectFacts};
use crate::{git, scan};

/// Fixed output filename, written into the target directory.
pub const SNAPSHOT_FILE: &str = "CONTEXT_STATE.md";

/// Lookback window for the recent-file-activity section.
pub const RECENT_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

/// Cap on the recent-file-activity listing.
pub const RECENT_LIMIT: usize = 10;

/// Timestamp format used throughout both documents.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything the snapshot template renders from.
#[derive(Debug, Clone)]
pub struct SnapshotFacts {
    pub project: ProjectFacts,
    pub git: Probe<GitFacts>,
    pub recent_files: Vec<String>,
}

/// Gather all snapshot facts from `dir`.
///
/// Never fails: unexpected probe failures are logged and degrade to
/// omitted sections.
pub async fn gather(dir: &Path) -> SnapshotFacts {
    let git = git::collect(dir).await;
    if let Probe::Failed(reason) = &git {
        tracing::warn!("git probe failed: {}", reason);
    }

    let index = scan::read_index(dir);
    if let Probe::Failed(reason) = &index {
        tracing::warn!("project index probe failed: {}", reason);
    }

    // Canonicalize for display so `--dir .` still renders an absolute path
    // and a real project name.
    let root = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
    let name = root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string());

    // The snapshot itself does not count as activity and must not occupy a
    // cap slot; otherwise the first run would perturb the second run's
    // listing.
    let recent_files = scan::recent_files(dir, RECENT_WINDOW, RECENT_LIMIT, &[SNAPSHOT_FILE]);

    SnapshotFacts {
        project: ProjectFacts {
            root,
            name,
            markers: scan::detect_markers(dir),
            index,
        },
        git,
        recent_files,
    }
}

/// Render the snapshot document.
///
/// Pure function of the facts and timestamp: two renders over identical
/// facts differ only in the timestamp fields.
pub fn render(facts: &SnapshotFacts, now: DateTime<Local>) -> String {
    let timestamp = now.format(TIMESTAMP_FORMAT);

    let mut doc = format!(
        "# CONTEXT_STATE.md\n\n\
         **Auto-generated**: {timestamp}\n\
         **Purpose**: Captures project state before chat history compacting\n\n\
         ## Current Session State\n\n\
         ### Project Information\n\
         - **Working Directory**: `{}`\n\
         - **Project Name**: {}\n\n",
        facts.project.root.display(),
        facts.project.name,
    );

    if let Probe::Found(git) = &facts.git {
        render_git_section(&mut doc, git);
    }

    if !facts.project.markers.is_empty() {
        doc.push_str("### Project Structure\nDetected project files:\n");
        for marker in &facts.project.markers {
            let _ = writeln!(doc, "- `{}`", marker);
        }
        doc.push('\n');
    }

    if let Probe::Found(index) = &facts.project.index {
        let _ = write!(
            doc,
            "### Project Index\n\
             - **Status**: Available\n\
             - **Files Indexed**: {}\n\
             - **Last Updated**: {}\n\n\
             💡 Use `/index` to regenerate or `[query] -i` for index-aware queries.\n\n",
            index.total_files, index.updated,
        );
    }

    if !facts.recent_files.is_empty() {
        doc.push_str("### Recent File Activity\nFiles modified in the last 24 hours:\n");
        for file in &facts.recent_files {
            let _ = writeln!(doc, "- `{}`", file);
        }
        doc.push('\n');
    }

    let _ = write!(
        doc,
        "## How to Resume Work\n\n\
         1. **Review this document** to understand the current state\n\
         2. **Check git status** to see what was being worked on\n\
         3. **Read PROJECT_INDEX.json** (if available) for architectural context\n\
         4. **Reference .claude/CONTINUE_WORK.md** if it exists for specific tasks\n\n\
         ## Quick Commands\n\n\
         ```bash\n\
         # See current changes\n\
         git status\n\
         git diff\n\n\
         # Continue with context\n\
         \"Help me continue where we left off. Check CONTEXT_STATE.md for current state.\"\n\
         ```\n\n\
         ## Notes\n\n\
         - This file is auto-generated before chat compacting\n\
         - Update .claude/CONTINUE_WORK.md manually for specific task tracking\n\
         - Use PROJECT_INDEX.json for architectural awareness\n\n\
         ---\n\
         *Generated by `handoff snapshot` - {timestamp}*\n",
    );

    doc
}

fn render_git_section(doc: &mut String, git: &GitFacts) {
    let branch = git.branch.as_ref().found().map_or("N/A", |s| s.as_str());
    let commit = git.commit.as_ref().found().map_or("N/A", |s| s.as_str());
    let has_changes = if git.has_changes() { "Yes" } else { "No" };

    let _ = write!(
        doc,
        "### Git Status\n\
         - **Branch**: {branch}\n\
         - **Latest Commit**: {commit}\n\
         - **Has Uncommitted Changes**: {has_changes}\n\n",
    );

    if let Probe::Found(status) = &git.status {
        let _ = write!(doc, "#### Uncommitted Changes\n```\n{}\n```\n\n", status);
    }

    if let Probe::Found(diff_stat) = &git.diff_stat {
        let _ = write!(doc, "#### Diff Summary\n```\n{}\n```\n\n", diff_stat);
    }

    if let Probe::Found(log) = &git.recent_commits {
        let _ = write!(doc, "#### Recent Commits\n```\n{}\n```\n\n", log);
    }
}

/// Gather, render, and write the snapshot document into `dir`.
///
/// Returns the path written. The only error surfaced is a failed write.
pub async fn generate(dir: &Path) -> Result<PathBuf, HandoffError> {
    let facts = gather(dir).await;
    let doc = render(&facts, Local::now());

    let path = dir.join(SNAPSHOT_FILE);
    std::fs::write(&path, doc).map_err(|source| HandoffError::Write {
        path: path.clone(),
        source,
    })?;

    tracing::info!("wrote snapshot to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_facts() -> SnapshotFacts {
        SnapshotFacts {
            project: ProjectFacts {
                root: PathBuf::from("/work/demo"),
                name: "demo".to_string(),
                markers: vec![],
                index: Probe::Absent,
            },
            git: Probe::Absent,
            recent_files: vec![],
        }
    }

    fn clean_repo_facts() -> SnapshotFacts {
        let mut facts = bare_facts();
        facts.git = Probe::Found(GitFacts {
            branch: Probe::Found("main".to_string()),
            commit: Probe::Found("abc1234".to_string()),
            status: Probe::Absent,
            diff_stat: Probe::Absent,
            recent_commits: Probe::Found("abc1234 (HEAD -> main) initial".to_string()),
        });
        facts
    }

    #[test]
    fn test_no_repo_omits_git_section() {
        let doc = render(&bare_facts(), Local::now());
        assert!(!doc.contains("### Git Status"));
        assert!(!doc.contains("Uncommitted Changes"));
    }

    #[test]
    fn test_failed_git_probe_also_omits_git_section() {
        let mut facts = bare_facts();
        facts.git = Probe::Failed("git: command not found".to_string());

        let doc = render(&facts, Local::now());
        assert!(!doc.contains("### Git Status"));
    }

    #[test]
    fn test_clean_repo_renders_no_and_no_changes_block() {
        let doc = render(&clean_repo_facts(), Local::now());
        assert!(doc.contains("- **Has Uncommitted Changes**: No"));
        assert!(!doc.contains("#### Uncommitted Changes"));
        assert!(!doc.contains("#### Diff Summary"));
    }

    #[test]
    fn test_dirty_repo_renders_yes_and_fenced_status() {
        let mut facts = clean_repo_facts();
        if let Probe::Found(git) = &mut facts.git {
            git.status = Probe::Found(" M src/lib.rs".to_string());
        }

        let doc = render(&facts, Local::now());
        assert!(doc.contains("- **Has Uncommitted Changes**: Yes"));
        assert!(doc.contains("#### Uncommitted Changes\n```\n M src/lib.rs\n```"));
    }

    #[test]
    fn test_empty_sections_are_omitted_not_rendered_empty() {
        let doc = render(&bare_facts(), Local::now());
        assert!(!doc.contains("### Project Structure"));
        assert!(!doc.contains("### Project Index"));
        assert!(!doc.contains("### Recent File Activity"));
    }

    #[test]
    fn test_renders_markers_and_index_when_present() {
        let mut facts = bare_facts();
        facts.project.markers = vec!["Cargo.toml".to_string(), "Makefile".to_string()];
        facts.project.index = Probe::Found(crate::models::IndexSummary {
            total_files: 42,
            updated: "2026-08-01".to_string(),
        });

        let doc = render(&facts, Local::now());
        assert!(doc.contains("- `Cargo.toml`"));
        assert!(doc.contains("- **Files Indexed**: 42"));
        assert!(doc.contains("- **Last Updated**: 2026-08-01"));
    }

    #[test]
    fn test_renders_differ_only_in_timestamp_lines() {
        let facts = clean_repo_facts();
        let first = render(
            &facts,
            "2026-08-30T10:00:00"
                .parse::<chrono::NaiveDateTime>()
                .expect("datetime")
                .and_local_timezone(Local)
                .single()
                .expect("local time"),
        );
        let second = render(
            &facts,
            "2026-08-30T11:30:00"
                .parse::<chrono::NaiveDateTime>()
                .expect("datetime")
                .and_local_timezone(Local)
                .single()
                .expect("local time"),
        );

        let differing: Vec<(&str, &str)> = first
            .lines()
            .zip(second.lines())
            .filter(|(a, b)| a != b)
            .collect();
        assert!(!differing.is_empty());
        for (a, b) in differing {
            assert!(a.contains("2026-08-30 10:00:00"), "unexpected diff: {a}");
            assert!(b.contains("2026-08-30 11:30:00"), "unexpected diff: {b}");
        }
    }
}
