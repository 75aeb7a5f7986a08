//! Session merger: refreshes `.claude/CONTINUE_WORK.md`.
//!
//! Preserves the user-authored regions of the previous document (current
//! task, completed/next-steps checklists, notes) and regenerates the
//! session context (timestamp, uncommitted changes, recently modified
//! files). Only runs when a `.claude` directory exists in the target
//! directory; otherwise the filesystem is left untouched.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Local};

use crate::error::HandoffError;
use crate::models::{GitStatus, Probe, SessionSections};
use crate::snapshot::TIMESTAMP_FORMAT;
use crate::{git, scan};

/// Marker directory that gates the merger.
pub const SESSION_DIR: &str = ".claude";

/// Session document filename, inside [`SESSION_DIR`].
pub const SESSION_FILE: &str = "CONTINUE_WORK.md";

/// Lookback window for the recently-modified-files section.
pub const RECENT_WINDOW: Duration = Duration::from_secs(60 * 60);

/// Cap on the recently-modified-files listing.
pub const RECENT_LIMIT: usize = 10;

/// Cap on the uncommitted-changes text embedded in the document.
pub const STATUS_TRUNCATE_CHARS: usize = 500;

const TASK_PLACEHOLDER: &str = "_Add your current task here..._";
const COMPLETED_PLACEHOLDER: &str = "- [ ] _Tasks will appear here..._";
const NEXT_STEPS_PLACEHOLDER: &str = "- [ ] _Next steps will appear here..._";
const NOTES_PLACEHOLDER: &str = "_Add session notes here..._";

/// Result of a merger run.
#[derive(Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The document was written to the given path.
    Updated(PathBuf),
    /// No `.claude` directory: nothing read, nothing written.
    Skipped,
}

/// Auto-generated context appended to every merged document.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub git: Probe<GitStatus>,
    pub recent_files: Vec<String>,
}

/// Extract the user-authored sections from a previous session document.
///
/// Line-oriented scan: `##` headers switch the active section; under
/// "Completed" and "Next Steps" only checklist lines (starting with `- [`)
/// are kept, under "Current Task" and "Notes" non-blank non-header lines
/// accumulate as free text.
pub fn parse_sections(text: &str) -> SessionSections {
    enum Section {
        None,
        CurrentTask,
        Completed,
        NextSteps,
        Notes,
    }

    let mut sections = SessionSections::default();
    let mut current = Section::None;

    for line in text.lines() {
        if line.starts_with("## Current Task") {
            current = Section::CurrentTask;
        } else if line.starts_with("## Completed") {
            current = Section::Completed;
        } else if line.starts_with("## Next Steps") {
            current = Section::NextSteps;
        } else if line.starts_with("## Notes") {
            current = Section::Notes;
        } else if line.starts_with('#') || line.trim() == "---" {
            // Headers and thematic breaks both end the current section;
            // otherwise the document footer would accrete into Notes on
            // every merge.
            current = Section::None;
        } else if !line.trim().is_empty() {
            let trimmed = line.trim();
            match current {
                Section::Completed if trimmed.starts_with("- [") => {
                    sections.completed.push(trimmed.to_string());
                }
                Section::NextSteps if trimmed.starts_with("- [") => {
                    sections.next_steps.push(trimmed.to_string());
                }
                Section::CurrentTask => {
                    sections.current_task.push_str(line);
                    sections.current_task.push('\n');
                }
                Section::Notes => {
                    sections.notes.push_str(line);
                    sections.notes.push('\n');
                }
                _ => {}
            }
        }
    }

    sections
}

/// Read and parse the previous session document, if any.
///
/// Any read failure yields "no prior content" rather than an error.
pub fn load_previous(path: &Path) -> Option<SessionSections> {
    let text = std::fs::read_to_string(path).ok()?;
    Some(parse_sections(&text))
}

/// Truncate to a character count, never splitting a code point.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Render the merged session document.
pub fn render(
    prior: Option<&SessionSections>,
    ctx: &SessionContext,
    now: DateTime<Local>,
) -> String {
    let timestamp = now.format(TIMESTAMP_FORMAT);

    let mut doc = format!("# Continue Work\n\n**Last Updated**: {timestamp}\n\n## Current Task\n\n");

    match prior.map(|p| p.current_task.trim()).filter(|t| !t.is_empty()) {
        Some(task) => {
            doc.push_str(task);
            doc.push('\n');
        }
        None => {
            doc.push_str(TASK_PLACEHOLDER);
            doc.push('\n');
        }
    }

    doc.push_str("\n## Completed\n\n");
    render_checklist(
        &mut doc,
        prior.map(|p| p.completed.as_slice()).unwrap_or_default(),
        COMPLETED_PLACEHOLDER,
    );

    doc.push_str("\n## Next Steps\n\n");
    render_checklist(
        &mut doc,
        prior.map(|p| p.next_steps.as_slice()).unwrap_or_default(),
        NEXT_STEPS_PLACEHOLDER,
    );

    let _ = write!(doc, "\n## Session Context\n\n**Session Ended**: {timestamp}\n\n");

    if let Probe::Found(git) = &ctx.git {
        if let Probe::Found(branch) = &git.branch {
            let _ = write!(doc, "**Branch**: {}\n\n", branch);
        }
        if let Probe::Found(status) = &git.status {
            let _ = write!(
                doc,
                "**⚠️ Uncommitted Changes**:\n```\n{}\n```\n\n",
                truncate_chars(status, STATUS_TRUNCATE_CHARS),
            );
        }
    }

    if !ctx.recent_files.is_empty() {
        doc.push_str("**Recently Modified Files** (last hour):\n");
        for file in &ctx.recent_files {
            let _ = writeln!(doc, "- `{}`", file);
        }
        doc.push('\n');
    }

    doc.push_str("\n## Notes\n\n");
    match prior.map(|p| p.notes.trim()).filter(|n| !n.is_empty()) {
        Some(notes) => {
            doc.push_str(notes);
            doc.push('\n');
        }
        None => {
            doc.push_str(NOTES_PLACEHOLDER);
            doc.push('\n');
        }
    }

    let _ = write!(
        doc,
        "\n---\n\n\
         ### Session Recovery\n\n\
         To resume work:\n\
         1. Read `CONTEXT_STATE.md` for full project state\n\
         2. Review uncommitted changes: `git status && git diff`\n\
         3. Check `PROJECT_INDEX.json` for architectural context\n\n\
         ---\n\
         *Auto-updated by `handoff session` - {timestamp}*\n",
    );

    doc
}

fn render_checklist(doc: &mut String, items: &[String], placeholder: &str) {
    if items.is_empty() {
        doc.push_str(placeholder);
        doc.push('\n');
    } else {
        for item in items {
            doc.push_str(item);
            doc.push('\n');
        }
    }
}

/// Merge and rewrite the session document in `dir`.
///
/// Returns [`SessionOutcome::Skipped`] when `dir` has no `.claude`
/// directory. The only error surfaced is a failed write.
pub async fn update(dir: &Path) -> Result<SessionOutcome, HandoffError> {
    let session_dir = dir.join(SESSION_DIR);
    if !session_dir.is_dir() {
        tracing::debug!("no {} directory in {}, skipping", SESSION_DIR, dir.display());
        return Ok(SessionOutcome::Skipped);
    }

    let path = session_dir.join(SESSION_FILE);
    let prior = load_previous(&path);

    let git = git::status(dir).await;
    if let Probe::Failed(reason) = &git {
        tracing::warn!("git probe failed: {}", reason);
    }

    let ctx = SessionContext {
        git,
        recent_files: scan::recent_files(dir, RECENT_WINDOW, RECENT_LIMIT, &[]),
    };

    let doc = render(prior.as_ref(), &ctx, Local::now());
    std::fs::write(&path, doc).map_err(|source| HandoffError::Write {
        path: path.clone(),
        source,
    })?;

    tracing::info!("updated session document at {}", path.display());
    Ok(SessionOutcome::Updated(path))
}
