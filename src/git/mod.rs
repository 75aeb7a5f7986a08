//! Git facts collection via the git CLI.
//!
//! Repository presence is decided by `git rev-parse --git-dir`: a non-zero
//! exit means the directory is simply not under version control (`Absent`,
//! not an error), while a missing or timing-out git binary is reported as
//! `Failed`. Either way the caller omits the git section; the distinction
//! exists for logging and tests.

use std::path::Path;

use crate::exec;
use crate::models::{GitFacts, GitStatus, Probe};

/// Collect the full set of git facts for the snapshot document.
///
/// Each sub-probe degrades independently: a failing `git diff --stat` only
/// loses the diff summary, not the whole section.
pub async fn collect(dir: &Path) -> Probe<GitFacts> {
    match exec::run_git(dir, &["rev-parse", "--git-dir"]).await {
        Probe::Absent => Probe::Absent,
        Probe::Failed(reason) => Probe::Failed(reason),
        Probe::Found(_) => Probe::Found(GitFacts {
            branch: exec::run_git(dir, &["branch", "--show-current"]).await,
            commit: exec::run_git(dir, &["rev-parse", "--short", "HEAD"]).await,
            status: exec::run_git(dir, &["status", "--short"]).await,
            diff_stat: exec::run_git(dir, &["diff", "--stat"]).await,
            recent_commits: exec::run_git(dir, &["log", "--oneline", "--decorate", "-n", "5"]).await,
        }),
    }
}

/// Collect the lighter branch/status view used by the session merger.
pub async fn status(dir: &Path) -> Probe<GitStatus> {
    match exec::run_git(dir, &["rev-parse", "--git-dir"]).await {
        Probe::Absent => Probe::Absent,
        Probe::Failed(reason) => Probe::Failed(reason),
        Probe::Found(_) => Probe::Found(GitStatus {
            branch: exec::run_git(dir, &["branch", "--show-current"]).await,
            status: exec::run_git(dir, &["status", "--short"]).await,
        }),
    }
}
