use super::Probe;

/// Facts collected from a git repository for the snapshot document.
///
/// Each field is probed independently; one command failing degrades that
/// field alone to "no data" without affecting the others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitFacts {
    /// Current branch name (`git branch --show-current`).
    pub branch: Probe<String>,
    /// Short hash of HEAD (`git rev-parse --short HEAD`).
    pub commit: Probe<String>,
    /// Working-tree summary (`git status --short`).
    pub status: Probe<String>,
    /// Per-file diff statistics (`git diff --stat`).
    pub diff_stat: Probe<String>,
    /// Last five one-line decorated log entries.
    pub recent_commits: Probe<String>,
}

impl GitFacts {
    /// Whether the working tree has uncommitted changes.
    ///
    /// Derived from the status probe: `git status --short` prints nothing
    /// for a clean tree, which the probe reports as `Absent`.
    pub fn has_changes(&self) -> bool {
        self.status.is_found()
    }
}

/// The lighter git view used by the session merger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitStatus {
    pub branch: Probe<String>,
    pub status: Probe<String>,
}

impl GitStatus {
    pub fn has_changes(&self) -> bool {
        self.status.is_found()
    }
}
