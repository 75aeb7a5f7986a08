/// User-authored regions carried over between session documents.
///
/// Parsed out of the previous `CONTINUE_WORK.md` before it is overwritten.
/// "Completed" and "Next Steps" hold only checklist lines (lines starting
/// with a `- [` marker); anything else found under those headers is
/// discarded. "Current Task" and "Notes" are free text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSections {
    pub current_task: String,
    pub completed: Vec<String>,
    pub next_steps: Vec<String>,
    pub notes: String,
}

impl SessionSections {
    pub fn is_empty(&self) -> bool {
        self.current_task.trim().is_empty()
            && self.completed.is_empty()
            && self.next_steps.is_empty()
            && self.notes.trim().is_empty()
    }
}
