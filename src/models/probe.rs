/// Outcome of probing the environment for a single fact.
///
/// `Absent` is an expected condition (not a git repo, no index file, command
/// printed nothing) and degrades silently to an omitted section. `Failed`
/// is an unexpected error (spawn failure, timeout, parse error); it also
/// degrades to an omitted section but is logged, and tests can assert on
/// the distinction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe<T> {
    Found(T),
    Absent,
    Failed(String),
}

impl<T> Probe<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Probe::Found(_))
    }

    /// The probed value, collapsing both `Absent` and `Failed` to `None`.
    pub fn found(self) -> Option<T> {
        match self {
            Probe::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Probe<&T> {
        match self {
            Probe::Found(value) => Probe::Found(value),
            Probe::Absent => Probe::Absent,
            Probe::Failed(reason) => Probe::Failed(reason.clone()),
        }
    }
}
