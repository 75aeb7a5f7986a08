use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to the invoker.
///
/// Everything else (missing repo, unreadable index, failed git invocation)
/// degrades to an omitted section via [`crate::models::Probe`] and is never
/// returned as an error.
#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("failed to write {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
