//! Domain models for handoff.
//!
//! # Core Concepts
//!
//! - [`Probe`]: three-way outcome of probing the environment for one fact.
//!   Distinguishes expected absence (no repo, no index file) from unexpected
//!   failure (timeout, spawn error, malformed JSON).
//! - [`GitFacts`] / [`GitStatus`]: facts collected from the git CLI.
//! - [`ProjectFacts`] / [`IndexSummary`]: project markers and the optional
//!   `PROJECT_INDEX.json` summary.
//! - [`SessionSections`]: the user-authored regions carried over between
//!   session documents.

mod git;
mod probe;
mod project;
mod session;

pub use git::*;
pub use probe::*;
pub use project::*;
pub use session::*;
