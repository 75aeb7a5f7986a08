//! Session handoff notes for AI-assisted development.
//!
//! `handoff` generates two Markdown status files for chat-based coding
//! assistant workflows:
//!
//! - [`snapshot`] writes `CONTEXT_STATE.md`, a snapshot of transient project
//!   state (git facts, project markers, recent file activity) taken before
//!   chat context is discarded.
//! - [`session`] refreshes `.claude/CONTINUE_WORK.md`, preserving the
//!   user-authored sections (current task, checklists, notes) while
//!   regenerating the session context.
//!
//! Every operation takes the target directory as an explicit parameter;
//! nothing in the library reads the ambient working directory.

pub mod error;
pub mod exec;
pub mod git;
pub mod models;
pub mod scan;
pub mod session;
pub mod snapshot;

pub use error::HandoffError;
