//! Working-tree synchronization: content digests, sync state, and the git
//! plumbing that moves release trees to their remote.
//!
//! - [`digest`] — exclusion globs and the tree digest
//! - [`state`] — the `.shipwright/state.json` record
//! - [`git`] — subprocess wrapper around the `git` binary
//! - [`pipeline`] — one-shot sync and check mode
//! - [`mirror`] — history-free snapshot pushes
//! - [`error`] — [`SyncError`]

pub mod digest;
pub mod error;
pub mod git;
pub mod mirror;
pub mod pipeline;
pub mod state;

pub use digest::{included_files, tree_digest, ExcludeSet};
pub use error::SyncError;
pub use git::PushOutcome;
pub use mirror::{push_mirror, MirrorOutcome};
pub use pipeline::{sync_once, tree_status, SyncAction, SyncMode, SyncReport, TreeStatus};
pub use state::SyncState;
