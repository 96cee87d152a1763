//! One-shot sync: digest, compare, push, record.

use std::path::Path;

use chrono::{DateTime, Utc};

use shipwright_core::types::SyncConfig;

use crate::digest::{tree_digest, ExcludeSet};
use crate::error::SyncError;
use crate::git::{self, PushOutcome};
use crate::state::{self, SyncState};

/// How much of the pipeline to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Digest, compare, commit, push, record.
    Commit,
    /// Digest and compare only; no git calls, no state writes.
    Check,
}

/// What a sync run decided or did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// Tree digest matches the recorded state; nothing ran.
    Unchanged,
    /// Check mode: a commit run would sync now.
    WouldSync,
    /// A commit was created and pushed.
    Pushed,
    /// git saw nothing to commit; the state record was refreshed.
    Clean,
}

/// Outcome of [`sync_once`].
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub digest: String,
    pub action: SyncAction,
}

/// Run one sync cycle against `root`.
///
/// The digest comparison comes first: a tree matching the recorded state
/// returns [`SyncAction::Unchanged`] without touching git, so repeated runs
/// of an unchanged tree push at most once.
pub fn sync_once(root: &Path, cfg: &SyncConfig, mode: SyncMode) -> Result<SyncReport, SyncError> {
    let excludes = ExcludeSet::new(&cfg.exclude)?;
    let digest = tree_digest(root, &excludes)?;

    let recorded = state::load_at(root)?;
    if recorded.as_ref().is_some_and(|s| s.digest == digest) {
        tracing::debug!("tree unchanged since last sync");
        return Ok(SyncReport {
            digest,
            action: SyncAction::Unchanged,
        });
    }

    if let SyncMode::Check = mode {
        return Ok(SyncReport {
            digest,
            action: SyncAction::WouldSync,
        });
    }

    git::ensure_repo(root, cfg)?;
    let outcome = git::commit_and_push(root, cfg)?;
    state::save_at(root, &SyncState::now(digest.clone()))?;

    let action = match outcome {
        PushOutcome::Pushed => SyncAction::Pushed,
        PushOutcome::Clean => SyncAction::Clean,
    };
    Ok(SyncReport { digest, action })
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Digest-vs-state snapshot for status display. Runs no git commands and
/// writes nothing.
#[derive(Debug, Clone)]
pub struct TreeStatus {
    pub current_digest: String,
    pub recorded: Option<SyncState>,
}

impl TreeStatus {
    /// True when a commit-mode sync would do work.
    pub fn is_dirty(&self) -> bool {
        match &self.recorded {
            Some(state) => state.digest != self.current_digest,
            None => true,
        }
    }
}

pub fn tree_status(root: &Path, cfg: &SyncConfig) -> Result<TreeStatus, SyncError> {
    let excludes = ExcludeSet::new(&cfg.exclude)?;
    Ok(TreeStatus {
        current_digest: tree_digest(root, &excludes)?,
        recorded: state::load_at(root)?,
    })
}

/// Compact duration formatting: `45s`, `12m`, `3h`, `2d`.
pub fn format_seconds(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{seconds}s");
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{minutes}m");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h");
    }
    format!("{}d", hours / 24)
}

/// Age of `dt` relative to now, clamped at zero.
pub fn format_datetime_age(dt: DateTime<Utc>) -> String {
    let seconds = (Utc::now() - dt).num_seconds().max(0) as u64;
    format_seconds(seconds)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
