//! Sync state — the last synced digest and when it was pushed.
//!
//! Stored at `<root>/.shipwright/state.json` and used purely to decide
//! whether a sync needs to run. Missing or unreadable files load as `None`
//! ("never synced"); the next successful sync rewrites them.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shipwright_core::paths;

use crate::error::{io_err, SyncError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncState {
    pub digest: String,
    pub synced_at: DateTime<Utc>,
}

impl SyncState {
    /// A record for `digest` stamped with the current time.
    pub fn now(digest: impl Into<String>) -> Self {
        SyncState {
            digest: digest.into(),
            synced_at: Utc::now(),
        }
    }
}

/// Load the state record, or `None` when absent or unreadable.
pub fn load_at(root: &Path) -> Result<Option<SyncState>, SyncError> {
    let path = paths::state_path(root);
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    match serde_json::from_str(&contents) {
        Ok(state) => Ok(Some(state)),
        Err(e) => {
            tracing::warn!(
                "unreadable state file {}: {e}; treating as never synced",
                path.display()
            );
            Ok(None)
        }
    }
}

/// Atomically save the state record.
///
/// Write flow: serialize → `.tmp` sibling → `chmod 0600` → `rename`.
pub fn save_at(root: &Path, state: &SyncState) -> Result<(), SyncError> {
    paths::ensure_control_dir(root)?;
    let path = paths::state_path(root);
    let tmp = path.with_file_name(format!("{}.tmp", paths::STATE_FILE));

    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(&tmp, json).map_err(|e| io_err(&tmp, e))?;
    set_file_permissions(&tmp)?;
    std::fs::rename(&tmp, &path).map_err(|e| io_err(&path, e))?;
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), SyncError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|e| io_err(path, e))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), SyncError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_state_loads_as_none() {
        let root = TempDir::new().expect("tempdir");
        assert_eq!(load_at(root.path()).expect("load"), None);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let root = TempDir::new().expect("tempdir");
        let state = SyncState::now("abc123");
        save_at(root.path(), &state).expect("save");

        let loaded = load_at(root.path()).expect("load").expect("present");
        assert_eq!(loaded, state);
    }

    #[test]
    fn corrupt_state_is_treated_as_never_synced() {
        let root = TempDir::new().expect("tempdir");
        paths::ensure_control_dir(root.path()).expect("control dir");
        std::fs::write(paths::state_path(root.path()), "{not json").expect("write");

        assert_eq!(load_at(root.path()).expect("load"), None);
    }

    #[test]
    fn save_overwrites_previous_record() {
        let root = TempDir::new().expect("tempdir");
        save_at(root.path(), &SyncState::now("first")).expect("save");
        save_at(root.path(), &SyncState::now("second")).expect("save");

        let loaded = load_at(root.path()).expect("load").expect("present");
        assert_eq!(loaded.digest, "second");
    }

    #[test]
    fn atomic_write_cleans_up_tmp() {
        let root = TempDir::new().expect("tempdir");
        save_at(root.path(), &SyncState::now("abc")).expect("save");
        let tmp = paths::state_path(root.path()).with_file_name("state.json.tmp");
        assert!(!tmp.exists(), ".tmp must be gone after successful save");
    }
}
