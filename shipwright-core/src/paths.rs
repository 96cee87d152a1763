//! Locations under the `.shipwright/` control directory.
//!
//! Everything shipwright persists besides the config file lives here:
//!
//! ```text
//! <root>/.shipwright/
//!   state.json        (last synced digest + timestamp)
//!   logs/
//!     monitor.log     (one line per state-changing watch cycle, rotated)
//! ```

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const CONTROL_DIR: &str = ".shipwright";
pub const STATE_FILE: &str = "state.json";
pub const LOGS_DIR: &str = "logs";
pub const MONITOR_LOG_FILE: &str = "monitor.log";

/// `<root>/.shipwright/` — pure, no I/O.
pub fn control_dir(root: &Path) -> PathBuf {
    root.join(CONTROL_DIR)
}

/// `<root>/.shipwright/state.json` — pure, no I/O.
pub fn state_path(root: &Path) -> PathBuf {
    control_dir(root).join(STATE_FILE)
}

/// `<root>/.shipwright/logs/` — pure, no I/O.
pub fn logs_dir(root: &Path) -> PathBuf {
    control_dir(root).join(LOGS_DIR)
}

/// `<root>/.shipwright/logs/monitor.log` — pure, no I/O.
pub fn monitor_log_path(root: &Path) -> PathBuf {
    logs_dir(root).join(MONITOR_LOG_FILE)
}

/// Creates `<root>/.shipwright/` (mode `0700`) if it does not yet exist.
pub fn ensure_control_dir(root: &Path) -> Result<PathBuf, ConfigError> {
    let dir = control_dir(root);
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
        set_dir_permissions(&dir)?;
    }
    Ok(dir)
}

/// Creates `<root>/.shipwright/logs/` (and the control dir above it).
pub fn ensure_logs_dir(root: &Path) -> Result<PathBuf, ConfigError> {
    ensure_control_dir(root)?;
    let dir = logs_dir(root);
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
        set_dir_permissions(&dir)?;
    }
    Ok(dir)
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), ConfigError> {
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
    fn paths_nest_under_control_dir() {
        let root = Path::new("/work/app");
        assert_eq!(state_path(root), root.join(".shipwright/state.json"));
        assert_eq!(
            monitor_log_path(root),
            root.join(".shipwright/logs/monitor.log")
        );
    }

    #[test]
    fn ensure_control_dir_is_idempotent() {
        let root = TempDir::new().expect("tempdir");
        let first = ensure_control_dir(root.path()).expect("create");
        let second = ensure_control_dir(root.path()).expect("again");
        assert_eq!(first, second);
        assert!(first.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn control_dir_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let root = TempDir::new().expect("tempdir");
        let dir = ensure_logs_dir(root.path()).expect("create");
        for d in [dir.as_path(), &control_dir(root.path())] {
            let mode = std::fs::metadata(d).unwrap().permissions().mode() & 0o777;
            assert_eq!(mode, 0o700);
        }
    }
}
