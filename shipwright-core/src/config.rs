//! `shipwright.yaml` persistence.
//!
//! # Storage layout
//!
//! ```text
//! <root>/
//!   shipwright.yaml   (project config — mode 0600)
//!   .shipwright/      (state + logs, see [`crate::paths`])
//! ```
//!
//! Loading a project without a config file yields [`ReleaseConfig::default`]
//! so read-only commands work before `shipwright init` has run.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::types::ReleaseConfig;

pub const CONFIG_FILE: &str = "shipwright.yaml";

/// `<root>/shipwright.yaml` — pure, no I/O.
pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Load the project config, or defaults when the file is absent.
///
/// Returns `ConfigError::Parse` (with path context) on malformed YAML.
pub fn load_from(root: &Path) -> Result<ReleaseConfig, ConfigError> {
    let path = config_path(root);
    if !path.exists() {
        return Ok(ReleaseConfig::default());
    }
    let contents = std::fs::read_to_string(&path)?;
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse { path, source: e })
}

/// Atomically save the project config.
///
/// Write flow: serialize → `.tmp` sibling → `chmod 0600` → `rename`.
/// The `.tmp` lives next to the target so the rename never crosses a
/// filesystem boundary.
pub fn save_to(root: &Path, config: &ReleaseConfig) -> Result<(), ConfigError> {
    let path = config_path(root);
    let tmp = path.with_file_name(format!("{CONFIG_FILE}.tmp"));

    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(&tmp, yaml)?;
    set_file_permissions(&tmp)?;
    std::fs::rename(&tmp, &path)?;
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_root() -> TempDir {
        TempDir::new().expect("tempdir")
    }

    #[test]
    fn missing_config_loads_as_default() {
        let root = make_root();
        let cfg = load_from(root.path()).expect("load");
        assert_eq!(cfg, ReleaseConfig::default());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let root = make_root();
        let mut cfg = ReleaseConfig::default();
        cfg.sync.remote_url = "git@example.com:acme/app.git".to_string();
        cfg.app.label = "Acme Meals".to_string();
        cfg.app.version_code = 7;

        save_to(root.path(), &cfg).expect("save");
        let loaded = load_from(root.path()).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let root = make_root();
        let yaml = "sync:\n  remote_url: git@example.com:acme/app.git\napp:\n  label: Acme\n";
        std::fs::write(config_path(root.path()), yaml).expect("write");

        let cfg = load_from(root.path()).expect("load");
        assert_eq!(cfg.sync.remote_url, "git@example.com:acme/app.git");
        assert_eq!(cfg.sync.branch, "main");
        assert_eq!(cfg.app.label, "Acme");
        assert_eq!(cfg.app.min_sdk, 24);
        assert_eq!(cfg.bundle, crate::types::PackagingConfig::default());
    }

    #[test]
    fn malformed_yaml_reports_path() {
        let root = make_root();
        std::fs::write(config_path(root.path()), "sync: [not-a-map").expect("write");

        let err = load_from(root.path()).unwrap_err();
        match err {
            ConfigError::Parse { path, .. } => {
                assert!(path.ends_with(CONFIG_FILE));
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn atomic_write_cleans_up_tmp() {
        let root = make_root();
        save_to(root.path(), &ReleaseConfig::default()).expect("save");
        let tmp = config_path(root.path()).with_file_name(format!("{CONFIG_FILE}.tmp"));
        assert!(!tmp.exists(), ".tmp must be gone after successful save");
    }

    #[cfg(unix)]
    #[test]
    fn config_file_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let root = make_root();
        save_to(root.path(), &ReleaseConfig::default()).expect("save");
        let mode = std::fs::metadata(config_path(root.path()))
            .unwrap()
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(mode, 0o600);
    }
}
