//! Config error-message, atomic-write-safety, and control-directory tests.

use assert_fs::prelude::*;
use predicates::prelude::predicate;
use shipwright_core::{config, paths, ConfigError, ReleaseConfig};
use std::fs;

// ---------------------------------------------------------------------------
// 1. Load error messages
// ---------------------------------------------------------------------------

#[test]
fn load_missing_config_returns_defaults() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let cfg = config::load_from(root.path()).expect("load");
    assert_eq!(cfg, ReleaseConfig::default());
}

#[test]
fn load_corrupt_yaml_returns_parse_error_with_path() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    fs::write(
        root.path().join("shipwright.yaml"),
        b": : corrupt : yaml : !!!\n  - broken: [unclosed",
    )
    .expect("write");

    let err = config::load_from(root.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
    let msg = err.to_string();
    assert!(msg.contains("shipwright.yaml"), "must contain file path, got: {msg}");
    let source_msg = match &err {
        ConfigError::Parse { source, .. } => source.to_string(),
        _ => unreachable!(),
    };
    assert!(!source_msg.is_empty(), "serde_yaml must provide error context");
}

#[test]
fn load_wrong_type_yaml_returns_parse_error() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    fs::write(
        root.path().join("shipwright.yaml"),
        b"- this is a list, not a mapping\n",
    )
    .expect("write");

    let err = config::load_from(root.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
}

// ---------------------------------------------------------------------------
// 2. Atomic write safety
// ---------------------------------------------------------------------------

#[test]
fn save_cleans_up_tmp_file() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    config::save_to(root.path(), &ReleaseConfig::default()).expect("save");

    let tmp = config::config_path(root.path()).with_file_name("shipwright.yaml.tmp");
    assert!(!tmp.exists(), ".tmp must be removed after successful save");
}

#[test]
fn mid_write_crash_leaves_original_intact() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let mut cfg = ReleaseConfig::default();
    cfg.app.label = "Acme Meals".to_string();
    config::save_to(root.path(), &cfg).expect("save");

    let yaml_path = config::config_path(root.path());
    let original_bytes = fs::read(&yaml_path).expect("read original");

    // Simulate crash: .tmp written but process died before rename
    let tmp = yaml_path.with_file_name("shipwright.yaml.tmp");
    fs::write(&tmp, b"CRASH - INCOMPLETE WRITE").expect("write crash tmp");

    let current_bytes = fs::read(&yaml_path).expect("read after crash");
    assert_eq!(original_bytes, current_bytes, "original must be unchanged after crash");
    assert!(tmp.exists(), ".tmp orphan must exist (crash = no cleanup)");
}

// ---------------------------------------------------------------------------
// 3. Save integration
// ---------------------------------------------------------------------------

#[test]
fn save_writes_private_file_that_loads_back() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let mut cfg = ReleaseConfig::default();
    cfg.sync.remote_url = "git@github.com:acme/app-releases.git".to_string();
    cfg.app.version_code = 12;
    config::save_to(root.path(), &cfg).expect("save");

    root.child("shipwright.yaml").assert(predicate::path::exists());

    // Content must roundtrip through the public load path
    let loaded = config::load_from(root.path()).expect("load");
    assert_eq!(loaded.sync.remote_url, cfg.sync.remote_url);
    assert_eq!(loaded.app.version_code, 12);

    // Unix: mode 0600
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(config::config_path(root.path()))
            .expect("meta")
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(mode, 0o600, "expected 0600, got {mode:o}");
    }
}

#[test]
fn ensure_logs_dir_nests_under_control_dir() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let dir = paths::ensure_logs_dir(root.path()).expect("ensure");
    assert!(dir.ends_with(".shipwright/logs"));
    root.child(".shipwright/logs").assert(predicate::path::exists());
}
