//! Size-based rotation for the monitor cycle log.
//!
//! Rotates `monitor.log` when it exceeds 10 MiB, keeping at most 5
//! rotated copies:
//!   monitor.log → monitor.log.1 → monitor.log.2 → … → monitor.log.5

use std::fs;
use std::io;
use std::path::Path;

/// Maximum cycle log size before rotation (10 MiB).
pub const MAX_LOG_BYTES: u64 = 10 * 1024 * 1024;

/// Maximum number of rotated backup files to keep.
pub const MAX_ROTATED_FILES: usize = 5;

/// Rotate `log_path` if its size exceeds `max_bytes`.
///
/// Rotation sequence (oldest first):
///   `<name>.<max_files>` deleted
///   `<name>.<n>` → `<name>.<n+1>` for n = max_files-1 … 1
///   `<name>` → `<name>.1`
///   Create fresh empty `<name>`.
///
/// Returns `true` if rotation occurred, `false` if the file was under the
/// threshold or does not exist yet.
pub fn rotate_if_needed(log_path: &Path, max_bytes: u64, max_files: usize) -> io::Result<bool> {
    let size = match fs::metadata(log_path) {
        Ok(meta) => meta.len(),
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };

    if size < max_bytes {
        return Ok(false);
    }

    // Drop the oldest backup so the shift below never exceeds max_files.
    let oldest = numbered_path(log_path, max_files);
    if oldest.exists() {
        fs::remove_file(&oldest)?;
    }

    // Shift existing backups up by one, newest last.
    for n in (1..max_files).rev() {
        let src = numbered_path(log_path, n);
        let dst = numbered_path(log_path, n + 1);
        if src.exists() {
            fs::rename(&src, &dst)?;
        }
    }

    // Live log becomes .1, then a fresh empty file takes its place so the
    // monitor always has a writable path.
    fs::rename(log_path, numbered_path(log_path, 1))?;
    let _ = fs::OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(log_path)?;

    Ok(true)
}

/// Rotate the monitor cycle log under `root`.
///
/// Failures are logged as warnings; rotation never takes the monitor down.
pub fn rotate_monitor_log(root: &Path) {
    let log_path = shipwright_core::paths::monitor_log_path(root);
    match rotate_if_needed(&log_path, MAX_LOG_BYTES, MAX_ROTATED_FILES) {
        Ok(true) => tracing::info!(path = %log_path.display(), "cycle log rotated"),
        Ok(false) => {}
        Err(err) => {
            tracing::warn!(path = %log_path.display(), error = %err, "cycle log rotation failed")
        }
    }
}

/// Path of the `n`-th rotated copy of `base` (e.g. `monitor.log.2`).
fn numbered_path(base: &Path, n: usize) -> std::path::PathBuf {
    let name = base
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("monitor.log");
    base.with_file_name(format!("{name}.{n}"))
}

// ─── Tests ────────────────────────────────────────────────────────────────────
