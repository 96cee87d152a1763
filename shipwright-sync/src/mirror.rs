//! History-free snapshot push.
//!
//! Publishes the current tree to the remote without carrying local git
//! history. Rejected pushes are retried once on the fallback branch.
//!
//! # Protocol
//!
//! 1. create a temporary directory (`shipwright-mirror-*`)
//! 2. `git init`, set the configured committer identity, add the remote
//! 3. copy every included file, preserving relative paths
//! 4. render `README.md` at the snapshot root
//! 5. `git add .` and commit
//! 6. force-push the configured branch, falling back once on rejection
//!
//! The temporary directory is removed when its guard drops, on success and
//! on every error path.

use std::path::Path;

use shipwright_core::types::ReleaseConfig;
use shipwright_render::{engine_for, DocKind, ReleaseContext};

use crate::digest::{included_files, ExcludeSet};
use crate::error::{io_err, SyncError};
use crate::git::{expect_ok, git_err, run_git};

/// What a mirror push did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorOutcome {
    /// Snapshot pushed: the branch that accepted it and its file count.
    Pushed { branch: String, files: usize },
    /// Nothing to commit in the snapshot (empty tree, empty README diff).
    Clean,
}

/// Push a snapshot of `root` to the configured remote.
pub fn push_mirror(root: &Path, cfg: &ReleaseConfig) -> Result<MirrorOutcome, SyncError> {
    if cfg.sync.remote_url.is_empty() {
        return Err(SyncError::RemoteMissing);
    }

    let staging = tempfile::Builder::new()
        .prefix("shipwright-mirror-")
        .tempdir()
        .map_err(|e| io_err(std::env::temp_dir(), e))?;
    let snapshot = staging.path();

    expect_ok("init", run_git(snapshot, &["init"])?)?;
    expect_ok(
        "config",
        run_git(snapshot, &["config", "user.name", &cfg.sync.author_name])?,
    )?;
    expect_ok(
        "config",
        run_git(snapshot, &["config", "user.email", &cfg.sync.author_email])?,
    )?;
    expect_ok(
        "remote add",
        run_git(snapshot, &["remote", "add", "origin", &cfg.sync.remote_url])?,
    )?;

    let copied = copy_tree(root, snapshot, &cfg.sync.exclude)?;
    write_readme(root, snapshot, cfg)?;
    let files = copied + 1;

    expect_ok("add", run_git(snapshot, &["add", "."])?)?;
    let message = format!(
        "Release snapshot - {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S")
    );
    let out = run_git(snapshot, &["commit", "-m", &message])?;
    if !out.success {
        if out.combined().contains("nothing to commit") {
            tracing::info!("snapshot is empty; nothing to push");
            return Ok(MirrorOutcome::Clean);
        }
        return Err(git_err("commit", &out));
    }

    let branch = push_with_fallback(snapshot, &cfg.sync.branch, &cfg.sync.fallback_branch)?;
    tracing::info!("mirrored {files} files to origin/{branch}");
    Ok(MirrorOutcome::Pushed { branch, files })
}

/// Force-push `branch`; on rejection rename and retry `fallback` once.
fn push_with_fallback(
    snapshot: &Path,
    branch: &str,
    fallback: &str,
) -> Result<String, SyncError> {
    expect_ok("branch", run_git(snapshot, &["branch", "-M", branch])?)?;
    let out = run_git(snapshot, &["push", "-u", "origin", branch, "--force"])?;
    if out.success {
        return Ok(branch.to_string());
    }

    tracing::warn!(
        "push to origin/{branch} rejected ({}); retrying {fallback}",
        out.detail()
    );
    expect_ok("branch", run_git(snapshot, &["branch", "-M", fallback])?)?;
    let retry = run_git(snapshot, &["push", "-u", "origin", fallback, "--force"])?;
    if retry.success {
        Ok(fallback.to_string())
    } else {
        Err(git_err("push", &retry))
    }
}

fn copy_tree(root: &Path, snapshot: &Path, patterns: &[String]) -> Result<usize, SyncError> {
    let excludes = ExcludeSet::new(patterns)?;
    let files = included_files(root, &excludes)?;
    for rel in &files {
        let src = root.join(rel);
        let dst = snapshot.join(rel);
        if let Some(parent) = dst.parent() {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
        std::fs::copy(&src, &dst).map_err(|e| io_err(&src, e))?;
    }
    Ok(files.len())
}

fn write_readme(root: &Path, snapshot: &Path, cfg: &ReleaseConfig) -> Result<(), SyncError> {
    let engine = engine_for(root, cfg)?;
    let content = engine.render(DocKind::MirrorReadme, &ReleaseContext::from_config(cfg))?;
    let path = snapshot.join(DocKind::MirrorReadme.file_name());
    std::fs::write(&path, content).map_err(|e| io_err(&path, e))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
