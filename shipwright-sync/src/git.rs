//! Thin wrapper around the `git` binary.
//!
//! Exit status alone does not decide success here: a couple of output
//! phrases are expected in normal operation and classified as benign. git
//! is not consistent about which stream carries status prose, so phrases
//! are matched against stdout and stderr combined.

use std::path::Path;
use std::process::Command;

use shipwright_core::types::SyncConfig;

use crate::error::SyncError;

/// `git commit` output when the index matches HEAD.
const BENIGN_COMMIT: &str = "nothing to commit";
/// `git remote add` output when origin is already wired.
const BENIGN_REMOTE: &str = "already exists";

/// What a sync push actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// A commit was created and pushed.
    Pushed,
    /// The index matched HEAD; no commit, no push.
    Clean,
}

/// Captured output of one git invocation. Never panics on failure; callers
/// classify via [`GitOutput::success`] and the text accessors.
#[derive(Debug)]
pub(crate) struct GitOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    /// stdout and stderr joined, for benign-phrase matching.
    pub fn combined(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Trimmed stderr, falling back to stdout, for error reporting.
    pub fn detail(&self) -> String {
        let err = self.stderr.trim();
        if err.is_empty() {
            self.stdout.trim().to_string()
        } else {
            err.to_string()
        }
    }
}

/// Run `git <args>` in `root`, capturing output.
///
/// Only a spawn failure (no usable `git` binary) is an error at this level.
pub(crate) fn run_git(root: &Path, args: &[&str]) -> Result<GitOutput, SyncError> {
    tracing::debug!("git {}", args.join(" "));
    let output = Command::new("git")
        .args(args)
        .current_dir(root)
        .output()
        .map_err(|e| SyncError::GitSpawn { source: e })?;
    Ok(GitOutput {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

pub(crate) fn git_err(action: &str, out: &GitOutput) -> SyncError {
    SyncError::Git {
        action: action.to_string(),
        detail: out.detail(),
    }
}

/// Fail with `action` context unless the command succeeded.
pub(crate) fn expect_ok(action: &str, out: GitOutput) -> Result<(), SyncError> {
    if out.success {
        Ok(())
    } else {
        Err(git_err(action, &out))
    }
}

/// Make sure `root` is a git repository wired to the configured remote.
///
/// `git init` on an existing repository is skipped; a remote that already
/// exists is benign. A freshly initialized repository also gets a local
/// committer identity so commits work without global git config.
pub fn ensure_repo(root: &Path, cfg: &SyncConfig) -> Result<(), SyncError> {
    if cfg.remote_url.is_empty() {
        return Err(SyncError::RemoteMissing);
    }

    if !root.join(".git").exists() {
        expect_ok("init", run_git(root, &["init"])?)?;
        expect_ok(
            "config",
            run_git(root, &["config", "user.name", &cfg.author_name])?,
        )?;
        expect_ok(
            "config",
            run_git(root, &["config", "user.email", &cfg.author_email])?,
        )?;
        tracing::info!("initialized git repository at {}", root.display());
    }

    let out = run_git(root, &["remote", "add", "origin", &cfg.remote_url])?;
    if !out.success && !out.combined().contains(BENIGN_REMOTE) {
        return Err(git_err("remote add", &out));
    }
    Ok(())
}

/// Stage everything, commit, and push to `origin/<branch>`.
///
/// Returns [`PushOutcome::Clean`] without pushing when the commit reports
/// nothing to commit. The current branch is renamed to the configured one
/// before the push so fresh repositories land on the right ref regardless
/// of git's default branch name.
pub fn commit_and_push(root: &Path, cfg: &SyncConfig) -> Result<PushOutcome, SyncError> {
    expect_ok("add", run_git(root, &["add", "."])?)?;

    let message = commit_message(&cfg.commit_subject);
    let out = run_git(root, &["commit", "-m", &message])?;
    if !out.success {
        if out.combined().contains(BENIGN_COMMIT) {
            tracing::info!("nothing to commit; skipping push");
            return Ok(PushOutcome::Clean);
        }
        return Err(git_err("commit", &out));
    }

    expect_ok("branch", run_git(root, &["branch", "-M", &cfg.branch])?)?;
    expect_ok("push", run_git(root, &["push", "-u", "origin", &cfg.branch])?)?;
    tracing::info!("pushed to origin/{}", cfg.branch);
    Ok(PushOutcome::Pushed)
}

fn commit_message(subject: &str) -> String {
    format!(
        "{subject} - {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S")
    )
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
