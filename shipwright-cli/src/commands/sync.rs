//! `shipwright sync` — digest the tree and push when it changed.

use anyhow::{Context, Result};
use clap::Args;

use shipwright_sync::{sync_once, SyncAction, SyncMode};

use super::{load_config, project_root, short_digest};

/// Arguments for `shipwright sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Report what a sync would do without running git or writing state.
    #[arg(long)]
    pub check: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let root = project_root()?;
        let cfg = load_config(&root)?;

        let mode = if self.check {
            SyncMode::Check
        } else {
            SyncMode::Commit
        };
        let report = sync_once(&root, &cfg.sync, mode).context("sync failed")?;

        let prefix = if self.check { "[check] " } else { "" };
        let digest = short_digest(&report.digest);
        match report.action {
            SyncAction::Unchanged => {
                println!("{prefix}✓ no changes since last sync (digest {digest})");
            }
            SyncAction::WouldSync => {
                println!("{prefix}~ tree changed; a sync would commit and push (digest {digest})");
            }
            SyncAction::Clean => {
                println!("{prefix}✓ nothing to commit; state refreshed (digest {digest})");
            }
            SyncAction::Pushed => {
                println!(
                    "{prefix}✓ pushed to origin/{} (digest {digest})",
                    cfg.sync.branch
                );
            }
        }
        Ok(())
    }
}
