//! `shipwright init` — write a starter config into the project root.

use anyhow::{Context, Result};
use clap::Args;

use shipwright_core::{config, ReleaseConfig};

use super::project_root;

/// Arguments for `shipwright init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Git remote URL for sync and mirror pushes.
    #[arg(long)]
    pub remote: Option<String>,

    /// Branch that sync pushes to (default "main").
    #[arg(long)]
    pub branch: Option<String>,

    /// Android application id (e.g. com.example.app).
    #[arg(long)]
    pub package: Option<String>,

    /// Human-readable app label.
    #[arg(long)]
    pub label: Option<String>,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let root = project_root()?;
        let path = config::config_path(&root);
        if path.exists() {
            println!("· {} already exists; leaving it untouched", path.display());
            return Ok(());
        }

        let mut cfg = ReleaseConfig::default();
        if let Some(remote) = self.remote {
            cfg.sync.remote_url = remote;
        }
        if let Some(branch) = self.branch {
            cfg.sync.branch = branch;
        }
        if let Some(package) = self.package {
            cfg.app.package = package;
        }
        if let Some(label) = self.label {
            cfg.app.label = label;
        }

        config::save_to(&root, &cfg)
            .with_context(|| format!("failed to write {}", path.display()))?;

        println!("✓ wrote {}", path.display());
        if cfg.sync.remote_url.is_empty() {
            println!("  set sync.remote_url before running `shipwright sync`");
        }
        Ok(())
    }
}
