//! `shipwright watch` — run the polling monitor in the foreground.

use anyhow::{bail, Context, Result};
use clap::Args;

use shipwright_watch::{start_blocking, WatchOptions};

use super::{load_config, project_root};

/// Arguments for `shipwright watch`.
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Minutes between digest checks (defaults to sync.interval_minutes).
    #[arg(long, value_name = "MINUTES")]
    pub interval: Option<u64>,
}

impl WatchArgs {
    pub fn run(self) -> Result<()> {
        let root = project_root()?;
        let cfg = load_config(&root)?;
        if cfg.sync.remote_url.is_empty() {
            bail!("sync.remote_url is not set; edit shipwright.yaml before watching");
        }

        let opts = WatchOptions::from_config(&cfg.sync, self.interval);
        println!(
            "Watching {} every {} minute(s); Ctrl-C to stop.",
            root.display(),
            opts.interval.as_secs() / 60,
        );
        start_blocking(&root, &cfg.sync, opts).context("monitor exited with error")
    }
}
