//! `shipwright mirror` — push a filtered snapshot to the remote.

use anyhow::{Context, Result};

use shipwright_sync::{push_mirror, MirrorOutcome};

use super::{load_config, project_root};

pub fn run() -> Result<()> {
    let root = project_root()?;
    let cfg = load_config(&root)?;

    match push_mirror(&root, &cfg).context("mirror failed")? {
        MirrorOutcome::Pushed { branch, files } => {
            println!(
                "✓ mirrored {files} file(s) to {} ({branch})",
                cfg.sync.remote_url
            );
        }
        MirrorOutcome::Clean => {
            println!("✓ mirror already matches the working tree; nothing pushed");
        }
    }
    Ok(())
}
