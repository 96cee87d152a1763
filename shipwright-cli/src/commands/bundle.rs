//! `shipwright bundle` — assemble release archives.

use anyhow::{Context, Result};
use clap::Subcommand;

use shipwright_bundle::{assemble_aab, assemble_apk, ArchiveSummary};

use super::{load_config, project_root};

#[derive(Subcommand, Debug)]
pub enum BundleCommand {
    /// Assemble the app bundle at bundle.aab_output.
    Aab,
    /// Assemble the APK layout at bundle.apk_output.
    Apk,
}

pub fn run(command: BundleCommand) -> Result<()> {
    let root = project_root()?;
    let cfg = load_config(&root)?;

    let summary = match command {
        BundleCommand::Aab => assemble_aab(&root, &cfg).context("app bundle assembly failed")?,
        BundleCommand::Apk => assemble_apk(&root, &cfg).context("apk assembly failed")?,
    };
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &ArchiveSummary) {
    println!(
        "✓ wrote {} ({} KB, {} entries)",
        summary.path.display(),
        summary.size_kb(),
        summary.entries.len(),
    );
    for entry in &summary.entries {
        println!("  · {entry}");
    }
}
