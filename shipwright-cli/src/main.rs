//! Shipwright — Android release tree automation CLI.
//!
//! # Usage
//!
//! ```text
//! shipwright init [--remote <url>] [--branch <name>] [--package <id>] [--label <text>]
//! shipwright sync [--check]
//! shipwright status [--json]
//! shipwright watch [--interval <minutes>]
//! shipwright bundle aab|apk
//! shipwright assets icons|screenshots|graphic|copy|all
//! shipwright mirror
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    assets::AssetsCommand, bundle::BundleCommand, init::InitArgs, status::StatusArgs,
    sync::SyncArgs, watch::WatchArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "shipwright",
    version,
    about = "Assemble, brand, and publish Android release trees",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a starter shipwright.yaml into the current directory.
    Init(InitArgs),

    /// Digest the tree and push a release commit when it changed.
    Sync(SyncArgs),

    /// Show tree digest state and remote configuration.
    Status(StatusArgs),

    /// Run the polling monitor in the foreground.
    Watch(WatchArgs),

    /// Assemble a placeholder app bundle or APK archive.
    Bundle {
        #[command(subcommand)]
        command: BundleCommand,
    },

    /// Generate launcher icons, screenshots, graphics, and store copy.
    Assets {
        #[command(subcommand)]
        command: AssetsCommand,
    },

    /// Push a filtered snapshot of the tree to the configured remote.
    Mirror,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Init(args) => args.run(),
        Commands::Sync(args) => args.run(),
        Commands::Status(args) => args.run(),
        Commands::Watch(args) => args.run(),
        Commands::Bundle { command } => commands::bundle::run(command),
        Commands::Assets { command } => commands::assets::run(command),
        Commands::Mirror => commands::mirror::run(),
    }
}
