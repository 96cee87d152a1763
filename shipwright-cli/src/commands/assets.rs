//! `shipwright assets` — generate icons, screenshots, graphics, and copy.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;

use shipwright_core::ReleaseConfig;
use shipwright_media::{
    write_all, write_feature_graphic, write_launcher_icons, write_screenshots, write_store_icon,
};
use shipwright_render::{engine_for, DocKind, ReleaseContext};

use super::{load_config, project_root};

#[derive(Subcommand, Debug)]
pub enum AssetsCommand {
    /// Launcher icons at every density, the splash logo, and the store icon.
    Icons,
    /// Store screenshots from the configured specs.
    Screenshots,
    /// The 1024x500 feature graphic.
    Graphic,
    /// Store listing and promo video script.
    Copy,
    /// Everything above.
    All,
}

pub fn run(command: AssetsCommand) -> Result<()> {
    let root = project_root()?;
    let cfg = load_config(&root)?;

    match command {
        AssetsCommand::Icons => {
            let mut written =
                write_launcher_icons(&root, &cfg).context("icon generation failed")?;
            written.push(write_store_icon(&root, &cfg).context("store icon generation failed")?);
            print_written("icons", &written);
        }
        AssetsCommand::Screenshots => {
            let written = write_screenshots(&root, &cfg).context("screenshot generation failed")?;
            print_written("screenshots", &written);
        }
        AssetsCommand::Graphic => {
            let path =
                write_feature_graphic(&root, &cfg).context("feature graphic generation failed")?;
            print_written("feature graphic", std::slice::from_ref(&path));
        }
        AssetsCommand::Copy => {
            let written = write_store_copy(&root, &cfg)?;
            print_written("store copy", &written);
        }
        AssetsCommand::All => {
            let mut written = write_all(&root, &cfg).context("asset generation failed")?;
            written.extend(write_store_copy(&root, &cfg)?);
            print_written("assets", &written);
        }
    }
    Ok(())
}

/// Render the store listing and video script into the assets dir.
fn write_store_copy(root: &Path, cfg: &ReleaseConfig) -> Result<Vec<PathBuf>> {
    let engine = engine_for(root, cfg).context("template engine failed to load")?;
    let ctx = ReleaseContext::from_config(cfg);
    let assets_dir = root.join(&cfg.media.assets_dir);
    fs::create_dir_all(&assets_dir)
        .with_context(|| format!("create {}", assets_dir.display()))?;

    let mut written = Vec::new();
    for kind in [DocKind::StoreListing, DocKind::VideoScript] {
        let rendered = engine
            .render(kind, &ctx)
            .with_context(|| format!("render {}", kind.file_name()))?;
        let path = assets_dir.join(kind.file_name());
        fs::write(&path, rendered).with_context(|| format!("write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

fn print_written(what: &str, written: &[PathBuf]) {
    println!("✓ {what}: {} file(s)", written.len());
    for path in written {
        println!("  · {}", path.display());
    }
}
