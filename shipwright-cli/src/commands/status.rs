//! `shipwright status` — digest state and remote visibility.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use shipwright_sync::{pipeline::format_datetime_age, tree_status, TreeStatus};

use super::{load_config, project_root, short_digest};

/// Arguments for `shipwright status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct StatusJson {
    state: String,
    remote: String,
    branch: String,
    current_digest: String,
    recorded_digest: Option<String>,
    last_sync_at: Option<String>,
    last_sync_age: String,
}

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "field")]
    field: &'static str,
    #[tabled(rename = "value")]
    value: String,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let root = project_root()?;
        let cfg = load_config(&root)?;
        let status = tree_status(&root, &cfg.sync).context("status check failed")?;

        let state_key = state_key(&status);
        let (last_sync_at, last_sync_age) = match &status.recorded {
            Some(state) => (
                Some(state.synced_at.to_rfc3339()),
                format_datetime_age(state.synced_at),
            ),
            None => (None, "never".to_string()),
        };

        if self.json {
            let payload = StatusJson {
                state: state_key.to_string(),
                remote: cfg.sync.remote_url.clone(),
                branch: cfg.sync.branch.clone(),
                current_digest: status.current_digest.clone(),
                recorded_digest: status.recorded.as_ref().map(|s| s.digest.clone()),
                last_sync_at,
                last_sync_age,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&payload)
                    .context("failed to serialize status JSON")?
            );
            return Ok(());
        }

        println!(
            "shipwright v{} | {} {}",
            env!("CARGO_PKG_VERSION"),
            state_indicator(state_key),
            state_label(state_key),
        );

        let remote = if cfg.sync.remote_url.is_empty() {
            "(not set)".to_string()
        } else {
            cfg.sync.remote_url.clone()
        };
        let rows = vec![
            StatusRow {
                field: "remote",
                value: remote,
            },
            StatusRow {
                field: "branch",
                value: cfg.sync.branch.clone(),
            },
            StatusRow {
                field: "tree digest",
                value: short_digest(&status.current_digest).to_string(),
            },
            StatusRow {
                field: "recorded digest",
                value: status
                    .recorded
                    .as_ref()
                    .map(|s| short_digest(&s.digest).to_string())
                    .unwrap_or_else(|| "(none)".to_string()),
            },
            StatusRow {
                field: "last sync",
                value: last_sync_age,
            },
        ];
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");

        if state_key != "clean" {
            println!("Run 'shipwright sync' to push the current tree.");
        }
        Ok(())
    }
}

fn state_key(status: &TreeStatus) -> &'static str {
    if status.recorded.is_none() {
        "never-synced"
    } else if status.is_dirty() {
        "dirty"
    } else {
        "clean"
    }
}

fn state_label(key: &str) -> &'static str {
    match key {
        "clean" => "tree matches the last synced state",
        "dirty" => "tree changed since the last sync",
        _ => "never synced",
    }
}

fn state_indicator(key: &str) -> String {
    match key {
        "clean" => "■".green().bold().to_string(),
        "dirty" => "■".yellow().bold().to_string(),
        _ => "■".bright_black().bold().to_string(),
    }
}
