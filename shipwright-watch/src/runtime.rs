use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;

use shipwright_core::{paths, SyncConfig};
use shipwright_sync::{sync_once, SyncAction, SyncMode, SyncReport};

use crate::error::{io_err, WatchError};
use crate::log_rotation;

/// How often the rotation task inspects the cycle log.
const ROTATION_CHECK_PERIOD: Duration = Duration::from_secs(60);

/// Tunables for the monitor loop.
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Delay between digest checks.
    pub interval: Duration,
}

impl WatchOptions {
    /// Options from config, honoring a CLI interval override in minutes.
    /// Intervals are floored at one minute.
    pub fn from_config(cfg: &SyncConfig, interval_minutes: Option<u64>) -> Self {
        let minutes = interval_minutes.unwrap_or(cfg.interval_minutes).max(1);
        WatchOptions {
            interval: Duration::from_secs(minutes * 60),
        }
    }
}

/// One state-changing monitor cycle, as appended to the cycle log.
#[derive(Debug, Clone, Serialize)]
pub struct CycleRecord {
    pub at: DateTime<Utc>,
    pub action: String,
    pub digest: String,
}

/// Start the monitor runtime and block the current thread until it exits.
pub fn start_blocking(root: &Path, cfg: &SyncConfig, opts: WatchOptions) -> Result<(), WatchError> {
    init_tracing();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| io_err("tokio-runtime", e))?;
    runtime.block_on(run(root.to_path_buf(), cfg.clone(), opts))
}

/// Run the monitor runtime until Ctrl-C or a task failure.
pub async fn run(root: PathBuf, cfg: SyncConfig, opts: WatchOptions) -> Result<(), WatchError> {
    paths::ensure_logs_dir(&root)?;
    tracing::info!(
        root = %root.display(),
        interval_secs = opts.interval.as_secs(),
        "monitor started",
    );

    let (shutdown_tx, _) = broadcast::channel::<()>(16);

    let monitor_handle = {
        let shutdown = shutdown_tx.clone();
        let root = root.clone();
        let cfg = cfg.clone();
        tokio::spawn(async move {
            let result = monitor_task(root, cfg, opts.interval, shutdown.subscribe()).await;
            let _ = shutdown.send(());
            result
        })
    };

    let rotation_handle = {
        let shutdown = shutdown_tx.clone();
        let root = root.clone();
        tokio::spawn(async move {
            let result = log_rotation_task(root, shutdown.subscribe()).await;
            let _ = shutdown.send(());
            result
        })
    };

    let signal_handle = {
        let shutdown = shutdown_tx.clone();
        tokio::spawn(async move {
            let mut shutdown_rx = shutdown.subscribe();
            tokio::select! {
                _ = shutdown_rx.recv() => Ok(()),
                signal = tokio::signal::ctrl_c() => {
                    match signal {
                        Ok(()) => {
                            tracing::info!("received ctrl-c, stopping monitor");
                            let _ = shutdown.send(());
                            Ok(())
                        }
                        Err(err) => Err(WatchError::Task(format!("ctrl-c handler failed: {err}"))),
                    }
                }
            }
        })
    };

    let (monitor_result, rotation_result, signal_result) =
        tokio::join!(monitor_handle, rotation_handle, signal_handle);

    handle_join("monitor", monitor_result)?;
    handle_join("log_rotation", rotation_result)?;
    handle_join("signal_handler", signal_result)?;
    Ok(())
}

/// Tick on `every`, running one sync cycle per tick on a blocking task.
/// The first tick fires immediately; a slow cycle delays the next tick
/// instead of bursting.
async fn monitor_task(
    root: PathBuf,
    cfg: SyncConfig,
    every: Duration,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), WatchError> {
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,
            _ = interval.tick() => {
                let root_for_sync = root.clone();
                let cfg_for_sync = cfg.clone();
                let outcome = tokio::task::spawn_blocking(move || {
                    sync_once(&root_for_sync, &cfg_for_sync, SyncMode::Commit)
                })
                .await
                .map_err(|err| WatchError::Task(format!("sync task join error: {err}")))?;

                match outcome {
                    Ok(report) => log_cycle(&root, &report),
                    Err(err) => {
                        // A failed cycle is logged and retried on the next tick.
                        tracing::error!(error = %err, "monitor sync cycle failed");
                    }
                }
            }
        }
    }

    Ok(())
}

/// Log a finished cycle and append state-changing ones to the cycle log.
fn log_cycle(root: &Path, report: &SyncReport) {
    match report.action {
        SyncAction::Unchanged => {
            tracing::debug!("tree unchanged since last sync");
        }
        SyncAction::Pushed | SyncAction::Clean => {
            tracing::info!(
                action = action_label(report.action),
                digest = short_digest(&report.digest),
                "monitor sync cycle completed",
            );
            if let Err(err) = append_cycle_record(root, report) {
                tracing::warn!(error = %err, "could not append to cycle log");
            }
        }
        // Commit mode never yields WouldSync.
        SyncAction::WouldSync => {}
    }
}

/// Append one JSON line for `report` to `<root>/.shipwright/logs/monitor.log`.
fn append_cycle_record(root: &Path, report: &SyncReport) -> Result<(), WatchError> {
    paths::ensure_logs_dir(root)?;
    let record = CycleRecord {
        at: Utc::now(),
        action: action_label(report.action).to_string(),
        digest: report.digest.clone(),
    };
    let mut line = serde_json::to_string(&record)?;
    line.push('\n');

    let log_path = paths::monitor_log_path(root);
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| io_err(&log_path, e))?;
    file.write_all(line.as_bytes())
        .map_err(|e| io_err(&log_path, e))?;
    Ok(())
}

async fn log_rotation_task(
    root: PathBuf,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), WatchError> {
    let mut interval = tokio::time::interval(ROTATION_CHECK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval.tick().await; // consume the first immediate tick

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,
            _ = interval.tick() => {
                let root = root.clone();
                tokio::task::spawn_blocking(move || {
                    log_rotation::rotate_monitor_log(&root);
                })
                .await
                .ok(); // rotation failures are logged inside; the monitor keeps running
            }
        }
    }
    Ok(())
}

fn action_label(action: SyncAction) -> &'static str {
    match action {
        SyncAction::Unchanged => "unchanged",
        SyncAction::WouldSync => "would-sync",
        SyncAction::Pushed => "pushed",
        SyncAction::Clean => "clean",
    }
}

fn short_digest(digest: &str) -> &str {
    &digest[..digest.len().min(12)]
}

fn handle_join(
    task: &str,
    result: Result<Result<(), WatchError>, tokio::task::JoinError>,
) -> Result<(), WatchError> {
    match result {
        Ok(inner) => inner,
        Err(err) => Err(WatchError::Task(format!("{task} task join failure: {err}"))),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio_test::assert_ok;

    #[test]
    fn options_floor_the_interval_at_one_minute() {
        let mut cfg = SyncConfig::default();
        cfg.interval_minutes = 0;
        assert_eq!(
            WatchOptions::from_config(&cfg, None).interval,
            Duration::from_secs(60)
        );
        assert_eq!(
            WatchOptions::from_config(&cfg, Some(3)).interval,
            Duration::from_secs(180)
        );
    }

    #[test]
    fn cycle_records_are_json_lines() {
        let root = TempDir::new().expect("tempdir");
        let report = SyncReport {
            digest: "abc123def456abc123def456".to_string(),
            action: SyncAction::Pushed,
        };

        append_cycle_record(root.path(), &report).expect("append");
        append_cycle_record(root.path(), &report).expect("append again");

        let log = fs::read_to_string(paths::monitor_log_path(root.path())).expect("log");
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: serde_json::Value = serde_json::from_str(lines[0]).expect("json line");
        assert_eq!(parsed["action"], "pushed");
        assert_eq!(parsed["digest"], report.digest);
        assert!(parsed["at"].is_string());
    }

    #[test]
    fn unchanged_cycles_stay_out_of_the_log() {
        let root = TempDir::new().expect("tempdir");
        let report = SyncReport {
            digest: "abc".to_string(),
            action: SyncAction::Unchanged,
        };
        log_cycle(root.path(), &report);
        assert!(!paths::monitor_log_path(root.path()).exists());
    }

    #[tokio::test]
    async fn monitor_survives_failing_cycles_and_stops_on_shutdown() {
        let root = TempDir::new().expect("tempdir");
        // Empty remote makes every cycle fail fast; the loop must keep going.
        let cfg = SyncConfig::default();

        let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
        let handle = tokio::spawn(monitor_task(
            root.path().to_path_buf(),
            cfg,
            Duration::from_secs(3600),
            shutdown_rx,
        ));

        // Give the immediate first tick a moment to run and fail.
        tokio::time::sleep(Duration::from_millis(200)).await;
        shutdown_tx.send(()).expect("send shutdown");

        let result = tokio::time::timeout(Duration::from_secs(10), handle)
            .await
            .expect("monitor should stop promptly")
            .expect("join");
        assert!(result.is_ok(), "{result:?}");
    }

    #[tokio::test(start_paused = true, flavor = "current_thread")]
    async fn rotation_task_stops_on_shutdown() {
        let root = TempDir::new().expect("tempdir");
        let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
        let handle = tokio::spawn(log_rotation_task(root.path().to_path_buf(), shutdown_rx));

        shutdown_tx.send(()).expect("send shutdown");
        let result = handle.await.expect("join");
        tokio_test::assert_ok!(result);
    }

    #[test]
    fn action_labels_are_stable() {
        assert_eq!(action_label(SyncAction::Pushed), "pushed");
        assert_eq!(action_label(SyncAction::Clean), "clean");
        assert_eq!(action_label(SyncAction::Unchanged), "unchanged");
    }
}
