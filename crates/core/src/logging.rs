//! JSON run logs.
//!
//! Every process run writes one file, `slidestack-<run_id>.json`, in the
//! configured directory. The run id is a UUID v7, so file names sort in
//! chronological order and the oldest runs can be pruned by name alone.
//!
//! `RUST_LOG` takes precedence over the configured level:
//!
//! ```bash
//! RUST_LOG=slidestack_core::view::navigation=trace,info slidestack
//! ```
//!
//! ```no_run
//! use slidestack_core::logging::{init_logging, shutdown_logging};
//! use slidestack_core::settings::LoggingSettings;
//!
//! init_logging(&LoggingSettings::default())?;
//! tracing::info!("Session started");
//! shutdown_logging();
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::settings::LoggingSettings;
use anyhow::{Context, Error};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::{Mutex, OnceLock};
use std::thread;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const LOG_FILE_PREFIX: &str = "slidestack-";
const LOG_FILE_SUFFIX: &str = "json";
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

static LOG_GUARD: OnceLock<Mutex<Option<WorkerGuard>>> = OnceLock::new();
static RUN_ID: OnceLock<String> = OnceLock::new();

/// Identifier of this process run, stable for its whole lifetime.
pub fn get_run_id() -> &'static str {
    RUN_ID.get_or_init(|| Uuid::now_v7().to_string()).as_str()
}

fn is_run_log_name(file_name: &str) -> bool {
    file_name.starts_with(LOG_FILE_PREFIX) && file_name.ends_with(LOG_FILE_SUFFIX)
}

/// Run logs found in `log_dir`, oldest first.
fn run_logs(log_dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut paths = Vec::new();

    for entry in fs::read_dir(log_dir)
        .with_context(|| format!("can't read log directory {}", log_dir.display()))?
    {
        let entry = entry.context("can't read log directory entry")?;
        if is_run_log_name(&entry.file_name().to_string_lossy()) {
            paths.push(entry.path());
        }
    }

    paths.sort();
    Ok(paths)
}

/// Deletes the oldest run logs so that at most `max_files` remain.
/// Returns the number of deleted files.
fn prune_run_logs(log_dir: &Path, max_files: usize) -> Result<usize, Error> {
    if max_files == 0 {
        return Ok(0);
    }

    let paths = run_logs(log_dir)?;
    let excess = paths.len().saturating_sub(max_files);

    for path in &paths[..excess] {
        fs::remove_file(path)
            .with_context(|| format!("can't remove old log file {}", path.display()))?;
    }

    Ok(excess)
}

fn build_filter(settings: &LoggingSettings) -> Result<EnvFilter, Error> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let level = match settings.level.trim() {
        "" => "info",
        level => level,
    };

    EnvFilter::builder()
        .parse(level)
        .with_context(|| format!("invalid logging level {:?}", level))
}

/// Installs the global JSON subscriber. Does nothing when logging is disabled.
///
/// Relative directories are resolved against the current working directory.
/// Must be called once, before the first event worth keeping is emitted.
pub fn init_logging(settings: &LoggingSettings) -> Result<(), Error> {
    if !settings.enabled {
        return Ok(());
    }

    let log_dir = std::env::current_dir()
        .context("can't get current working directory")?
        .join(&settings.directory);
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("can't create log directory {}", log_dir.display()))?;

    let pruned = prune_run_logs(&log_dir, settings.max_files)?;

    let appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::NEVER)
        .filename_prefix(format!("{}{}", LOG_FILE_PREFIX, get_run_id()))
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(&log_dir)
        .context("can't initialize log file appender")?;

    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(Mutex::new(Some(guard)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_ansi(false)
        .with_writer(writer)
        .with_current_span(true);

    tracing_subscriber::registry()
        .with(build_filter(settings)?)
        .with(fmt_layer)
        .try_init()
        .context("can't initialize tracing subscriber")?;

    tracing::info!(
        run_id = get_run_id(),
        version = VERSION,
        pruned,
        directory = %log_dir.display(),
        "Logging initialized"
    );

    Ok(())
}

/// Flushes pending log lines, waiting a bounded amount of time.
pub fn shutdown_logging() {
    let Some(mutex) = LOG_GUARD.get() else {
        return;
    };

    let Some(guard) = mutex.lock().ok().and_then(|mut guard| guard.take()) else {
        return;
    };

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        drop(guard);
        let _ = tx.send(());
    });

    if rx.recv_timeout(SHUTDOWN_TIMEOUT).is_err() {
        eprintln!("Timed out while flushing logs.");
    }
}
