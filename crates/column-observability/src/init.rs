// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization
//!
//! Console output always; with the `file-logging` feature and a `log_dir`,
//! JSON log files in a timestamped run folder:
//! ```text
//! ./logs/
//!   └── run_20250101_120000/
//!       ├── column-topology.log
//!       ├── column-config.log
//!       └── columns.log (combined)
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingConfig};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps file writers alive; logs are flushed on drop
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder receiving log files, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Install the global subscriber
///
/// # Errors
///
/// Fails when a subscriber is already installed or the log directory
/// cannot be created.
pub fn init_logging(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> Result<LoggingGuard> {
    let filter = debug_flags.to_filter_string(&config.level);

    let mut layers: Vec<BoxedLayer> = Vec::new();
    layers.push(console_layer(config.format, &filter)?);

    #[cfg(feature = "file-logging")]
    let (file_guards, log_dir) = match &config.log_dir {
        Some(base) => {
            let (mut file_layers, guards, run_folder) =
                file_layers(base, config.retention_runs, &filter)?;
            layers.append(&mut file_layers);
            (guards, Some(run_folder))
        }
        None => (Vec::new(), None),
    };
    #[cfg(not(feature = "file-logging"))]
    let log_dir = {
        if let Some(base) = &config.log_dir {
            eprintln!(
                "⚠️  log_dir {} ignored: built without the file-logging feature",
                base.display()
            );
        }
        None
    };

    Registry::default()
        .with(layers)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guards: file_guards,
        log_dir,
    })
}

/// Initialize logging with default settings and flags from the environment
pub fn init_logging_default() -> Result<LoggingGuard> {
    init_logging(&crate::cli::parse_debug_flags(), &LoggingConfig::default())
}

fn env_filter(filter: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(filter).with_context(|| format!("Invalid log filter: {}", filter))
}

fn console_layer(format: LogFormat, filter: &str) -> Result<BoxedLayer> {
    let layer = match format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_filter(env_filter(filter)?)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .with_target(true)
            .json()
            .with_filter(env_filter(filter)?)
            .boxed(),
    };
    Ok(layer)
}

#[cfg(feature = "file-logging")]
fn file_layers(
    base_log_dir: &Path,
    retention_runs: usize,
    filter: &str,
) -> Result<(
    Vec<BoxedLayer>,
    Vec<tracing_appender::non_blocking::WorkerGuard>,
    PathBuf,
)> {
    use tracing_appender::rolling;

    let timestamp = chrono::Utc::now().format(RUN_TIMESTAMP_FORMAT);
    let run_folder = base_log_dir.join(format!("run_{}", timestamp));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

    cleanup_old_runs(base_log_dir, retention_runs)?;

    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut guards = Vec::new();

    // One file per crate
    for crate_name in crate::KNOWN_CRATES {
        let appender = rolling::never(&run_folder, format!("{}.log", crate_name));
        let (writer, guard) = tracing_appender::non_blocking(appender);
        guards.push(guard);
        layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .json()
                .with_filter(env_filter(&format!("{}=debug,off", crate_name))?)
                .boxed(),
        );
    }

    let combined = rolling::never(&run_folder, "columns.log");
    let (writer, guard) = tracing_appender::non_blocking(combined);
    guards.push(guard);
    layers.push(
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_target(true)
            .json()
            .with_filter(env_filter(filter)?)
            .boxed(),
    );

    Ok((layers, guards, run_folder))
}

#[cfg(feature = "file-logging")]
const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Keep only the `retention_runs` most recent `run_*` folders
#[cfg(feature = "file-logging")]
fn cleanup_old_runs(base_log_dir: &Path, retention_runs: usize) -> Result<()> {
    if !base_log_dir.exists() {
        return Ok(());
    }

    let mut runs: Vec<(PathBuf, chrono::NaiveDateTime)> = Vec::new();
    for entry in std::fs::read_dir(base_log_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let stamp = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix("run_"))
            .and_then(|s| chrono::NaiveDateTime::parse_from_str(s, RUN_TIMESTAMP_FORMAT).ok());
        if let Some(stamp) = stamp {
            runs.push((path, stamp));
        }
    }

    // Newest first
    runs.sort_by(|a, b| b.1.cmp(&a.1));
    for (path, _) in runs.iter().skip(retention_runs.max(1)) {
        if let Err(e) = std::fs::remove_dir_all(path) {
            eprintln!(
                "Warning: Failed to remove old log directory {}: {}",
                path.display(),
                e
            );
        }
    }

    Ok(())
}
