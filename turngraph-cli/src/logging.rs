//! Tracing setup for the CLI: stderr plus a plain-text log file.
//!
//! `RUST_LOG` wins when set; otherwise `info` (or `debug` with `--verbose`, so node
//! enter/exit lines from the logging middleware show up).

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Local};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::Error;

/// Log file used by `classify`.
pub const CLASSIFY_LOG_FILE: &str = "run.log";

/// Per-run debate log file name, e.g. `debate_20250101_120000.log`.
pub fn debate_log_file(now: DateTime<Local>) -> String {
    format!("debate_{}.log", now.format("%Y%m%d_%H%M%S"))
}

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("info,turngraph=debug,turngraph_cli=debug")
        } else {
            EnvFilter::new("info")
        }
    })
}

/// Installs the global subscriber and returns the log file path.
///
/// Creates `log_dir` when missing. When a subscriber is already installed (tests, embedding
/// callers) the existing one is kept and the path is still returned.
pub fn init_tracing(log_dir: &Path, file_name: &str, verbose: bool) -> Result<PathBuf, Error> {
    std::fs::create_dir_all(log_dir)?;
    let path = log_dir.join(file_name);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(default_filter(verbose));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_filter(default_filter(verbose));

    if tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok()
    {
        tracing::info!(path = %path.display(), "logging to file");
    }
    Ok(path)
}
