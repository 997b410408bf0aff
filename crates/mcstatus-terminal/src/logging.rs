//! Structured logging setup.
//!
//! The TUI owns the terminal, so its logs either go to a file or nowhere.
//! Plain mode writes them to stderr, out of the way of the transcript on
//! stdout.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

/// Where log records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    /// No subscriber is installed.
    Discard,
}

impl LogTarget {
    /// Pick the target for a run: an explicit file always wins.
    pub fn select(log_file: Option<PathBuf>, plain: bool) -> Self {
        match log_file {
            Some(path) => Self::File(path),
            None if plain => Self::Stderr,
            None => Self::Discard,
        }
    }
}

/// Install the global subscriber. Filter comes from `RUST_LOG`, default `info`.
pub fn init(target: &LogTarget) -> anyhow::Result<()> {
    let filter =
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .init(),
        LogTarget::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        LogTarget::Discard => {}
    }
    Ok(())
}
