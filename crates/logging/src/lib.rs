//! Logging initialization for the harmonize binary.
//!
//! Logs never go to STDOUT, which carries the analysis report. The modes are:
//! - Cli: human-readable lines on STDERR.
//! - Json: JSON lines on STDERR, for tools that drive harmonize.
//! - File: JSON lines in a rotating file.
//!
//! Log files are rolled over when they reach 5 MB. Rotated logs are
//! compressed. The maximum number of rotated logs is 20.

use anyhow::{Context, Result};
use file_rotate::{ContentLimit, FileRotate, compression::Compression, suffix::AppendCount};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::EnvFilter;

const MAX_LOG_FILES: usize = 20;
const MAX_LOG_FILE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogMode {
    Cli,
    Json,
    File(PathBuf),
}

/// Guard that keeps background logging workers alive.
pub struct LoggingGuards {
    _guards: Vec<WorkerGuard>,
}

pub fn init(mode: LogMode, verbose: bool) -> Result<Option<LoggingGuards>> {
    let filter = env_filter(verbose);

    match mode {
        LogMode::Cli => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
            Ok(None)
        }
        LogMode::Json => {
            // The caller may not drain stderr. Cap the buffer and drop what
            // goes over it instead of blocking the analysis.
            let (stderr_non_blocking, stderr_guard) = NonBlockingBuilder::default()
                .lossy(true)
                .buffered_lines_limit(10_000)
                .finish(std::io::stderr());

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(stderr_non_blocking)
                .with_ansi(false)
                .json()
                .init();

            Ok(Some(LoggingGuards {
                _guards: vec![stderr_guard],
            }))
        }
        LogMode::File(path) => {
            let writer = rotating_writer(&path)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(writer);

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(non_blocking)
                .with_ansi(false)
                .json()
                .init();

            Ok(Some(LoggingGuards {
                _guards: vec![guard],
            }))
        }
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

fn rotating_writer(path: &Path) -> Result<FileRotate<AppendCount>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    Ok(FileRotate::new(
        path,
        AppendCount::new(MAX_LOG_FILES),
        ContentLimit::Bytes(MAX_LOG_FILE_BYTES),
        Compression::OnRotate(1),
        None,
    ))
}
