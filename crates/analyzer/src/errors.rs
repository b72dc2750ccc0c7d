//! Error types for the analyzer crate

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for analysis runs
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading the configuration file failed
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid TOML for the configuration schema
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unknown rule id in [rules]: {0}")]
    UnknownRule(String),
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Analysis cancelled {0}")]
    Cancelled(&'static str),

    /// The worker pool could not be started
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
