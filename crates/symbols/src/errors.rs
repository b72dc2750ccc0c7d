//! Error types for the symbols crate

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for symbol model operations
pub type Result<T> = std::result::Result<T, SymbolModelError>;

#[derive(Error, Debug)]
pub enum SymbolModelError {
    /// Reading the model dump failed
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The model dump is not valid JSON for the model schema
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Type declared more than once: {0}")]
    DuplicateType(String),

    #[error("Method symbol id used more than once: {0}")]
    DuplicateSymbol(String),

    #[error("Declaration '{identifier}' refers to unknown symbol {symbol}")]
    UnknownDeclarationSymbol { identifier: String, symbol: String },
}
