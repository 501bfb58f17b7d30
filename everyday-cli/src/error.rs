//! Error types for the binary.

use crate::config::ConfigError;
use everyday_core::EngineError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("Document {path} is locked by another process")]
    Locked { path: PathBuf },
    #[error("Entry file already exists: {path}")]
    EntryExists { path: PathBuf },
    #[error("Failed to replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode report: {0}")]
    Report(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
