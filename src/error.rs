use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WaterfallError {
    #[error("Snapshot file not found: {0}")]
    SnapshotNotFound(PathBuf),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Shell completion error: {0}")]
    ShellCompletion(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, WaterfallError>;
