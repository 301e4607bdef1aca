// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForgeError {
    /// Bad user input detected before any process is spawned.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Python interpreter not found: {0}")]
    InterpreterNotFound(String),

    #[error("PyInstaller unavailable: {0}")]
    ToolUnavailable(String),

    #[error("A build is already running")]
    AlreadyRunning,

    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Build failed with exit code {0}")]
    BuildFailed(i32),

    #[error("Build cancelled by user")]
    Cancelled,

    #[error("Profile error: {0}")]
    Profile(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ForgeError>;
