//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Every error detected before dispatch is terminal for the invocation and maps to
//! exit code 1; failures inside the upload engine are reported through its exit code instead.
use std::path::PathBuf;

use thiserror::Error;

use crate::types::ConfigSetting;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "One of -d/--directory or -m/--metadata is required, both cannot be given at the same time."
    )]
    ModeConflict { directory: bool, metadata: bool },

    #[error("Specified directory is not writable: {}", path.display())]
    DirectoryNotWritable { path: PathBuf },

    #[error("Could not load configuration from {}: {reason}", path.display())]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("Failed to read {setting}: {source}")]
    Prompt {
        setting: ConfigSetting,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Status file error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Process exit code reported for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
