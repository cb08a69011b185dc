//! Error types for settings persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while saving settings.
///
/// Loading has no error type: a missing or corrupt settings file falls back
/// to defaults so the wizard always starts.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The home directory could not be determined.
    #[error("Could not determine the home directory")]
    NoHomeDir,

    /// Failed to create the settings directory.
    #[error("Failed to create directory {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to serialize settings to JSON.
    #[error("Failed to serialize settings: {source}")]
    Serialize { source: serde_json::Error },

    /// Failed to write the settings file.
    #[error("Failed to write settings file at {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Type alias for Result with SettingsError.
pub type SettingsResult<T> = Result<T, SettingsError>;
