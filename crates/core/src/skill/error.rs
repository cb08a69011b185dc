//! Error types for manifest loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a skill manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The skill directory has no `skill.yaml`.
    #[error("No skill.yaml found in {path}")]
    MissingManifest { path: PathBuf },

    /// Failed to read the manifest file from disk.
    #[error("Failed to read manifest at {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse the manifest YAML.
    #[error("Failed to parse YAML file at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// The manifest parsed but its contents are not usable.
    #[error("Invalid manifest in {path}: {reason}")]
    InvalidManifest { path: PathBuf, reason: String },

    /// Failed to walk the skills directory.
    #[error("Failed to traverse directory {path}: {source}")]
    DirectoryWalk {
        path: PathBuf,
        source: walkdir::Error,
    },
}

/// Type alias for Result with ManifestError.
pub type ManifestResult<T> = Result<T, ManifestError>;
