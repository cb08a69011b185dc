//! Error types for the deploy step.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for deploy operations.
pub type DeployResult<T> = Result<T, DeployError>;

/// Errors that can occur while installing a skill.
#[derive(Debug, Error)]
pub enum DeployError {
    /// Failed to create a directory in the deploy target.
    #[error("Failed to create directory {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The build finished but its artifact is not where cargo puts it.
    #[error("Built binary not found at {path}")]
    MissingArtifact { path: PathBuf },

    /// A `deploy.files` source does not exist in the skill directory.
    #[error("Deploy source not found: {path}")]
    MissingSource { path: PathBuf },

    /// The configured docs template does not exist.
    #[error("Docs template not found: {path}")]
    MissingTemplate { path: PathBuf },

    /// Failed to copy a file into the deploy directory.
    #[error("Failed to copy {from} to {to}: {source}")]
    FileCopy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read a file from the skill directory.
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a file into the deploy directory.
    #[error("Failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to walk a source directory during a recursive copy.
    #[error("Failed to traverse directory {path}: {source}")]
    DirectoryWalk {
        path: PathBuf,
        source: walkdir::Error,
    },
}
