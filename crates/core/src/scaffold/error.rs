//! Error types for skill scaffolding.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for scaffolding operations.
pub type ScaffoldResult<T> = Result<T, ScaffoldError>;

/// Errors that can occur while generating a new skill.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The requested skill name cannot be used as a directory and crate name.
    #[error("Invalid skill name '{0}': use lowercase letters, digits, '-' or '_', starting with a letter")]
    InvalidName(String),

    /// The skill directory already exists and force flag was not set.
    #[error("Skill directory already exists at {0}. Use --force to overwrite.")]
    DirectoryExists(PathBuf),

    /// A required template file was not found in embedded assets.
    #[error("Template file not found: {0}")]
    TemplateNotFound(String),

    /// Failed to create a directory.
    #[error("Failed to create directory {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read the workspace manifest.
    #[error("Failed to read {path}: {source}")]
    WorkspaceRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The workspace manifest is not valid TOML.
    #[error("Failed to parse {path}: {source}")]
    WorkspaceParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// The workspace manifest has no recognizable members array.
    #[error("No [workspace] members array found in {path}")]
    MembersNotFound { path: PathBuf },
}
