//! Base Builder trait and supporting types.

use async_trait::async_trait;
use sk_protocol::manifest::BuildConfig;
use std::path::Path;
use std::pin::Pin;
use thiserror::Error;
use tokio_stream::Stream;

/// A single line of build output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildLine {
    /// Line from the build tool's stdout.
    Out(String),
    /// Line from the build tool's stderr. Cargo writes its progress here,
    /// so these are ordinary lines, not failures.
    Err(String),
}

impl BuildLine {
    pub fn text(&self) -> &str {
        match self {
            BuildLine::Out(line) | BuildLine::Err(line) => line,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Build tool not found: {0}")]
    ToolNotFound(String),
    #[error("Failed to start build: {0}")]
    SpawnError(String),
    #[error("Failed to read build output: {0}")]
    OutputError(String),
    #[error("Build failed with {0}")]
    Failed(String),
}

/// Stream of build output lines.
///
/// The stream ending without an `Err` item means the build succeeded; a
/// failed build yields `BuildError::Failed` as its final item.
pub type BuildStream = Pin<Box<dyn Stream<Item = Result<BuildLine, BuildError>> + Send>>;

/// Abstraction over the tool that produces a skill's binary.
///
/// The session drives whichever builder it is given; the cargo
/// implementation is used in production and a scripted mock in tests.
#[async_trait]
pub trait Builder: Send + Sync {
    /// Start a build and return its output stream.
    ///
    /// # Errors
    ///
    /// Returns an error when the build cannot be started at all (tool
    /// missing, spawn failure). Failures after startup arrive through the
    /// stream.
    async fn build(&self, root: &Path, config: &BuildConfig) -> Result<BuildStream, BuildError>;
}
