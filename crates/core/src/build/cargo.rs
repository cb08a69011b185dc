//! Cargo-backed builder.
//!
//! Runs `cargo build --release -p <package>` from the workspace root and
//! streams stdout and stderr line by line as they arrive.

use crate::build::base::{BuildError, BuildLine, BuildStream, Builder};
use async_trait::async_trait;
use sk_protocol::manifest::BuildConfig;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio_stream::wrappers::LinesStream;
use tokio_stream::StreamExt;

/// Builder that shells out to cargo.
pub struct CargoBuilder {
    /// Explicit build program. `None` resolves `cargo` from PATH at build
    /// time, so a missing toolchain surfaces when the user actually builds.
    program: Option<PathBuf>,
}

impl CargoBuilder {
    pub fn new() -> Self {
        Self { program: None }
    }

    /// Use a specific program instead of resolving `cargo` from PATH.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: Some(program.into()),
        }
    }

    fn resolve_program(&self) -> Result<PathBuf, BuildError> {
        match &self.program {
            Some(program) => Ok(program.clone()),
            None => which::which("cargo")
                .map_err(|e| BuildError::ToolNotFound(format!("cargo: {e}"))),
        }
    }
}

impl Default for CargoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Builder for CargoBuilder {
    async fn build(&self, root: &Path, config: &BuildConfig) -> Result<BuildStream, BuildError> {
        let program = self.resolve_program()?;

        let mut cmd = Command::new(&program);
        cmd.arg("build")
            .arg("--release")
            .arg("-p")
            .arg(&config.package);
        cmd.current_dir(root);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| {
            BuildError::SpawnError(format!("{}: {}", program.display(), e))
        })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| BuildError::SpawnError("Failed to capture stdout".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| BuildError::SpawnError("Failed to capture stderr".to_string()))?;

        let stream = async_stream::stream! {
            let out_lines = LinesStream::new(BufReader::new(stdout).lines())
                .map(|line| line.map(BuildLine::Out));
            let err_lines = LinesStream::new(BufReader::new(stderr).lines())
                .map(|line| line.map(BuildLine::Err));

            // Interleave both pipes so progress shows up in arrival order.
            let mut merged = out_lines.merge(err_lines);

            while let Some(item) = merged.next().await {
                match item {
                    Ok(line) => yield Ok(line),
                    Err(e) => {
                        yield Err(BuildError::OutputError(e.to_string()));
                        return;
                    }
                }
            }

            match child.wait().await {
                Ok(status) if status.success() => {}
                Ok(status) => {
                    let detail = match status.code() {
                        Some(code) => format!("exit code {code}"),
                        None => "signal".to_string(),
                    };
                    yield Err(BuildError::Failed(detail));
                }
                Err(e) => {
                    yield Err(BuildError::OutputError(e.to_string()));
                }
            }
        };

        Ok(Box::pin(stream))
    }
}
