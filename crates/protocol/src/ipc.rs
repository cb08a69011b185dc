//! Inter-task communication protocol.
//!
//! This module defines the message types for asynchronous communication
//! between the TUI (user interface) and the Core (build and deploy logic).
//!
//! The protocol follows an Operation/Event pattern:
//! - `Op`: Commands sent from TUI to Core
//! - `Event`: Status updates sent from Core to TUI
//!
//! Communication is channel-based so the UI stays responsive while the core
//! runs the build and copies files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::manifest::Manifest;
use crate::report::DeployReport;

/// Operations sent from the UI (TUI) to the Core logic.
///
/// Uses tagged enum serialization:
/// ```json
/// {
///   "type": "startDeploy",
///   "payload": {
///     "deploy_dir": "/home/user/.claude/skills/vikunja",
///     "values": { "VIKUNJA_URL": "https://..." }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Op {
    /// Build the skill's binary and deploy it with the given values.
    ///
    /// Ops are processed sequentially, so only one deploy runs at a time.
    StartDeploy {
        /// Workspace root the build runs from.
        root: PathBuf,
        /// Manifest of the skill being deployed.
        manifest: Manifest,
        /// Target directory, `<skills folder>/<skill folder name>`.
        deploy_dir: PathBuf,
        /// Configured variable values, keyed by variable name.
        values: BTreeMap<String, String>,
    },

    /// Shut down the core task.
    Shutdown,
}

/// Events sent from the Core logic to the UI (TUI).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// The build step has started.
    BuildStarted { skill: String },

    /// The build produced a line of output.
    ///
    /// The TUI should append this to the build log display.
    BuildOutput { line: String },

    /// The build failed; no deploy was attempted.
    BuildFailed { message: String },

    /// Build and deploy both finished successfully.
    DeployFinished { report: DeployReport },

    /// The build succeeded but the deploy step failed.
    DeployFailed { message: String },
}
