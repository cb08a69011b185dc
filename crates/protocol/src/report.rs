//! Deploy result models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Summary of a completed deployment, shown on the wizard's Done screen.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DeployReport {
    /// Skill that was deployed.
    pub skill: String,

    /// Directory the skill was installed into.
    pub deploy_dir: PathBuf,

    /// Binary placed under `bin/`, if the skill has a build step.
    pub binary: Option<String>,

    /// Number of files written, the binary and `.env` included.
    pub files_copied: usize,

    pub finished_at: DateTime<Utc>,
}
