//! Persisted user settings for `~/.skill-kit/config.json`.

use serde::{Deserialize, Serialize};

/// Settings remembered between wizard runs.
///
/// # Example
///
/// ```json
/// { "skills_folder": "/home/user/.claude/skills" }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSettings {
    /// Last skills folder the user deployed into. Pre-fills the wizard's
    /// Skills Folder field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills_folder: Option<String>,
}
