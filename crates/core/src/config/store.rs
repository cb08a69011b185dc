//! Settings file reading and writing.
//!
//! Settings live at `~/.skill-kit/config.json`. Loading is deliberately
//! tolerant: a missing file, an unreadable file, or corrupt JSON all yield
//! defaults, matching the behavior users expect from a remembered-preferences
//! file.

use crate::config::error::{SettingsError, SettingsResult};
use sk_protocol::settings::UserSettings;
use std::path::{Path, PathBuf};

/// Directory under the home directory holding the settings file.
const SETTINGS_DIR: &str = ".skill-kit";

/// Settings file name.
const SETTINGS_FILE: &str = "config.json";

/// Path of the settings file, or `None` when the home directory is unknown.
pub fn settings_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

/// Loads settings from the default location, falling back to defaults on any
/// failure.
pub fn load_settings() -> UserSettings {
    match settings_path() {
        Some(path) => SettingsStore::new(path).load(),
        None => UserSettings::default(),
    }
}

/// Saves settings to the default location.
///
/// # Errors
///
/// Returns `SettingsError` when the home directory is unknown or the file
/// cannot be written.
pub fn save_settings(settings: &UserSettings) -> SettingsResult<()> {
    let path = settings_path().ok_or(SettingsError::NoHomeDir)?;
    SettingsStore::new(path).save(settings)
}

/// Settings store bound to an explicit file path.
///
/// The free functions above bind to `~/.skill-kit/config.json`; tests bind
/// to a temp directory instead.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads settings, returning defaults when the file is missing or
    /// unreadable or holds invalid JSON.
    pub fn load(&self) -> UserSettings {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return UserSettings::default(),
        };

        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Writes settings as pretty-printed JSON, creating the parent directory
    /// when needed.
    pub fn save(&self, settings: &UserSettings) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| {
                SettingsError::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                }
            })?;
        }

        let json = serde_json::to_string_pretty(settings)
            .map_err(|source| SettingsError::Serialize { source })?;

        std::fs::write(&self.path, json).map_err(|source| SettingsError::FileWrite {
            path: self.path.clone(),
            source,
        })?;

        Ok(())
    }
}
