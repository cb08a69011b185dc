//! User settings persistence.
//!
//! This module reads and writes the settings file under `~/.skill-kit/`,
//! remembering choices like the skills folder between wizard runs.

pub mod error;
pub mod store;

pub use error::{SettingsError, SettingsResult};
pub use store::{load_settings, save_settings, settings_path, SettingsStore};
