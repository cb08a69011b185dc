//! Deploy step: install a built skill into its target directory.

pub mod error;
pub mod installer;

pub use error::{DeployError, DeployResult};
pub use installer::{deploy_skill, render_env, skill_exists};
