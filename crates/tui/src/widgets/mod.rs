//! TUI widgets module.
//!
//! This module contains reusable widgets for the wizard screens.

pub mod build_log;
pub mod form;
pub mod skill_list;

pub use build_log::BuildLog;
pub use form::{SkillForm, TextField};
pub use skill_list::render_skill_list;
