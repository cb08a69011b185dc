//! Skill scaffolding from embedded templates.

pub mod error;
pub mod generator;
pub mod templates;

pub use error::{ScaffoldError, ScaffoldResult};
pub use generator::{scaffold_skill, ScaffoldOptions, ScaffoldReport};
pub use templates::TemplateAssets;
