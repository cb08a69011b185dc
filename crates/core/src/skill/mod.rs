//! Skill manifest loading and discovery.

pub mod discovery;
pub mod error;

pub use discovery::{discover_skills, load_manifest, DiscoveredSkills, SkillError, MANIFEST_FILE};
pub use error::{ManifestError, ManifestResult};
