//! Skill discovery for the `skills/` directory.
//!
//! This module locates skill directories under `<root>/skills/`, loads their
//! `skill.yaml` manifests, and reports per-skill load failures without
//! aborting the scan. The wizard lists broken skills alongside working ones
//! so a typo in one manifest never hides the rest.

use crate::skill::error::{ManifestError, ManifestResult};
use sk_protocol::manifest::Manifest;
use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

/// Manifest file name expected in every skill directory.
pub const MANIFEST_FILE: &str = "skill.yaml";

/// A skill whose manifest could not be loaded.
///
/// Carried alongside the valid manifests so the UI can show what went wrong.
#[derive(Debug, Clone)]
pub struct SkillError {
    /// Directory name of the broken skill.
    pub name: String,
    /// The skill directory.
    pub path: std::path::PathBuf,
    /// Human-readable load failure.
    pub message: String,
}

/// Result of scanning the skills directory.
#[derive(Debug, Clone, Default)]
pub struct DiscoveredSkills {
    /// Manifests that loaded cleanly, sorted by skill directory name.
    pub skills: Vec<Manifest>,
    /// Skills whose manifest failed to load, sorted by directory name.
    pub errors: Vec<SkillError>,
}

impl DiscoveredSkills {
    /// Total number of rows the skill list shows.
    pub fn len(&self) -> usize {
        self.skills.len() + self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty() && self.errors.is_empty()
    }
}

/// Loads a single skill manifest from `<dir>/skill.yaml`.
///
/// The returned manifest has its `path` field set to `dir` so later stages
/// can resolve deploy sources relative to the skill directory.
///
/// # Errors
///
/// Returns `ManifestError` if the file is missing, unreadable, not valid
/// YAML, or fails validation (empty name, duplicate variable names).
pub fn load_manifest(dir: &Path) -> ManifestResult<Manifest> {
    let manifest_path = dir.join(MANIFEST_FILE);

    if !manifest_path.exists() {
        return Err(ManifestError::MissingManifest {
            path: dir.to_path_buf(),
        });
    }

    let content =
        std::fs::read_to_string(&manifest_path).map_err(|source| ManifestError::FileRead {
            path: manifest_path.clone(),
            source,
        })?;

    let mut manifest: Manifest =
        serde_yaml::from_str(&content).map_err(|source| ManifestError::YamlParse {
            path: manifest_path.clone(),
            source,
        })?;

    validate_manifest(&manifest, &manifest_path)?;

    manifest.path = dir.to_path_buf();
    Ok(manifest)
}

/// Scans `<root>/skills/` and loads every skill manifest found.
///
/// Directories without a `skill.yaml` are skipped silently; directories whose
/// manifest fails to load become [`SkillError`] entries. A missing `skills/`
/// directory yields an empty result rather than an error.
///
/// # Errors
///
/// Returns `ManifestError::DirectoryWalk` only when the directory listing
/// itself fails; individual manifest failures are collected, not returned.
pub async fn discover_skills(root: &Path) -> ManifestResult<DiscoveredSkills> {
    let skills_dir = root.join("skills");

    if !skills_dir.exists() {
        return Ok(DiscoveredSkills::default());
    }

    let mut discovered = DiscoveredSkills::default();

    for entry in WalkDir::new(&skills_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = entry.map_err(|source| ManifestError::DirectoryWalk {
            path: skills_dir.clone(),
            source,
        })?;

        if !entry.file_type().is_dir() {
            continue;
        }

        let dir = entry.path();

        // Directories without a manifest are not skills.
        if !dir.join(MANIFEST_FILE).exists() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();

        match load_manifest(dir) {
            Ok(manifest) => discovered.skills.push(manifest),
            Err(e) => discovered.errors.push(SkillError {
                name,
                path: dir.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    Ok(discovered)
}

fn validate_manifest(manifest: &Manifest, path: &Path) -> ManifestResult<()> {
    if manifest.name.trim().is_empty() {
        return Err(ManifestError::InvalidManifest {
            path: path.to_path_buf(),
            reason: "skill name is required".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for variable in &manifest.variables {
        if variable.name.trim().is_empty() {
            return Err(ManifestError::InvalidManifest {
                path: path.to_path_buf(),
                reason: "variable with empty name".to_string(),
            });
        }
        if !seen.insert(variable.name.as_str()) {
            return Err(ManifestError::InvalidManifest {
                path: path.to_path_buf(),
                reason: format!("duplicate variable name: {}", variable.name),
            });
        }
    }

    Ok(())
}
