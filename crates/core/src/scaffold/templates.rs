//! Embedded template files for skill scaffolding.
//!
//! This module uses `rust-embed` to embed the template files from the
//! workspace root `templates/` directory into the binary at compile time, so
//! `skillkit new` works without external file dependencies.

use rust_embed::RustEmbed;

/// Embedded template files from the `templates/` directory.
///
/// The path is calculated relative to the crate root:
/// - `CARGO_MANIFEST_DIR` = `crates/core`
/// - `../../templates` = workspace root `templates/`
///
/// With the `debug-embed` feature the files are compiled in even for debug
/// builds, so behavior never depends on where the binary runs from.
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../templates"]
pub struct TemplateAssets;

/// Get template file content by path.
///
/// # Arguments
/// * `path` - Relative path from templates root (e.g., "skill/skill.yaml")
///
/// # Returns
/// The file content as a String, or None if the file doesn't exist.
pub fn get_template(path: &str) -> Option<String> {
    TemplateAssets::get(path).map(|file| String::from_utf8_lossy(file.data.as_ref()).to_string())
}

/// List all template files under a prefix.
///
/// # Arguments
/// * `prefix` - Directory prefix (e.g., "skill/")
pub fn list_templates(prefix: &str) -> Vec<String> {
    let mut paths: Vec<String> = TemplateAssets::iter()
        .filter(|path| path.starts_with(prefix))
        .map(|path| path.to_string())
        .collect();
    paths.sort();
    paths
}
