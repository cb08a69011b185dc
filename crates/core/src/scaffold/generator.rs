//! New-skill generation under `skills/<name>/`.

use super::error::{ScaffoldError, ScaffoldResult};
use super::templates::{get_template, list_templates};
use std::fs;
use std::path::{Path, PathBuf};

/// Placeholder substituted with the skill name in template paths and
/// contents.
const NAME_PLACEHOLDER: &str = "__SKILL_NAME__";

/// Options for scaffolding a new skill.
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    /// Workspace root containing `skills/` and the workspace `Cargo.toml`.
    pub root: PathBuf,

    /// Name of the new skill. Becomes the directory name, the manifest name,
    /// and (prefixed with `skill-`) the cargo package name.
    pub name: String,

    /// Overwrite an existing skill directory.
    pub force: bool,
}

/// Outcome of a scaffold run, for the CLI to report.
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    /// Directory the skill was generated into.
    pub skill_dir: PathBuf,

    /// Files written, relative to the skill directory.
    pub files: Vec<PathBuf>,

    /// Whether the workspace members list gained an entry.
    pub member_added: bool,
}

/// Generate a new skill from the embedded templates.
///
/// This creates the following structure:
/// ```text
/// skills/<name>/
/// ├── Cargo.toml
/// ├── skill.yaml
/// ├── SKILL.md.tmpl
/// └── src/
///     └── main.rs
/// ```
/// and registers `skills/<name>` in the workspace members list when it is
/// not already there.
///
/// # Errors
///
/// Returns a `ScaffoldError` if:
/// - The name is not usable as a directory and crate name
/// - The skill directory already exists (without the force flag)
/// - A template is missing or a file system operation fails
/// - The workspace manifest cannot be parsed or has no members array
pub async fn scaffold_skill(options: &ScaffoldOptions) -> ScaffoldResult<ScaffoldReport> {
    validate_name(&options.name)?;

    let skill_dir = options.root.join("skills").join(&options.name);
    if skill_dir.exists() && !options.force {
        return Err(ScaffoldError::DirectoryExists(skill_dir));
    }

    let template_paths = list_templates("skill/");
    let mut files = Vec::with_capacity(template_paths.len());

    for template_path in &template_paths {
        let content = get_template(template_path)
            .ok_or_else(|| ScaffoldError::TemplateNotFound(template_path.clone()))?;

        let rel = template_path
            .strip_prefix("skill/")
            .unwrap_or(template_path)
            .replace(NAME_PLACEHOLDER, &options.name);
        let target = skill_dir.join(&rel);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| ScaffoldError::DirectoryCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&target, content.replace(NAME_PLACEHOLDER, &options.name)).map_err(
            |source| ScaffoldError::FileWrite {
                path: target.clone(),
                source,
            },
        )?;

        files.push(PathBuf::from(rel));
    }

    let member_added =
        register_workspace_member(&options.root, &format!("skills/{}", options.name))?;

    Ok(ScaffoldReport {
        skill_dir,
        files,
        member_added,
    })
}

/// Skill names double as directory names and crate name suffixes.
fn validate_name(name: &str) -> ScaffoldResult<()> {
    let mut chars = name.chars();
    let valid_start = chars.next().is_some_and(|c| c.is_ascii_lowercase());
    let valid_rest =
        chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');

    if valid_start && valid_rest {
        Ok(())
    } else {
        Err(ScaffoldError::InvalidName(name.to_string()))
    }
}

/// Adds `member` to the workspace members array when missing.
///
/// Returns whether an entry was added. The members check parses the
/// manifest; the insertion itself is textual so comments and formatting in
/// the workspace Cargo.toml survive.
fn register_workspace_member(root: &Path, member: &str) -> ScaffoldResult<bool> {
    let manifest_path = root.join("Cargo.toml");

    let content =
        fs::read_to_string(&manifest_path).map_err(|source| ScaffoldError::WorkspaceRead {
            path: manifest_path.clone(),
            source,
        })?;

    let manifest: toml::Value =
        toml::from_str(&content).map_err(|source| ScaffoldError::WorkspaceParse {
            path: manifest_path.clone(),
            source,
        })?;

    let members = manifest
        .get("workspace")
        .and_then(|w| w.get("members"))
        .and_then(|m| m.as_array())
        .ok_or_else(|| ScaffoldError::MembersNotFound {
            path: manifest_path.clone(),
        })?;

    if members.iter().any(|m| m.as_str() == Some(member)) {
        return Ok(false);
    }

    let open = content
        .find("members")
        .and_then(|at| content[at..].find('[').map(|rel| at + rel))
        .ok_or_else(|| ScaffoldError::MembersNotFound {
            path: manifest_path.clone(),
        })?;
    let close = content[open..]
        .find(']')
        .map(|rel| open + rel)
        .ok_or_else(|| ScaffoldError::MembersNotFound {
            path: manifest_path.clone(),
        })?;

    let mut updated = String::with_capacity(content.len() + member.len() + 16);
    updated.push_str(&content[..close]);
    // Keep the one-entry-per-line layout of the members array.
    if !updated.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str(&format!("    \"{member}\",\n"));
    updated.push_str(&content[close..]);

    // A bad splice must never reach disk.
    toml::from_str::<toml::Value>(&updated).map_err(|source| ScaffoldError::WorkspaceParse {
        path: manifest_path.clone(),
        source,
    })?;

    fs::write(&manifest_path, updated).map_err(|source| ScaffoldError::FileWrite {
        path: manifest_path,
        source,
    })?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const WORKSPACE_MANIFEST: &str = r#"[workspace]
members = [
    "crates/core",
]
resolver = "2"

[workspace.package]
version = "0.1.0"
edition = "2021"
"#;

    fn workspace_fixture() -> tempfile::TempDir {
        let dir = tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join("Cargo.toml"), WORKSPACE_MANIFEST)
            .expect("Failed to write workspace manifest");
        fs::create_dir_all(dir.path().join("skills")).expect("Failed to create skills dir");
        dir
    }

    fn options(root: &Path, name: &str, force: bool) -> ScaffoldOptions {
        ScaffoldOptions {
            root: root.to_path_buf(),
            name: name.to_string(),
            force,
        }
    }

    #[tokio::test]
    async fn test_scaffold_creates_skill_files() {
        let dir = workspace_fixture();

        let report = scaffold_skill(&options(dir.path(), "weather", false))
            .await
            .expect("Scaffold failed");

        let skill_dir = dir.path().join("skills/weather");
        assert_eq!(report.skill_dir, skill_dir);
        assert_eq!(report.files.len(), 4);

        // Substitution applied in contents.
        let manifest = fs::read_to_string(skill_dir.join("skill.yaml")).unwrap();
        assert!(manifest.contains("name: weather"));
        assert!(manifest.contains("package: skill-weather"));

        let cargo = fs::read_to_string(skill_dir.join("Cargo.toml")).unwrap();
        assert!(cargo.contains("name = \"skill-weather\""));

        let main_rs = fs::read_to_string(skill_dir.join("src/main.rs")).unwrap();
        assert!(main_rs.contains("weather is ready"));

        // Deploy-time placeholders stay untouched.
        let docs = fs::read_to_string(skill_dir.join("SKILL.md.tmpl")).unwrap();
        assert!(docs.contains("{{SKILL_NAME}}"));
    }

    #[tokio::test]
    async fn test_scaffolded_manifest_loads() {
        let dir = workspace_fixture();

        scaffold_skill(&options(dir.path(), "weather", false))
            .await
            .expect("Scaffold failed");

        let manifest = crate::skill::load_manifest(&dir.path().join("skills/weather"))
            .expect("Generated manifest should load");
        assert_eq!(manifest.name, "weather");
        assert_eq!(
            manifest.build.as_ref().map(|b| b.package.as_str()),
            Some("skill-weather")
        );
    }

    #[tokio::test]
    async fn test_scaffold_registers_workspace_member() {
        let dir = workspace_fixture();

        let report = scaffold_skill(&options(dir.path(), "weather", false))
            .await
            .expect("Scaffold failed");
        assert!(report.member_added);

        let manifest = fs::read_to_string(dir.path().join("Cargo.toml")).unwrap();
        assert!(manifest.contains("\"skills/weather\""));
        // Formatting and the sections below the members array survive.
        assert!(manifest.contains("resolver = \"2\""));
        assert!(manifest.contains("[workspace.package]"));

        // Still valid TOML with both members present.
        let parsed: toml::Value = toml::from_str(&manifest).unwrap();
        let members = parsed["workspace"]["members"].as_array().unwrap();
        assert_eq!(members.len(), 2);
    }

    #[tokio::test]
    async fn test_scaffold_registration_is_idempotent() {
        let dir = workspace_fixture();

        scaffold_skill(&options(dir.path(), "weather", false))
            .await
            .expect("Scaffold failed");
        let report = scaffold_skill(&options(dir.path(), "weather", true))
            .await
            .expect("Re-scaffold failed");

        assert!(!report.member_added);

        let manifest = fs::read_to_string(dir.path().join("Cargo.toml")).unwrap();
        assert_eq!(manifest.matches("\"skills/weather\"").count(), 1);
    }

    #[tokio::test]
    async fn test_scaffold_existing_dir_without_force() {
        let dir = workspace_fixture();
        fs::create_dir_all(dir.path().join("skills/weather")).unwrap();

        let result = scaffold_skill(&options(dir.path(), "weather", false)).await;
        assert!(matches!(result, Err(ScaffoldError::DirectoryExists(_))));
    }

    #[tokio::test]
    async fn test_scaffold_rejects_bad_names() {
        let dir = workspace_fixture();

        for bad in ["", "Weather", "1weather", "my skill", "../escape"] {
            let result = scaffold_skill(&options(dir.path(), bad, false)).await;
            assert!(
                matches!(result, Err(ScaffoldError::InvalidName(_))),
                "name {bad:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_scaffold_without_members_array_fails() {
        let dir = tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join("Cargo.toml"), "[package]\nname = \"solo\"\n")
            .expect("Failed to write manifest");

        let result = scaffold_skill(&options(dir.path(), "weather", false)).await;
        assert!(matches!(result, Err(ScaffoldError::MembersNotFound { .. })));
    }
}
