//! Skill manifest models for `skills/*/skill.yaml`.
//!
//! This module defines the structure of the manifest file that describes a
//! skill: the variables its deployment needs, how to build its binary, and
//! which extra files land in the deploy directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How a variable's value is entered and written to the `.env` file.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    /// Plain text input.
    #[default]
    String,

    /// Masked input. The value is still written to `.env` in plain text;
    /// masking only affects the wizard display.
    Secret,

    /// A JSON fragment, written verbatim to `.env`.
    Json,
}

/// A single configurable value a skill needs at deploy time.
///
/// Variables become input fields in the wizard's configure form and lines in
/// the generated `.env` file.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Variable {
    /// Environment variable name, e.g. `VIKUNJA_URL`.
    pub name: String,

    /// Human-readable form label. Falls back to `name` when empty.
    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub description: String,

    /// Required variables must be non-empty before the wizard proceeds.
    #[serde(default)]
    pub required: bool,

    /// Ghost text shown in an empty input field.
    #[serde(default)]
    pub placeholder: String,

    /// Suggested value, surfaced as a placeholder. Never pre-filled so the
    /// user always makes an explicit choice.
    #[serde(default)]
    pub default: String,

    #[serde(rename = "type", default)]
    pub kind: VariableKind,
}

impl Variable {
    /// Label to display in the form, falling back to the variable name.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }
}

/// How to produce the skill's binary.
///
/// The build runs `cargo build --release -p <package>` from the workspace
/// root; the resulting artifact is picked up from `target/release/`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BuildConfig {
    /// Cargo package to build.
    pub package: String,

    /// Artifact name under `target/release/`, when it differs from the
    /// skill name.
    #[serde(default)]
    pub binary: Option<String>,
}

/// A file or directory copied into the deploy directory.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DeployFile {
    /// Path relative to the skill directory. Directories copy recursively.
    pub source: String,

    /// Path relative to the deploy directory.
    pub target: String,
}

/// Extra deployment outputs beyond the binary itself.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct DeployConfig {
    #[serde(default)]
    pub files: Vec<DeployFile>,

    /// Emit a `run.sh` wrapper that loads `.env` and execs the binary.
    #[serde(default)]
    pub wrapper: bool,
}

/// Documentation rendering configuration.
///
/// The template is rendered with `{{NAME}}` placeholders substituted from
/// the configured variable values and written into the deploy directory.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DocsConfig {
    /// Template path relative to the skill directory.
    #[serde(default = "DocsConfig::default_template")]
    pub template: String,

    /// Output path relative to the deploy directory.
    #[serde(default = "DocsConfig::default_output")]
    pub output: String,
}

impl DocsConfig {
    fn default_template() -> String {
        "SKILL.md.tmpl".to_string()
    }

    fn default_output() -> String {
        "SKILL.md".to_string()
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            template: Self::default_template(),
            output: Self::default_output(),
        }
    }
}

/// A skill's manifest, loaded from `skill.yaml` in its directory.
///
/// # Example
///
/// ```yaml
/// name: vikunja
/// description: Vikunja task management CLI
/// version: 0.1.0
/// variables:
///   - name: VIKUNJA_URL
///     label: Vikunja API URL
///     required: true
///     placeholder: https://vikunja.example.com/api/v1
///   - name: VIKUNJA_TOKEN
///     label: API Token
///     required: true
///     type: secret
/// build:
///   package: skill-vikunja
///   binary: vikunja
/// deploy:
///   wrapper: true
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Manifest {
    /// Unique name identifying this skill.
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Longer description used in generated docs. Falls back to
    /// `description` when absent.
    #[serde(default)]
    pub skill_description: String,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub variables: Vec<Variable>,

    /// Build step. Skills without one deploy files only.
    #[serde(default)]
    pub build: Option<BuildConfig>,

    #[serde(default)]
    pub deploy: Option<DeployConfig>,

    #[serde(default)]
    pub docs: Option<DocsConfig>,

    /// Directory the manifest was loaded from. Set by the loader, never
    /// read from YAML.
    #[serde(skip)]
    pub path: PathBuf,
}

impl Manifest {
    /// Description used in generated documentation.
    pub fn display_description(&self) -> &str {
        if self.skill_description.is_empty() {
            &self.description
        } else {
            &self.skill_description
        }
    }

    /// Name of the built artifact under `target/release/`.
    pub fn binary_name(&self) -> &str {
        self.build
            .as_ref()
            .and_then(|b| b.binary.as_deref())
            .unwrap_or(&self.name)
    }

    pub fn required_variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter().filter(|v| v.required)
    }

    pub fn optional_variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter().filter(|v| !v.required)
    }
}
