//! Skill installation into the deploy directory.
//!
//! Deploying a skill produces this layout under
//! `<skills folder>/<skill folder name>`:
//!
//! ```text
//! <deploy dir>/
//! ├── bin/
//! │   ├── <binary>        built artifact, when the skill has a build step
//! │   └── .env            configured variable values
//! ├── SKILL.md            rendered docs, when a template exists
//! ├── run.sh              wrapper script, when deploy.wrapper is set
//! └── ...                 extra files from deploy.files
//! ```
//!
//! The `.env` sits next to the binary because the deployed CLIs load their
//! environment from the executable's own directory.

use crate::deploy::error::{DeployError, DeployResult};
use chrono::Utc;
use sk_protocol::manifest::{DocsConfig, Manifest};
use sk_protocol::report::DeployReport;
use std::collections::BTreeMap;
use std::path::Path;
use walkdir::WalkDir;

/// Installs a skill into `deploy_dir`.
///
/// Expects the build step (if any) to have completed already; the artifact
/// is taken from `<root>/target/release/`.
///
/// # Errors
///
/// Returns `DeployError` when the artifact is missing, a configured source
/// file does not exist, or any filesystem operation fails. A partially
/// written deploy directory is left in place for inspection.
pub fn deploy_skill(
    root: &Path,
    manifest: &Manifest,
    deploy_dir: &Path,
    values: &BTreeMap<String, String>,
) -> DeployResult<DeployReport> {
    let bin_dir = deploy_dir.join("bin");
    create_dir(&bin_dir)?;

    let mut files_copied = 0;

    // Built binary, made executable.
    let mut binary = None;
    if manifest.build.is_some() {
        let name = manifest.binary_name();
        let artifact = root.join("target").join("release").join(name);
        if !artifact.is_file() {
            return Err(DeployError::MissingArtifact { path: artifact });
        }

        let target = bin_dir.join(name);
        copy_file(&artifact, &target)?;
        make_executable(&target)?;
        files_copied += 1;
        binary = Some(name.to_string());
    }

    // Configured environment, next to the binary.
    let env_path = bin_dir.join(".env");
    write_file(&env_path, &render_env(manifest, values))?;
    files_copied += 1;

    // Extra files from the manifest.
    if let Some(deploy) = &manifest.deploy {
        for file in &deploy.files {
            let source = manifest.path.join(&file.source);
            let target = deploy_dir.join(&file.target);
            files_copied += copy_entry(&source, &target)?;
        }
    }

    // Rendered documentation.
    files_copied += render_docs(manifest, deploy_dir, values)?;

    // Wrapper script.
    if manifest.deploy.as_ref().is_some_and(|d| d.wrapper) {
        let wrapper = deploy_dir.join("run.sh");
        write_file(&wrapper, &render_wrapper(manifest))?;
        make_executable(&wrapper)?;
        files_copied += 1;
    }

    Ok(DeployReport {
        skill: manifest.name.clone(),
        deploy_dir: deploy_dir.to_path_buf(),
        binary,
        files_copied,
        finished_at: Utc::now(),
    })
}

/// Whether a previous deployment of this skill is already present.
///
/// Keys off the binary path, the one file every built deployment has.
pub fn skill_exists(manifest: &Manifest, deploy_dir: &Path) -> bool {
    deploy_dir.join("bin").join(manifest.binary_name()).exists()
}

/// Renders the `.env` contents, one line per configured variable.
///
/// Variables keep their manifest order. Empty values are dropped so unset
/// optional variables never shadow the process environment with blanks.
pub fn render_env(manifest: &Manifest, values: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for variable in &manifest.variables {
        if let Some(value) = values.get(&variable.name) {
            if value.is_empty() {
                continue;
            }
            out.push_str(&variable.name);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
    }
    out
}

/// Renders the docs template, when one applies. Returns the number of files
/// written (0 or 1).
fn render_docs(
    manifest: &Manifest,
    deploy_dir: &Path,
    values: &BTreeMap<String, String>,
) -> DeployResult<usize> {
    let docs = manifest.docs.clone().unwrap_or_default();
    let template_path = manifest.path.join(&docs.template);

    if !template_path.is_file() {
        // An explicitly configured template must exist; the default one is
        // optional.
        if manifest.docs.is_some() {
            return Err(DeployError::MissingTemplate {
                path: template_path,
            });
        }
        return Ok(0);
    }

    let template =
        std::fs::read_to_string(&template_path).map_err(|source| DeployError::FileRead {
            path: template_path,
            source,
        })?;

    let rendered = render_template(&template, manifest, values);
    write_file(&deploy_dir.join(&docs.output), &rendered)?;
    Ok(1)
}

/// Substitutes `{{NAME}}` placeholders from the variable values plus the
/// builtin skill fields.
fn render_template(
    template: &str,
    manifest: &Manifest,
    values: &BTreeMap<String, String>,
) -> String {
    let mut rendered = template.to_string();
    for (name, value) in values {
        rendered = rendered.replace(&format!("{{{{{name}}}}}"), value);
    }
    rendered = rendered.replace("{{SKILL_NAME}}", &manifest.name);
    rendered = rendered.replace("{{SKILL_DESCRIPTION}}", manifest.display_description());
    rendered = rendered.replace("{{VERSION}}", &manifest.version);
    rendered = rendered.replace("{{BINARY}}", manifest.binary_name());
    rendered
}

fn render_wrapper(manifest: &Manifest) -> String {
    let binary = manifest.binary_name();
    format!(
        "#!/usr/bin/env bash\n\
         # Launch {binary} with its bundled environment.\n\
         DIR=\"$(cd \"$(dirname \"$0\")\" && pwd)\"\n\
         set -a\n\
         [ -f \"$DIR/bin/.env\" ] && . \"$DIR/bin/.env\"\n\
         set +a\n\
         exec \"$DIR/bin/{binary}\" \"$@\"\n"
    )
}

/// Copies a file or directory into the deploy directory, returning the
/// number of files written.
fn copy_entry(source: &Path, target: &Path) -> DeployResult<usize> {
    if source.is_file() {
        copy_file(source, target)?;
        return Ok(1);
    }

    if !source.is_dir() {
        return Err(DeployError::MissingSource {
            path: source.to_path_buf(),
        });
    }

    let mut copied = 0;
    for entry in WalkDir::new(source).into_iter() {
        let entry = entry.map_err(|source_err| DeployError::DirectoryWalk {
            path: source.to_path_buf(),
            source: source_err,
        })?;

        let rel = match entry.path().strip_prefix(source) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        let dst = target.join(rel);

        if entry.file_type().is_dir() {
            create_dir(&dst)?;
        } else {
            copy_file(entry.path(), &dst)?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn create_dir(path: &Path) -> DeployResult<()> {
    std::fs::create_dir_all(path).map_err(|source| DeployError::DirectoryCreate {
        path: path.to_path_buf(),
        source,
    })
}

fn copy_file(from: &Path, to: &Path) -> DeployResult<()> {
    if let Some(parent) = to.parent() {
        create_dir(parent)?;
    }
    std::fs::copy(from, to).map_err(|source| DeployError::FileCopy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn write_file(path: &Path, content: &str) -> DeployResult<()> {
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }
    std::fs::write(path, content).map_err(|source| DeployError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(unix)]
fn make_executable(path: &Path) -> DeployResult<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).map_err(|source| {
        DeployError::FileWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> DeployResult<()> {
    Ok(())
}
