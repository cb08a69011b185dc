//! The `skillkit` binary.
//!
//! Without a subcommand this launches the deploy wizard; `skillkit new`
//! scaffolds a skill crate without entering the TUI.

use clap::{Parser, Subcommand};
use colored::Colorize;
use sk_core::scaffold::{scaffold_skill, ScaffoldOptions};
use sk_core::workspace::resolve_root_from_cwd;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "skillkit",
    about = "Build and deploy agent skills from one workspace",
    version
)]
struct Cli {
    /// Workspace root (default: walk upward from the working directory)
    #[arg(long, global = true, env = "SKILL_KIT_ROOT")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scaffold a new skill under skills/<name>
    New {
        /// Skill name: a lowercase letter, then lowercase letters, digits,
        /// `-` or `_`
        name: String,

        /// Write into the directory even if it already exists
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    match cli.command {
        // Bare `skillkit` launches the wizard.
        None => sk_tui::run_app(cli.root)
            .await
            .map_err(|e| color_eyre::eyre::eyre!(e)),
        Some(Command::New { name, force }) => new_skill(cli.root, name, force).await,
    }
}

async fn new_skill(root: Option<PathBuf>, name: String, force: bool) -> color_eyre::Result<()> {
    let root = resolve_root_from_cwd(root.as_deref());

    let options = ScaffoldOptions { root, name, force };
    let report = scaffold_skill(&options).await?;

    println!(
        "{} {}",
        "Created".green().bold(),
        report.skill_dir.display()
    );
    for file in &report.files {
        println!("   {}", file.display());
    }
    if report.member_added {
        println!(
            "{} skills/{} in the workspace members",
            "Registered".green().bold(),
            options.name
        );
    }
    println!();
    println!(
        "Edit {} to declare variables, then run {} to deploy.",
        "skill.yaml".cyan(),
        "skillkit".cyan()
    );

    Ok(())
}
