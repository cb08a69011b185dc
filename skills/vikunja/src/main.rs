//! The `vikunja` binary.

use clap::{Parser, Subcommand};
use skill_vikunja::client::{self, ApiClient};
use skill_vikunja::{label, output, project, task};

#[derive(Parser)]
#[command(
    name = "vikunja",
    about = "Vikunja task management with lean JSON output",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage tasks
    Task {
        #[command(subcommand)]
        command: task::TaskCommand,
    },

    /// Manage projects
    Project {
        #[command(subcommand)]
        command: project::ProjectCommand,
    },

    /// Manage labels
    Label {
        #[command(subcommand)]
        command: label::LabelCommand,
    },
}

#[tokio::main]
async fn main() {
    client::load_env();
    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        output::print_error(&e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Built after parsing, so --help works without the environment set up.
    let client = ApiClient::from_env()?;

    match cli.command {
        Command::Task { command } => task::run(&client, command).await,
        Command::Project { command } => project::run(&client, command).await,
        Command::Label { command } => label::run(&client, command).await,
    }
}

/// Logs go to stderr; stdout carries nothing but result JSON.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
