//! The `habitwire` binary.

use clap::{Parser, Subcommand};
use skill_habitwire::client::{self, ApiClient};
use skill_habitwire::system::ExportFormat;
use skill_habitwire::{key, output, system};

#[derive(Parser)]
#[command(
    name = "habitwire",
    about = "HabitWire key management and data export",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage API keys
    Key {
        #[command(subcommand)]
        command: key::KeyCommand,
    },

    /// Check API health status
    Health,

    /// Export all habits, categories, and check-ins
    Export {
        #[arg(long, short = 'f', value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
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
        Command::Key { command } => key::run(&client, command).await,
        Command::Health => system::health(&client).await,
        Command::Export { format } => system::export(&client, format).await,
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
