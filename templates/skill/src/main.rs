use clap::Parser;

#[derive(Parser)]
#[command(name = "__SKILL_NAME__", version, about = "__SKILL_NAME__ skill")]
struct Cli {}

fn main() {
    let _cli = Cli::parse();
    println!("__SKILL_NAME__ is ready. Add subcommands in src/main.rs.");
}
