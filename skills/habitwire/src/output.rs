//! JSON output conventions shared by all commands.

use serde::Serialize;

/// Prints a value as one line of compact JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let line = serde_json::to_string(value)?;
    println!("{line}");
    Ok(())
}

/// Prints an error as `{"error": "..."}` on stderr.
pub fn print_error(error: &anyhow::Error) {
    let payload = serde_json::json!({ "error": format!("{error:#}") });
    eprintln!("{payload}");
}
