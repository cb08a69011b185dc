//! JSON output conventions shared by all commands.

use serde::Serialize;

/// Prints a value as one line of compact JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let line = serde_json::to_string(value)?;
    println!("{line}");
    Ok(())
}

/// Prints an error as `{"error": "..."}` on stderr.
///
/// The alternate format flattens the whole context chain into the message.
pub fn print_error(error: &anyhow::Error) {
    let payload = serde_json::json!({ "error": format!("{error:#}") });
    eprintln!("{payload}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn error_payload_includes_context_chain() {
        let inner: anyhow::Result<()> = Err(anyhow::anyhow!("expected value at line 1"));
        let err = inner.context("failed to parse tasks").unwrap_err();

        let payload = serde_json::json!({ "error": format!("{err:#}") });
        assert_eq!(
            payload["error"],
            "failed to parse tasks: expected value at line 1"
        );
    }
}
