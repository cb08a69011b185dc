//! Standalone entry point for the wizard, without the `skillkit` CLI around
//! it.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    sk_tui::run_app(None).await
}
