//! # sk-tui
//!
//! Terminal wizard for skill-kit.
//!
//! Discovers the skills in the workspace, walks the user through a
//! configure/confirm/deploy flow, and streams build output while `sk-core`
//! does the work. The two sides talk over channels using the `Op` and
//! `Event` protocol defined in `sk-protocol`.

pub mod app;
pub mod tui;
pub mod widgets;

pub use app::App;
pub use tui::Tui;

use anyhow::Result;
use sk_core::build::CargoBuilder;
use sk_core::config::{settings_path, SettingsStore};
use sk_core::session::SessionHandle;
use sk_core::skill::discover_skills;
use sk_core::workspace::resolve_root_from_cwd;
use sk_protocol::ipc::Op;
use std::path::PathBuf;

/// Runs the deploy wizard until the user quits.
///
/// Discovery happens before the terminal enters raw mode, so a broken
/// workspace reports its error as a plain message instead of garbling the
/// screen. `root` overrides root resolution; without it the `SKILL_KIT_ROOT`
/// environment variable is honored, then the upward walk from the working
/// directory.
pub async fn run_app(root: Option<PathBuf>) -> Result<()> {
    let explicit = root.or_else(|| std::env::var_os("SKILL_KIT_ROOT").map(PathBuf::from));
    let root = resolve_root_from_cwd(explicit.as_deref());

    let discovered = discover_skills(&root).await?;
    let settings = settings_path().map(SettingsStore::new);

    let SessionHandle {
        op_tx,
        event_rx,
        task,
    } = SessionHandle::spawn(CargoBuilder::new());

    let mut app = App::new(
        root,
        env!("CARGO_PKG_VERSION").to_string(),
        discovered,
        settings,
        op_tx.clone(),
        event_rx,
    );

    let mut tui = Tui::init()?;
    let run_result = app.run(&mut tui).await;

    // Stop the core task before giving the terminal back.
    let _ = op_tx.send(Op::Shutdown);
    let _ = task.await;
    tui.restore()?;

    run_result
}
