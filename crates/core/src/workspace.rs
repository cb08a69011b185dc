//! Project root resolution.

use std::path::{Path, PathBuf};

/// Resolve the workspace root the wizard operates on.
///
/// Priority:
/// 1. Explicit path (`--root` flag / `SKILL_KIT_ROOT` env var)
/// 2. Walk upward from `start` looking for a directory holding both
///    `Cargo.toml` and `skills/`
/// 3. Fall back to `start`
///
/// The double requirement keeps the walk from stopping at some unrelated
/// crate above the checkout.
pub fn resolve_root(explicit: Option<&Path>, start: &Path) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let mut dir = start.to_path_buf();
    loop {
        if dir.join("Cargo.toml").is_file() && dir.join("skills").is_dir() {
            return dir;
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }

    start.to_path_buf()
}

/// Resolve the root from the current working directory.
pub fn resolve_root_from_cwd(explicit: Option<&Path>) -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_root(explicit, &cwd)
}
