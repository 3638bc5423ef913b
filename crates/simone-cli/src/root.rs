use std::path::{Path, PathBuf};

/// Resolve the project root to install into.
///
/// Priority:
/// 1. `--root` flag / `SIMONE_ROOT` env var (passed in as `explicit`)
/// 2. The current directory
///
/// There is no upward search: running inside a subfolder installs into that
/// subfolder, never into an ancestor that happens to hold `.simone/`.
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
