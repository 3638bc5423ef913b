use crate::error::Result;
use crate::io::path_exists;
use crate::paths::{CURRENT_MARKERS, LEGACY_MARKERS};
use crate::types::InstallationState;
use std::path::Path;

/// Determine which edition, if any, is installed under `root`.
///
/// A current marker wins over legacy markers, since a current installation may
/// still carry legacy-shaped subdirectories. Read-only.
pub fn classify(root: &Path) -> Result<InstallationState> {
    let state = if any_present(root, &CURRENT_MARKERS)? {
        InstallationState::Current
    } else if any_present(root, &LEGACY_MARKERS)? {
        InstallationState::Legacy
    } else {
        InstallationState::Absent
    };
    tracing::info!(root = %root.display(), %state, "classified installation");
    Ok(state)
}

fn any_present(root: &Path, markers: &[&str]) -> Result<bool> {
    for marker in markers {
        if path_exists(&root.join(marker))? {
            tracing::debug!(marker, "marker present");
            return Ok(true);
        }
    }
    Ok(false)
}
