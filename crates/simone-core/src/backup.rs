use crate::error::{Result, SimoneError};
use crate::io::{ensure_dir, path_exists};
use crate::paths;
use crate::types::{BackupLabel, BackupTarget};
use chrono::Local;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Highest disambiguating suffix tried before giving up on a backup name.
const MAX_SUFFIX: u32 = 99;

/// Where an installation's directories were moved to.
#[derive(Debug, Clone, Serialize)]
pub struct BackupRecord {
    pub label: BackupLabel,
    pub dir: PathBuf,
    /// Project-relative paths that were relocated, in request order.
    pub relocated: Vec<String>,
}

/// Move every existing target under `root` into a fresh backup directory
/// named with the current local time.
///
/// Returns `None` when none of the targets exist; no backup directory is
/// created in that case.
pub fn backup(
    root: &Path,
    label: BackupLabel,
    targets: &[BackupTarget],
) -> Result<Option<BackupRecord>> {
    let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    backup_at(root, label, targets, &stamp)
}

/// Same as [`backup`] with an explicit timestamp component.
///
/// A relocation failure after the backup directory was created leaves
/// already-moved targets where they are and reports `BackupFailed`.
pub fn backup_at(
    root: &Path,
    label: BackupLabel,
    targets: &[BackupTarget],
    stamp: &str,
) -> Result<Option<BackupRecord>> {
    let mut present = Vec::new();
    for target in targets {
        let src = paths::join_relative(root, &target.path);
        if path_exists(&src)? {
            present.push((target, src));
        } else {
            tracing::debug!(path = %target.path, "backup target absent, skipping");
        }
    }
    if present.is_empty() {
        return Ok(None);
    }

    let dir = create_backup_dir(root, label, stamp)?;
    let mut relocated = Vec::with_capacity(present.len());

    for (target, src) in present {
        let dest = paths::join_relative(&dir, &target.path);
        relocate(&src, &dest).map_err(|source| SimoneError::BackupFailed {
            path: src.clone(),
            backup_dir: dir.clone(),
            source,
        })?;
        tracing::debug!(from = %src.display(), to = %dest.display(), "relocated");
        relocated.push(target.path.clone());
    }

    tracing::info!(dir = %dir.display(), count = relocated.len(), "backup complete");
    Ok(Some(BackupRecord {
        label,
        dir,
        relocated,
    }))
}

/// Create a backup directory that did not exist before this call.
/// `create_dir` fails on an existing path, so a prior backup is never reused.
fn create_backup_dir(root: &Path, label: BackupLabel, stamp: &str) -> Result<PathBuf> {
    ensure_dir(root)?;
    let candidates = std::iter::once(None).chain((1..=MAX_SUFFIX).map(Some));
    for suffix in candidates {
        let dir = root.join(paths::backup_dir_name(label.as_str(), stamp, suffix));
        match std::fs::create_dir(&dir) {
            Ok(()) => return Ok(dir),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(SimoneError::fs(dir, e)),
        }
    }
    let last = root.join(paths::backup_dir_name(label.as_str(), stamp, Some(MAX_SUFFIX)));
    Err(SimoneError::BackupFailed {
        path: root.to_path_buf(),
        backup_dir: last,
        source: std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            "every candidate backup directory name is taken",
        ),
    })
}

fn relocate(src: &Path, dest: &Path) -> std::io::Result<()> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::rename(src, dest)
}
