use crate::error::{Result, SimoneError};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write `data` to `path` using a tempfile in the same directory.
/// A failed download never leaves a truncated file behind.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    ensure_dir(dir)?;
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| SimoneError::fs(dir, e))?;
    tmp.write_all(data).map_err(|e| SimoneError::fs(path, e))?;
    tmp.persist(path)
        .map_err(|e| SimoneError::fs(path, e.error))?;
    Ok(())
}

/// Create a directory and all parents, idempotent.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| SimoneError::fs(path, e))
}

/// Existence probe that distinguishes "absent" from "cannot tell".
pub fn path_exists(path: &Path) -> Result<bool> {
    path.try_exists().map_err(|e| SimoneError::fs(path, e))
}
