use crate::error::{Result, SimoneError};
use crate::io::{atomic_write, ensure_dir};
use crate::remote::ContentSource;
use crate::types::EntryKind;
use serde::Serialize;
use std::path::Path;

/// Counts of what a fetch wrote locally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FetchStats {
    pub files: usize,
    pub dirs: usize,
}

impl FetchStats {
    pub fn add(&mut self, other: FetchStats) {
        self.files += other.files;
        self.dirs += other.dirs;
    }
}

/// Mirror the remote directory `remote_path` into `local_path`.
///
/// Depth-first and sequential: one subtree completes before its next sibling
/// starts. Any listing or download failure aborts the whole call. `dirs`
/// counts directories created beneath `local_path`, not `local_path` itself.
pub fn fetch_tree<S>(source: &S, remote_path: &str, local_path: &Path) -> Result<FetchStats>
where
    S: ContentSource + ?Sized,
{
    let entries = source.list_dir(remote_path)?;
    ensure_dir(local_path)?;

    let mut stats = FetchStats::default();
    for entry in entries {
        check_entry_name(&entry.name, &entry.path)?;
        let local = local_path.join(&entry.name);
        match entry.kind {
            EntryKind::Directory => {
                ensure_dir(&local)?;
                stats.dirs += 1;
                stats.add(fetch_tree(source, &entry.path, &local)?);
            }
            EntryKind::File => {
                let reference = entry
                    .download
                    .unwrap_or_else(|| source.file_reference(&entry.path));
                let data = source
                    .fetch_raw(&reference)
                    .map_err(|e| at_remote_path(e, &entry.path))?;
                atomic_write(&local, &data)?;
                tracing::debug!(remote = %entry.path, local = %local.display(), "wrote file");
                stats.files += 1;
            }
        }
    }
    Ok(stats)
}

/// Download the single file at `remote_path` to `local_path`, creating parents.
pub fn fetch_file<S>(source: &S, remote_path: &str, local_path: &Path) -> Result<()>
where
    S: ContentSource + ?Sized,
{
    let reference = source.file_reference(remote_path);
    let data = source
        .fetch_raw(&reference)
        .map_err(|e| at_remote_path(e, remote_path))?;
    atomic_write(local_path, &data)?;
    tracing::debug!(remote = remote_path, local = %local_path.display(), "wrote file");
    Ok(())
}

/// Report download failures against the repository path, not the download URL.
fn at_remote_path(err: SimoneError, remote_path: &str) -> SimoneError {
    match err {
        SimoneError::FetchFailed { source, .. } => SimoneError::FetchFailed {
            remote_path: remote_path.to_string(),
            source,
        },
        other => other,
    }
}

/// Entry names come from the remote host; never let one escape its parent.
fn check_entry_name(name: &str, remote_path: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(SimoneError::fetch(
            remote_path,
            format!("refusing unsafe entry name '{name}'"),
        ));
    }
    Ok(())
}
