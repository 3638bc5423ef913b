use crate::error::{Result, SimoneError};
use crate::remote::ContentSource;
use crate::types::{EntryKind, RemoteEntry};
use std::collections::{BTreeMap, BTreeSet};

const SCHEME: &str = "mem://";

/// In-memory content host keyed by `/`-separated file path.
#[derive(Default)]
pub struct MemorySource {
    files: BTreeMap<String, Vec<u8>>,
    failing: BTreeSet<String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.as_bytes().to_vec());
        self
    }

    /// Make listing or downloading `path` fail.
    pub fn failing(mut self, path: &str) -> Self {
        self.failing.insert(path.to_string());
        self
    }

    fn check(&self, path: &str) -> Result<()> {
        if self.failing.contains(path) {
            return Err(SimoneError::fetch(path, "injected failure"));
        }
        Ok(())
    }
}

impl ContentSource for MemorySource {
    fn list_dir(&self, remote_path: &str) -> Result<Vec<RemoteEntry>> {
        self.check(remote_path)?;
        let prefix = format!("{}/", remote_path.trim_matches('/'));
        let mut seen_dirs = BTreeSet::new();
        let mut entries = Vec::new();
        for path in self.files.keys() {
            let Some(rest) = path.strip_prefix(&prefix) else {
                continue;
            };
            match rest.split_once('/') {
                Some((dir, _)) => {
                    if seen_dirs.insert(dir.to_string()) {
                        entries.push(RemoteEntry {
                            name: dir.to_string(),
                            kind: EntryKind::Directory,
                            path: format!("{prefix}{dir}"),
                            download: None,
                        });
                    }
                }
                None => entries.push(RemoteEntry {
                    name: rest.to_string(),
                    kind: EntryKind::File,
                    path: path.clone(),
                    download: Some(format!("{SCHEME}{path}")),
                }),
            }
        }
        if entries.is_empty() {
            return Err(SimoneError::fetch(remote_path, "404 Not Found"));
        }
        Ok(entries)
    }

    fn file_reference(&self, remote_path: &str) -> String {
        format!("{SCHEME}{}", remote_path.trim_matches('/'))
    }

    fn fetch_raw(&self, reference: &str) -> Result<Vec<u8>> {
        let path = reference.strip_prefix(SCHEME).unwrap_or(reference);
        self.check(path)?;
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| SimoneError::fetch(path, "404 Not Found"))
    }
}
