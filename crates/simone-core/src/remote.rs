//! Read-only access to the repository host that serves framework content.

use crate::config::InstallerConfig;
use crate::error::{Result, SimoneError};
use crate::types::{EntryKind, RemoteEntry};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;

/// The two operations the installer needs from a content host.
pub trait ContentSource {
    /// List the entries directly under `remote_path`.
    fn list_dir(&self, remote_path: &str) -> Result<Vec<RemoteEntry>>;

    /// Direct-download reference for a single well-known file.
    fn file_reference(&self, remote_path: &str) -> String;

    /// Raw bytes behind a download reference.
    fn fetch_raw(&self, reference: &str) -> Result<Vec<u8>>;
}

// ---------------------------------------------------------------------------
// GitHub contents API
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ApiEntry {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    download_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Listing {
    Dir(Vec<ApiEntry>),
    Single(ApiEntry),
}

pub struct GitHubSource {
    client: Client,
    api_base: String,
    raw_base: String,
    owner: String,
    repo: String,
    branch: String,
}

impl GitHubSource {
    pub fn new(config: &InstallerConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SimoneError::Config(format!("cannot build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            raw_base: config.raw_base.trim_end_matches('/').to_string(),
            owner: config.repository.owner.clone(),
            repo: config.repository.name.clone(),
            branch: config.repository.branch.clone(),
        })
    }

    fn contents_url(&self, remote_path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base,
            self.owner,
            self.repo,
            remote_path.trim_matches('/')
        )
    }
}

impl ContentSource for GitHubSource {
    fn list_dir(&self, remote_path: &str) -> Result<Vec<RemoteEntry>> {
        let url = self.contents_url(remote_path);
        tracing::debug!(%url, "listing remote directory");

        let body = self
            .client
            .get(&url)
            .query(&[("ref", self.branch.as_str())])
            .header(ACCEPT, "application/vnd.github.v3+json")
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.bytes())
            .map_err(|e| SimoneError::fetch(remote_path, e))?;

        let listing: Listing =
            serde_json::from_slice(&body).map_err(|e| SimoneError::fetch(remote_path, e))?;
        let entries = match listing {
            Listing::Dir(entries) => entries,
            Listing::Single(entry) => {
                return Err(SimoneError::fetch(
                    remote_path,
                    format!("expected a directory listing, found {} '{}'", entry.kind, entry.path),
                ))
            }
        };

        Ok(entries
            .into_iter()
            .filter_map(|e| {
                let kind = match e.kind.as_str() {
                    "file" => EntryKind::File,
                    "dir" => EntryKind::Directory,
                    other => {
                        tracing::debug!(path = %e.path, kind = other, "skipping entry");
                        return None;
                    }
                };
                Some(RemoteEntry {
                    name: e.name,
                    kind,
                    path: e.path,
                    download: e.download_url,
                })
            })
            .collect())
    }

    fn file_reference(&self, remote_path: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.raw_base,
            self.owner,
            self.repo,
            self.branch,
            remote_path.trim_matches('/')
        )
    }

    fn fetch_raw(&self, reference: &str) -> Result<Vec<u8>> {
        tracing::debug!(%reference, "downloading");
        let bytes = self
            .client
            .get(reference)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.bytes())
            .map_err(|e| SimoneError::fetch(reference, e))?;
        Ok(bytes.to_vec())
    }
}
