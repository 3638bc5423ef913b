use std::path::PathBuf;
use thiserror::Error;

/// Boxed underlying cause carried by fetch failures.
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum SimoneError {
    #[error("cannot access {}", path.display())]
    FilesystemUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "backup failed while moving {} into {}; inspect both locations manually before re-running",
        path.display(),
        backup_dir.display()
    )]
    BackupFailed {
        path: PathBuf,
        backup_dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch '{remote_path}'")]
    FetchFailed {
        remote_path: String,
        #[source]
        source: Cause,
    },

    #[error("a current-edition installation is present; downgrading to the legacy edition is not supported")]
    DowngradeRefused,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SimoneError {
    pub fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SimoneError::FilesystemUnavailable {
            path: path.into(),
            source,
        }
    }

    pub fn fetch(remote_path: impl Into<String>, source: impl Into<Cause>) -> Self {
        SimoneError::FetchFailed {
            remote_path: remote_path.into(),
            source: source.into(),
        }
    }

    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, SimoneError::FetchFailed { .. })
    }
}

pub type Result<T> = std::result::Result<T, SimoneError>;
