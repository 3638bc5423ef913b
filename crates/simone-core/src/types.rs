use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// InstallationState
// ---------------------------------------------------------------------------

/// What is already on disk, derived from marker paths. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallationState {
    Absent,
    Legacy,
    Current,
}

impl fmt::Display for InstallationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InstallationState::Absent => "absent",
            InstallationState::Legacy => "legacy",
            InstallationState::Current => "current",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Edition
// ---------------------------------------------------------------------------

/// Directory-schema edition the user asked to install.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Edition {
    Legacy,
    Current,
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edition::Legacy => f.write_str("legacy"),
            Edition::Current => f.write_str("current"),
        }
    }
}

// ---------------------------------------------------------------------------
// Backup targets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    ManagementRoot,
    CommandRoot,
}

/// One directory to relocate, as a project-relative `/`-separated path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupTarget {
    pub kind: TargetKind,
    pub path: String,
}

/// Identifies what a backup directory holds; part of its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackupLabel {
    /// Legacy command root only (legacy re-install).
    LegacyCommands,
    /// Legacy management root and command root (migration to current).
    Legacy,
    /// Current command root only (current update).
    Commands,
}

impl BackupLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackupLabel::LegacyCommands => "legacy-commands",
            BackupLabel::Legacy => "legacy",
            BackupLabel::Commands => "commands",
        }
    }
}

impl fmt::Display for BackupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Remote entries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One item of a remote directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub name: String,
    pub kind: EntryKind,
    pub path: String,
    /// Direct-download reference; present for files only.
    pub download: Option<String>,
}
