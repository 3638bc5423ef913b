use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const SIMONE_DIR: &str = ".simone";
pub const CLAUDE_COMMANDS_DIR: &str = ".claude/commands";
pub const COMMANDS_DIR: &str = ".claude/commands/simone";

pub const PROJECT_DOCS_DIR: &str = ".simone/01_PROJECT_DOCS";
pub const REQUIREMENTS_DIR: &str = ".simone/02_REQUIREMENTS";
pub const SPRINTS_DIR: &str = ".simone/03_SPRINTS";
pub const GENERAL_TASKS_DIR: &str = ".simone/04_GENERAL_TASKS";
pub const DECISIONS_DIR: &str = ".simone/05_ARCHITECTURAL_DECISIONS";
pub const STATE_OF_PROJECT_DIR: &str = ".simone/10_STATE_OF_PROJECT";
pub const TEMPLATES_DIR: &str = ".simone/99_TEMPLATES";

pub const PROJECT_MANIFEST_FILE: &str = ".simone/00_PROJECT_MANIFEST.md";
pub const CONSTITUTION_FILE: &str = ".simone/constitution.md";

pub const BACKUP_PREFIX: &str = ".simone_backup";

/// Subdirectories of the legacy management root, created on a fresh install.
pub const LEGACY_MANAGEMENT_DIRS: [&str; 7] = [
    PROJECT_DOCS_DIR,
    REQUIREMENTS_DIR,
    SPRINTS_DIR,
    GENERAL_TASKS_DIR,
    DECISIONS_DIR,
    STATE_OF_PROJECT_DIR,
    TEMPLATES_DIR,
];

/// Paths whose presence indicates a legacy-edition installation.
pub const LEGACY_MARKERS: [&str; 3] = [SPRINTS_DIR, REQUIREMENTS_DIR, PROJECT_MANIFEST_FILE];

/// Paths whose presence indicates a current-edition installation.
pub const CURRENT_MARKERS: [&str; 1] = [CONSTITUTION_FILE];

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn simone_dir(root: &Path) -> PathBuf {
    root.join(SIMONE_DIR)
}

pub fn commands_dir(root: &Path) -> PathBuf {
    root.join(COMMANDS_DIR)
}

pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(PROJECT_MANIFEST_FILE)
}

pub fn templates_dir(root: &Path) -> PathBuf {
    root.join(TEMPLATES_DIR)
}

/// Name of a backup directory for `label` at `stamp`, with an optional
/// disambiguating suffix.
pub fn backup_dir_name(label: &str, stamp: &str, suffix: Option<u32>) -> String {
    match suffix {
        Some(n) => format!("{BACKUP_PREFIX}_{label}_{stamp}-{n}"),
        None => format!("{BACKUP_PREFIX}_{label}_{stamp}"),
    }
}

/// Join a `/`-separated remote-style relative path onto a local base.
pub fn join_relative(base: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .fold(base.to_path_buf(), |acc, seg| acc.join(seg))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
