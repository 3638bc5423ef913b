use crate::error::{Result, SimoneError};
use crate::types::Edition;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// RepoConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoConfig {
    #[serde(default = "default_owner")]
    pub owner: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_branch")]
    pub branch: String,
}

fn default_owner() -> String {
    "Helmi".to_string()
}

fn default_name() -> String {
    "claude-simone".to_string()
}

fn default_branch() -> String {
    "master".to_string()
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            name: default_name(),
            branch: default_branch(),
        }
    }
}

// ---------------------------------------------------------------------------
// EditionLayout
// ---------------------------------------------------------------------------

/// Remote paths that make up one edition of the framework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditionLayout {
    /// Optional root manifest file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<String>,
    /// Template tree, installed into the management root's templates directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<String>,
    /// Full management-root tree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management: Option<String>,
    /// Command tree.
    pub commands: String,
}

impl EditionLayout {
    pub fn legacy() -> Self {
        Self {
            manifest: Some("legacy/.simone/00_PROJECT_MANIFEST.md".to_string()),
            templates: Some("legacy/.simone/99_TEMPLATES".to_string()),
            management: None,
            commands: "legacy/.claude/commands/simone".to_string(),
        }
    }

    pub fn current() -> Self {
        Self {
            manifest: None,
            templates: None,
            management: Some(".simone".to_string()),
            commands: ".claude/commands/simone".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Editions {
    #[serde(default = "EditionLayout::legacy")]
    pub legacy: EditionLayout,
    #[serde(default = "EditionLayout::current")]
    pub current: EditionLayout,
}

impl Default for Editions {
    fn default() -> Self {
        Self {
            legacy: EditionLayout::legacy(),
            current: EditionLayout::current(),
        }
    }
}

// ---------------------------------------------------------------------------
// InstallerConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallerConfig {
    #[serde(default)]
    pub repository: RepoConfig,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_raw_base")]
    pub raw_base: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub editions: Editions,
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_raw_base() -> String {
    "https://raw.githubusercontent.com".to_string()
}

fn default_user_agent() -> String {
    format!("hello-simone/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            repository: RepoConfig::default(),
            api_base: default_api_base(),
            raw_base: default_raw_base(),
            user_agent: default_user_agent(),
            editions: Editions::default(),
        }
    }
}

impl InstallerConfig {
    /// Load a YAML configuration file. Fields it omits keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| SimoneError::fs(path, e))?;
        let cfg: InstallerConfig = serde_yaml::from_str(&data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn layout(&self, edition: Edition) -> &EditionLayout {
        match edition {
            Edition::Legacy => &self.editions.legacy,
            Edition::Current => &self.editions.current,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let repo = &self.repository;
        for (field, value) in [
            ("repository.owner", &repo.owner),
            ("repository.name", &repo.name),
            ("repository.branch", &repo.branch),
            ("api_base", &self.api_base),
            ("raw_base", &self.raw_base),
            ("editions.legacy.commands", &self.editions.legacy.commands),
            ("editions.current.commands", &self.editions.current.commands),
        ] {
            if value.trim().is_empty() {
                return Err(SimoneError::Config(format!("{field} must not be empty")));
            }
        }
        if self.editions.legacy.templates.is_none() {
            return Err(SimoneError::Config(
                "editions.legacy.templates is required".to_string(),
            ));
        }
        if self.editions.current.management.is_none() {
            return Err(SimoneError::Config(
                "editions.current.management is required".to_string(),
            ));
        }
        Ok(())
    }
}
