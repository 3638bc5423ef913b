use crate::config::EditionLayout;
use crate::error::{Result, SimoneError};
use crate::paths;
use crate::types::{BackupLabel, BackupTarget, Edition, InstallationState, TargetKind};

// ---------------------------------------------------------------------------
// Step / Plan
// ---------------------------------------------------------------------------

/// One unit of work in an installation. Local paths are project-relative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Confirm {
        question: String,
    },
    Backup {
        label: BackupLabel,
        targets: Vec<BackupTarget>,
    },
    CreateLegacyDirs,
    FetchFile {
        remote: String,
        local: String,
        optional: bool,
    },
    FetchTree {
        remote: String,
        local: String,
    },
    MigrationGuidance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub state: InstallationState,
    pub edition: Edition,
    pub steps: Vec<Step>,
}

impl Plan {
    pub fn needs_confirmation(&self) -> bool {
        self.steps.iter().any(|s| matches!(s, Step::Confirm { .. }))
    }
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// Decide what to do for `edition` given what is installed. Touches nothing.
///
/// | state   | edition | steps                                                   |
/// |---------|---------|---------------------------------------------------------|
/// | absent  | legacy  | dirs, manifest (optional), templates, commands          |
/// | absent  | current | management tree, commands                               |
/// | legacy  | legacy  | confirm, back up commands, commands                     |
/// | legacy  | current | confirm, back up both, management, commands, guidance   |
/// | current | legacy  | refused                                                 |
/// | current | current | confirm, back up commands, commands                     |
///
/// `force` drops every confirmation.
pub fn plan(
    state: InstallationState,
    edition: Edition,
    force: bool,
    layout: &EditionLayout,
) -> Result<Plan> {
    use Edition as E;
    use InstallationState as S;

    let mut steps = Vec::new();
    match (state, edition) {
        (S::Absent, E::Legacy) => {
            steps.push(Step::CreateLegacyDirs);
            if let Some(manifest) = &layout.manifest {
                steps.push(Step::FetchFile {
                    remote: manifest.clone(),
                    local: paths::PROJECT_MANIFEST_FILE.to_string(),
                    optional: true,
                });
            }
            steps.push(Step::FetchTree {
                remote: required(&layout.templates, "templates")?,
                local: paths::TEMPLATES_DIR.to_string(),
            });
            steps.push(fetch_commands(layout));
        }
        (S::Absent, E::Current) => {
            steps.push(fetch_management(layout)?);
            steps.push(fetch_commands(layout));
        }
        (S::Legacy, E::Legacy) => {
            steps.push(Step::Confirm {
                question: "An existing Simone installation was found. Update its commands? \
                           (the current commands are backed up first)"
                    .to_string(),
            });
            steps.push(Step::Backup {
                label: BackupLabel::LegacyCommands,
                targets: vec![command_target()],
            });
            steps.push(fetch_commands(layout));
        }
        (S::Legacy, E::Current) => {
            steps.push(Step::Confirm {
                question: "A legacy Simone installation was found. Migrate to the new edition? \
                           (.simone and the Simone commands are moved to a backup first)"
                    .to_string(),
            });
            steps.push(Step::Backup {
                label: BackupLabel::Legacy,
                targets: vec![management_target(), command_target()],
            });
            steps.push(fetch_management(layout)?);
            steps.push(fetch_commands(layout));
            steps.push(Step::MigrationGuidance);
        }
        (S::Current, E::Legacy) => return Err(SimoneError::DowngradeRefused),
        (S::Current, E::Current) => {
            steps.push(Step::Confirm {
                question: "Simone is already installed. Update its commands? \
                           (project data in .simone is left untouched)"
                    .to_string(),
            });
            steps.push(Step::Backup {
                label: BackupLabel::Commands,
                targets: vec![command_target()],
            });
            steps.push(fetch_commands(layout));
        }
    }

    if force {
        steps.retain(|s| !matches!(s, Step::Confirm { .. }));
    }

    Ok(Plan {
        state,
        edition,
        steps,
    })
}

fn required(value: &Option<String>, what: &str) -> Result<String> {
    value
        .clone()
        .ok_or_else(|| SimoneError::Config(format!("edition layout has no {what} path")))
}

fn fetch_management(layout: &EditionLayout) -> Result<Step> {
    Ok(Step::FetchTree {
        remote: required(&layout.management, "management")?,
        local: paths::SIMONE_DIR.to_string(),
    })
}

fn fetch_commands(layout: &EditionLayout) -> Step {
    Step::FetchTree {
        remote: layout.commands.clone(),
        local: paths::COMMANDS_DIR.to_string(),
    }
}

fn management_target() -> BackupTarget {
    BackupTarget {
        kind: TargetKind::ManagementRoot,
        path: paths::SIMONE_DIR.to_string(),
    }
}

fn command_target() -> BackupTarget {
    BackupTarget {
        kind: TargetKind::CommandRoot,
        path: paths::COMMANDS_DIR.to_string(),
    }
}
