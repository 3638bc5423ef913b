use crate::backup::{backup, BackupRecord};
use crate::classifier::classify;
use crate::config::InstallerConfig;
use crate::error::Result;
use crate::fetch::{fetch_file, fetch_tree, FetchStats};
use crate::io::{ensure_dir, path_exists};
use crate::paths;
use crate::plan::{plan, Plan, Step};
use crate::remote::ContentSource;
use crate::types::{Edition, InstallationState};
use serde::Serialize;
use std::path::Path;

/// Follow-up printed after a legacy installation was migrated.
pub const MIGRATION_GUIDANCE: &str = "\
Your legacy project data was moved to the backup directory shown above.
The new edition uses a different layout, so nothing was carried over automatically.
Open Claude Code in this project and run /simone:initialize to set up the new
structure, then copy over any requirements, sprints or decisions you still need.";

// ---------------------------------------------------------------------------
// Console
// ---------------------------------------------------------------------------

/// The interactive side of an installation.
pub trait Console {
    /// Ask a yes/no question; `false` cancels the run.
    fn confirm(&mut self, question: &str) -> Result<bool>;

    fn status(&mut self, message: &str);

    fn warn(&mut self, message: &str) {
        self.status(message);
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
    pub state: InstallationState,
    pub edition: Edition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<BackupRecord>,
    pub files_written: usize,
    pub dirs_created: usize,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Installed(InstallReport),
    Cancelled,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Classify `root`, plan for `edition`, and apply the plan.
pub fn run<S, C>(
    root: &Path,
    edition: Edition,
    force: bool,
    config: &InstallerConfig,
    source: &S,
    console: &mut C,
) -> Result<Outcome>
where
    S: ContentSource + ?Sized,
    C: Console + ?Sized,
{
    let state = classify(root)?;
    let plan = plan(state, edition, force, config.layout(edition))?;
    execute(root, &plan, source, console)
}

/// Apply `plan` to the project at `root`, step by step.
///
/// Confirmations come before any mutation, so a cancelled run changes nothing.
/// Failures of optional file fetches are reported as warnings; every other
/// failure aborts the run.
pub fn execute<S, C>(root: &Path, plan: &Plan, source: &S, console: &mut C) -> Result<Outcome>
where
    S: ContentSource + ?Sized,
    C: Console + ?Sized,
{
    let mut report = InstallReport {
        state: plan.state,
        edition: plan.edition,
        backup: None,
        files_written: 0,
        dirs_created: 0,
        warnings: Vec::new(),
        guidance: None,
    };

    for step in &plan.steps {
        match step {
            Step::Confirm { question } => {
                if !console.confirm(question)? {
                    tracing::info!("installation cancelled by user");
                    return Ok(Outcome::Cancelled);
                }
            }
            Step::Backup { label, targets } => {
                if let Some(record) = backup(root, *label, targets)? {
                    console.status(&format!("Backed up to {}", record.dir.display()));
                    report.backup = Some(record);
                }
            }
            Step::CreateLegacyDirs => {
                report.dirs_created += create_legacy_dirs(root)?;
                console.status("Created .simone directory structure");
            }
            Step::FetchFile {
                remote,
                local,
                optional,
            } => match fetch_file(source, remote, &paths::join_relative(root, local)) {
                Ok(()) => {
                    report.files_written += 1;
                    console.status(&format!("Installed {local}"));
                }
                Err(e) if *optional && e.is_fetch_failure() => {
                    tracing::warn!(error = %e, "optional file skipped");
                    let message = format!("Could not fetch {local}; continuing without it");
                    console.warn(&message);
                    report.warnings.push(message);
                }
                Err(e) => return Err(e),
            },
            Step::FetchTree { remote, local } => {
                let stats = fetch_tree(source, remote, &paths::join_relative(root, local))?;
                record_stats(&mut report, stats);
                console.status(&format!("Installed {local} ({} files)", stats.files));
            }
            Step::MigrationGuidance => {
                report.guidance = Some(MIGRATION_GUIDANCE.to_string());
            }
        }
    }

    Ok(Outcome::Installed(report))
}

fn record_stats(report: &mut InstallReport, stats: FetchStats) {
    report.files_written += stats.files;
    report.dirs_created += stats.dirs;
}

/// Returns the number of directories that did not exist before.
fn create_legacy_dirs(root: &Path) -> Result<usize> {
    let mut created = 0;
    for dir in paths::LEGACY_MANAGEMENT_DIRS {
        let path = root.join(dir);
        if !path_exists(&path)? {
            created += 1;
        }
        ensure_dir(&path)?;
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimoneError;
    use crate::testing::MemorySource;
    use std::collections::{BTreeMap, VecDeque};
    use tempfile::TempDir;
    use walkdir::WalkDir;

    #[derive(Default)]
    struct Scripted {
        answers: VecDeque<bool>,
        asked: Vec<String>,
        lines: Vec<String>,
    }

    impl Scripted {
        fn answering(answers: &[bool]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl Console for Scripted {
        fn confirm(&mut self, question: &str) -> Result<bool> {
            self.asked.push(question.to_string());
            Ok(self.answers.pop_front().unwrap_or(false))
        }

        fn status(&mut self, message: &str) {
            self.lines.push(message.to_string());
        }
    }

    fn remote() -> MemorySource {
        MemorySource::new()
            .with_file("legacy/.simone/00_PROJECT_MANIFEST.md", "# manifest")
            .with_file("legacy/.simone/99_TEMPLATES/task.md", "task template")
            .with_file("legacy/.simone/99_TEMPLATES/sprint.md", "sprint template")
            .with_file("legacy/.claude/commands/simone/do_task.md", "legacy do task")
            .with_file("legacy/.claude/commands/simone/commit.md", "legacy commit")
            .with_file(".simone/constitution.md", "# constitution")
            .with_file(".simone/context/README.md", "context")
            .with_file(".claude/commands/simone/work.md", "current work")
    }

    fn snapshot(root: &Path) -> BTreeMap<String, Option<Vec<u8>>> {
        WalkDir::new(root)
            .min_depth(1)
            .into_iter()
            .map(|e| e.unwrap())
            .map(|e| {
                let rel = e.path().strip_prefix(root).unwrap().display().to_string();
                let content = e
                    .file_type()
                    .is_file()
                    .then(|| std::fs::read(e.path()).unwrap());
                (rel, content)
            })
            .collect()
    }

    fn backup_dirs(root: &Path) -> Vec<String> {
        std::fs::read_dir(root)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|n| n.starts_with(paths::BACKUP_PREFIX))
            .collect()
    }

    fn installed(outcome: Outcome) -> InstallReport {
        match outcome {
            Outcome::Installed(report) => report,
            Outcome::Cancelled => panic!("unexpected cancellation"),
        }
    }

    #[test]
    fn fresh_legacy_install() {
        let dir = TempDir::new().unwrap();
        let cfg = InstallerConfig::default();
        let mut console = Scripted::default();

        let report = installed(
            run(dir.path(), Edition::Legacy, true, &cfg, &remote(), &mut console).unwrap(),
        );

        for sub in paths::LEGACY_MANAGEMENT_DIRS {
            assert!(dir.path().join(sub).is_dir(), "{sub}");
        }
        assert_eq!(
            std::fs::read_to_string(paths::manifest_path(dir.path())).unwrap(),
            "# manifest"
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join(".simone/99_TEMPLATES/task.md")).unwrap(),
            "task template"
        );
        assert!(dir.path().join(".claude/commands/simone/do_task.md").exists());
        assert!(backup_dirs(dir.path()).is_empty());
        assert!(report.backup.is_none());
        assert_eq!(report.state, InstallationState::Absent);
        assert_eq!(report.files_written, 5);
        assert!(console.asked.is_empty());
    }

    #[test]
    fn fresh_install_never_prompts_even_without_force() {
        let dir = TempDir::new().unwrap();
        let mut console = Scripted::answering(&[]);
        installed(
            run(
                dir.path(),
                Edition::Current,
                false,
                &InstallerConfig::default(),
                &remote(),
                &mut console,
            )
            .unwrap(),
        );
        assert!(console.asked.is_empty());
        assert!(dir.path().join(paths::CONSTITUTION_FILE).exists());
        assert!(dir.path().join(".simone/context/README.md").exists());
    }

    #[test]
    fn missing_optional_manifest_is_a_warning() {
        let dir = TempDir::new().unwrap();
        let source = remote().failing("legacy/.simone/00_PROJECT_MANIFEST.md");
        let mut console = Scripted::default();

        let report = installed(
            run(
                dir.path(),
                Edition::Legacy,
                true,
                &InstallerConfig::default(),
                &source,
                &mut console,
            )
            .unwrap(),
        );
        assert_eq!(report.warnings.len(), 1);
        assert!(!paths::manifest_path(dir.path()).exists());
        assert!(dir.path().join(".claude/commands/simone/commit.md").exists());
    }

    #[test]
    fn missing_templates_abort_the_run() {
        let dir = TempDir::new().unwrap();
        let source = remote().failing("legacy/.simone/99_TEMPLATES");
        let err = run(
            dir.path(),
            Edition::Legacy,
            true,
            &InstallerConfig::default(),
            &source,
            &mut Scripted::default(),
        )
        .unwrap_err();
        assert!(err.is_fetch_failure());
        assert!(!dir.path().join(paths::COMMANDS_DIR).exists());
    }

    #[test]
    fn legacy_to_current_migration() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(paths::SPRINTS_DIR)).unwrap();
        std::fs::write(dir.path().join(".simone/03_SPRINTS/S01.md"), "mine").unwrap();
        std::fs::create_dir_all(dir.path().join(paths::COMMANDS_DIR)).unwrap();
        std::fs::write(dir.path().join(".claude/commands/simone/old.md"), "old").unwrap();

        let report = installed(
            run(
                dir.path(),
                Edition::Current,
                true,
                &InstallerConfig::default(),
                &remote(),
                &mut Scripted::default(),
            )
            .unwrap(),
        );

        let backups = backup_dirs(dir.path());
        assert_eq!(backups.len(), 1);
        assert!(backups[0].starts_with(".simone_backup_legacy_"));
        let backup_dir = dir.path().join(&backups[0]);
        assert_eq!(
            std::fs::read_to_string(backup_dir.join(".simone/03_SPRINTS/S01.md")).unwrap(),
            "mine"
        );
        assert!(backup_dir.join(".claude/commands/simone/old.md").exists());

        assert!(dir.path().join(paths::CONSTITUTION_FILE).exists());
        assert!(!dir.path().join(paths::SPRINTS_DIR).exists());
        assert!(!dir.path().join(".claude/commands/simone/old.md").exists());
        assert!(dir.path().join(".claude/commands/simone/work.md").exists());
        assert_eq!(report.state, InstallationState::Legacy);
        assert_eq!(report.guidance.as_deref(), Some(MIGRATION_GUIDANCE));
    }

    #[test]
    fn downgrade_leaves_filesystem_unchanged() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(paths::SIMONE_DIR)).unwrap();
        std::fs::write(dir.path().join(paths::CONSTITUTION_FILE), "# mine").unwrap();
        std::fs::create_dir_all(dir.path().join(paths::COMMANDS_DIR)).unwrap();
        std::fs::write(dir.path().join(".claude/commands/simone/work.md"), "w").unwrap();
        let before = snapshot(dir.path());

        let err = run(
            dir.path(),
            Edition::Legacy,
            true,
            &InstallerConfig::default(),
            &remote(),
            &mut Scripted::default(),
        )
        .unwrap_err();

        assert!(matches!(err, SimoneError::DowngradeRefused));
        assert_eq!(snapshot(dir.path()), before);
    }

    #[test]
    fn declining_cancels_without_changes() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(paths::SIMONE_DIR)).unwrap();
        std::fs::write(dir.path().join(paths::CONSTITUTION_FILE), "# mine").unwrap();
        let before = snapshot(dir.path());
        let mut console = Scripted::answering(&[false]);

        let outcome = run(
            dir.path(),
            Edition::Current,
            false,
            &InstallerConfig::default(),
            &remote(),
            &mut console,
        )
        .unwrap();

        assert!(matches!(outcome, Outcome::Cancelled));
        assert_eq!(console.asked.len(), 1);
        assert_eq!(snapshot(dir.path()), before);
    }

    #[test]
    fn current_update_keeps_project_data() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".simone/progress")).unwrap();
        std::fs::write(dir.path().join(paths::CONSTITUTION_FILE), "# mine").unwrap();
        std::fs::write(dir.path().join(".simone/progress/log.md"), "progress").unwrap();
        std::fs::create_dir_all(dir.path().join(paths::COMMANDS_DIR)).unwrap();
        std::fs::write(dir.path().join(".claude/commands/simone/work.md"), "stale").unwrap();

        let mut console = Scripted::answering(&[true]);
        let report = installed(
            run(
                dir.path(),
                Edition::Current,
                false,
                &InstallerConfig::default(),
                &remote(),
                &mut console,
            )
            .unwrap(),
        );

        let record = report.backup.expect("commands backed up");
        assert_eq!(record.relocated, vec![paths::COMMANDS_DIR.to_string()]);
        assert_eq!(
            std::fs::read_to_string(record.dir.join(".claude/commands/simone/work.md")).unwrap(),
            "stale"
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join(".claude/commands/simone/work.md")).unwrap(),
            "current work"
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join(paths::CONSTITUTION_FILE)).unwrap(),
            "# mine"
        );
        assert!(dir.path().join(".simone/progress/log.md").exists());
    }

    #[test]
    fn legacy_reinstall_refreshes_commands_only() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(paths::REQUIREMENTS_DIR)).unwrap();
        std::fs::write(dir.path().join(".simone/02_REQUIREMENTS/R1.md"), "req").unwrap();
        std::fs::create_dir_all(dir.path().join(paths::COMMANDS_DIR)).unwrap();
        std::fs::write(dir.path().join(".claude/commands/simone/do_task.md"), "old").unwrap();

        let report = installed(
            run(
                dir.path(),
                Edition::Legacy,
                true,
                &InstallerConfig::default(),
                &remote(),
                &mut Scripted::default(),
            )
            .unwrap(),
        );

        let record = report.backup.unwrap();
        assert!(record
            .dir
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(".simone_backup_legacy-commands_"));
        assert!(dir.path().join(".simone/02_REQUIREMENTS/R1.md").exists());
        assert!(!dir.path().join(paths::TEMPLATES_DIR).exists());
        assert_eq!(
            std::fs::read_to_string(dir.path().join(".claude/commands/simone/do_task.md"))
                .unwrap(),
            "legacy do task"
        );
    }

    #[test]
    fn backup_failure_stops_before_any_fetch() {
        use crate::types::{BackupLabel, BackupTarget, TargetKind};

        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(paths::SPRINTS_DIR)).unwrap();
        std::fs::write(dir.path().join(".simone/03_SPRINTS/S01.md"), "mine").unwrap();

        // The second target lives inside the first, so its move fails after the first one.
        let plan = Plan {
            state: InstallationState::Legacy,
            edition: Edition::Current,
            steps: vec![
                Step::Backup {
                    label: BackupLabel::Legacy,
                    targets: vec![
                        BackupTarget {
                            kind: TargetKind::ManagementRoot,
                            path: paths::SIMONE_DIR.to_string(),
                        },
                        BackupTarget {
                            kind: TargetKind::ManagementRoot,
                            path: paths::SPRINTS_DIR.to_string(),
                        },
                    ],
                },
                Step::FetchTree {
                    remote: ".claude/commands/simone".to_string(),
                    local: paths::COMMANDS_DIR.to_string(),
                },
            ],
        };

        let err = execute(dir.path(), &plan, &remote(), &mut Scripted::default()).unwrap_err();

        assert!(matches!(err, SimoneError::BackupFailed { .. }), "{err:?}");
        assert!(!dir.path().join(paths::SIMONE_DIR).exists());
        let backups = backup_dirs(dir.path());
        assert_eq!(backups.len(), 1);
        assert!(dir
            .path()
            .join(&backups[0])
            .join(".simone/03_SPRINTS/S01.md")
            .exists());
        assert!(!dir.path().join(paths::COMMANDS_DIR).exists());
    }

    #[test]
    fn legacy_reinstall_without_commands_creates_no_backup() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(paths::SPRINTS_DIR)).unwrap();

        let report = installed(
            run(
                dir.path(),
                Edition::Legacy,
                true,
                &InstallerConfig::default(),
                &remote(),
                &mut Scripted::default(),
            )
            .unwrap(),
        );
        assert!(report.backup.is_none());
        assert!(backup_dirs(dir.path()).is_empty());
    }
}
