use crate::console::TerminalConsole;
use crate::output::{print_json, print_summary};
use anyhow::Context;
use simone_core::{
    config::InstallerConfig,
    install::{self, Outcome},
    remote::GitHubSource,
    types::Edition,
};
use std::path::{Path, PathBuf};

pub struct InstallArgs {
    pub force: bool,
    pub preview: bool,
    pub json: bool,
    pub config: Option<PathBuf>,
    pub api_base: Option<String>,
    pub raw_base: Option<String>,
    pub branch: Option<String>,
}

/// `hello-simone`: classify the project, then install or update Simone.
///
/// Cancelling at a prompt is not an error.
pub fn run(root: &Path, args: &InstallArgs) -> anyhow::Result<()> {
    let config = load_config(args)?;
    let edition = if args.preview {
        Edition::Current
    } else {
        Edition::Legacy
    };

    let mut console = TerminalConsole::new(args.json);
    if !args.json {
        println!("Installing Simone ({edition} edition) in: {}", root.display());
    }

    let source = GitHubSource::new(&config).context("failed to set up remote access")?;
    let outcome = install::run(root, edition, args.force, &config, &source, &mut console)
        .with_context(|| format!("installation into {} failed", root.display()))?;

    if args.json {
        return print_json(&outcome);
    }

    match &outcome {
        Outcome::Installed(report) => print_summary(report),
        Outcome::Cancelled => println!("Installation cancelled."),
    }
    Ok(())
}

/// Defaults, then the YAML file, then individual flag / env overrides.
fn load_config(args: &InstallArgs) -> anyhow::Result<InstallerConfig> {
    let mut config = match &args.config {
        Some(path) => InstallerConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => InstallerConfig::default(),
    };
    if let Some(api_base) = &args.api_base {
        config.api_base = api_base.clone();
    }
    if let Some(raw_base) = &args.raw_base {
        config.raw_base = raw_base.clone();
    }
    if let Some(branch) = &args.branch {
        config.repository.branch = branch.clone();
    }
    config.validate().context("invalid installer configuration")?;
    Ok(config)
}
