mod cmd;
mod console;
mod output;
mod root;

use clap::Parser;
use cmd::install::InstallArgs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "hello-simone",
    about = "Install or update the Simone framework in the current project",
    version
)]
struct Cli {
    /// Skip all prompts and answer yes
    #[arg(long)]
    force: bool,

    /// Install the new (preview) edition instead of the stable legacy edition
    #[arg(long)]
    preview: bool,

    /// Project root (default: the current directory)
    #[arg(long, env = "SIMONE_ROOT")]
    root: Option<PathBuf>,

    /// YAML file overriding the repository and remote layout
    #[arg(long, env = "SIMONE_CONFIG")]
    config: Option<PathBuf>,

    /// Base URL of the contents API
    #[arg(long, env = "SIMONE_API_BASE")]
    api_base: Option<String>,

    /// Base URL for raw file downloads
    #[arg(long, env = "SIMONE_RAW_BASE")]
    raw_base: Option<String>,

    /// Repository branch to install from
    #[arg(long, env = "SIMONE_BRANCH")]
    branch: Option<String>,

    /// Output the result as JSON
    #[arg(long, short = 'j')]
    json: bool,

    /// Log every listing, download and move
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let args = InstallArgs {
        force: cli.force,
        preview: cli.preview,
        json: cli.json,
        config: cli.config,
        api_base: cli.api_base,
        raw_base: cli.raw_base,
        branch: cli.branch,
    };

    if let Err(e) = cmd::install::run(&root, &args) {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
