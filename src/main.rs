use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use semvertag::cli::{run_tag_workflow, Cli, TagWorkflowArgs};
use semvertag::command::SystemCommandRunner;
use semvertag::config;
use semvertag::git::Git2Repository;
use semvertag::ui::{self, DialoguerPrompter};
use semvertag::SemvertagError;

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_level(false)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        ui::display_error(&format!("{:#}", e));
        let usage = e
            .downcast_ref::<SemvertagError>()
            .is_some_and(SemvertagError::is_usage);
        std::process::exit(if usage { 2 } else { 1 });
    }
}

fn run(cli: Cli) -> Result<()> {
    // Flag combinations are checked before anything touches the repository
    let bump = cli.validate()?;

    let dir = match &cli.repo {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Error getting working directory")?,
    };
    let repo = Git2Repository::open(&dir)?;

    let config = config::load_config(cli.config.as_deref(), repo.workdir())
        .context("Error loading config")?;

    let args = TagWorkflowArgs::from_cli(&cli, bump, &config, repo.workdir());
    run_tag_workflow(&args, &repo, &DialoguerPrompter::new(), &SystemCommandRunner)?;

    Ok(())
}
