use clap::Parser;
use eyre::{Context, Result};
use log::info;

mod cli;
mod client;
mod commands;
mod config;
mod events;
mod metrics;
mod report;

use cli::{Cli, Commands};
use config::Config;

fn setup_logging(config: &Config) -> Result<()> {
    // RUST_LOG env var takes precedence, otherwise use config log_level
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(config.log_level.as_filter());
    }

    // Logs go to stderr so CI log collectors pick them up alongside the
    // job output
    builder.target(env_logger::Target::Stderr).init();

    Ok(())
}

fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Send {
            file,
            endpoint,
            token,
            strict,
            dry_run,
        } => commands::send::run(&file, endpoint, token, strict, dry_run, &config),
        Commands::Completions { shell } => commands::completions::run(shell),
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments first
    let cli = Cli::parse();

    // Load configuration (before logging, so log messages in Config::load are silent)
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(&config).context("Failed to setup logging")?;

    info!("Starting beacon with config from: {:?}", cli.config);

    run(cli, config).context("Command failed")?;

    Ok(())
}
