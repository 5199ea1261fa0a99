use clap::Parser;
use eyre::{Context, Result};
use log::info;

mod cli;
mod commands;
mod config;
mod flatten;
mod sink;
mod source;

use cli::{Cli, Commands};
use config::Config;

fn setup_logging(cli: &Cli, config: &Config) {
    // Stdout carries event lines, so all diagnostics go to stderr
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        // Let env_logger parse RUST_LOG
        builder.parse_default_env();
    } else {
        let level = if cli.quiet {
            log::LevelFilter::Error
        } else if cli.verbose {
            log::LevelFilter::Debug
        } else {
            config.log_level.as_filter()
        };
        builder.filter_level(level);
    }

    builder.target(env_logger::Target::Stderr).init();
}

fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Watch {
            kinds,
            input,
            events,
            no_flatten,
            separator,
            prefix,
        } => commands::watch::run(
            &kinds,
            input.as_deref(),
            &events,
            no_flatten,
            separator,
            prefix,
            &config,
        ),
        Commands::Flatten { input, separator, prefix } => {
            commands::flatten::run(input.as_deref(), separator, prefix, &config)
        }
        Commands::Config { action } => commands::config::run(action, &config),
        Commands::Completions { shell } => commands::completions::run(shell),
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments first
    let cli = Cli::parse();

    // Load configuration (before logging, so log messages in Config::load are silent)
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging with log level from config (or RUST_LOG env var)
    setup_logging(&cli, &config);

    info!("Starting flatwatch with config from: {:?}", cli.config);

    // Run the command
    run(cli, config).context("Command failed")?;

    Ok(())
}
