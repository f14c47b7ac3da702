//! subcue command-line entry point.

mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use subcue::cli::{Cli, Commands, ConfigCommands};
use subcue::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };

    init_logging(cli.verbose, &config.logging.level);

    match cli.command {
        Commands::Events(args) => commands::events::handle(&args, &config),
        Commands::Lookup(args) => commands::lookup::handle(&args, &config),
        Commands::Play(args) => commands::play::handle(&args, &config),
        Commands::Config(ConfigCommands::Show) => commands::config::handle_show(&config),
        Commands::Config(ConfigCommands::Path) => commands::config::handle_path(cli.config),
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `-v` and the config file.
fn init_logging(verbose: u8, configured: &str) {
    let fallback = match verbose {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
