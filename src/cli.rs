//! CLI definitions
//!
//! Lives in the library so tests (and doc generation) can inspect the
//! command tree without spawning the binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::timeline::parse_offset;

/// Resolve which caption applies at any point of a playback timeline.
#[derive(Debug, Parser)]
#[command(name = "subcue", version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to the platform config dir, or $SUBCUE_CONFIG)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the display events built from a caption file
    Events(EventsArgs),

    /// Show the event current at one or more offsets
    Lookup(LookupArgs),

    /// Play captions against the wall clock, printing each transition
    Play(PlayArgs),

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Debug, Args)]
pub struct EventsArgs {
    /// Caption JSON file ('-' for stdin)
    pub file: PathBuf,

    /// Print events as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Caption JSON file ('-' for stdin)
    pub file: PathBuf,

    /// Offsets in milliseconds or HH:MM:SS,mmm
    #[arg(required = true, value_parser = parse_offset_arg)]
    pub offsets: Vec<u64>,
}

#[derive(Debug, Args)]
pub struct PlayArgs {
    /// Caption JSON file ('-' for stdin)
    pub file: PathBuf,

    /// Start offset (milliseconds or HH:MM:SS,mmm)
    #[arg(long, value_parser = parse_offset_arg)]
    pub from: Option<u64>,

    /// Polling interval in milliseconds
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Sleep until each event instead of polling
    #[arg(long)]
    pub deadline: bool,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
}

fn parse_offset_arg(value: &str) -> Result<u64, String> {
    parse_offset(value).map_err(|err| err.to_string())
}
