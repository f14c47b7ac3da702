//! Subcommand handlers

pub mod config;
pub mod events;
pub mod lookup;
pub mod play;

use anyhow::{Context, Result};
use std::path::Path;

use subcue::captions::load_captions;
use subcue::{Config, Timeline};

/// Load a caption file and build its timeline with the configured layout.
pub fn load_timeline(path: &Path, config: &Config) -> Result<Timeline> {
    let captions = load_captions(path)?;
    let layout = config.index.layout().context("Invalid index layout")?;
    Timeline::build_with_layout(&captions, layout)
        .with_context(|| format!("Failed to build timeline from {}", path.display()))
}
