//! `subcue events` handler

use anyhow::Result;
use std::io::{self, Write};

use subcue::cli::EventsArgs;
use subcue::Config;

use super::load_timeline;

#[cfg(not(tarpaulin_include))]
pub fn handle(args: &EventsArgs, config: &Config) -> Result<()> {
    let timeline = load_timeline(&args.file, config)?;
    let mut out = io::stdout().lock();

    if args.json {
        serde_json::to_writer_pretty(&mut out, timeline.events())?;
        writeln!(out)?;
        return Ok(());
    }

    for event in timeline.events() {
        writeln!(out, "{}", event)?;
    }
    Ok(())
}
