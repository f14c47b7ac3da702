//! `subcue lookup` handler

use anyhow::Result;
use rayon::prelude::*;
use std::io::{self, Write};

use subcue::cli::LookupArgs;
use subcue::timeline::format_offset;
use subcue::Config;

use super::load_timeline;

/// Resolve every offset against one shared timeline.
///
/// Lookups only read the timeline, so they run in parallel; output keeps
/// the order the offsets were given in.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &LookupArgs, config: &Config) -> Result<()> {
    let timeline = load_timeline(&args.file, config)?;

    let lines = args
        .offsets
        .par_iter()
        .map(|offset| -> Result<String> {
            let event = timeline.lookup(*offset)?;
            Ok(format!("{} -> {}", format_offset(*offset), event))
        })
        .collect::<Result<Vec<String>>>()?;

    let mut out = io::stdout().lock();
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
