//! `subcue play` handler

use anyhow::{bail, Context, Result};
use std::io::{self, Write};
use std::time::Duration;

use tracing::info;

use subcue::cli::PlayArgs;
use subcue::player::{
    stop_channel, DeadlineScheduler, PollingDriver, StopHandle, StopReason, Ticker, Transition,
    TransitionSink, WallClock,
};
use subcue::timeline::format_offset;
use subcue::Config;

use super::load_timeline;

/// Prints each transition as `[timestamp] text`.
struct StdoutSink<W: Write> {
    out: W,
}

impl<W: Write> TransitionSink for StdoutSink<W> {
    fn emit(&mut self, transition: &Transition) -> io::Result<()> {
        let stamp = format_offset(transition.offset_ms());
        match transition {
            Transition::Blank { .. } => writeln!(self.out, "[{}]", stamp)?,
            // Empty text still gets its line
            Transition::Caption { text, .. } if text.is_empty() => {
                writeln!(self.out, "[{}] ", stamp)?
            }
            Transition::Caption { text, .. } => {
                for line in text.lines() {
                    writeln!(self.out, "[{}] {}", stamp, line)?;
                }
            }
        }
        self.out.flush()
    }
}

#[cfg(not(tarpaulin_include))]
pub fn handle(args: &PlayArgs, config: &Config) -> Result<()> {
    let timeline = load_timeline(&args.file, config)?;
    if timeline.is_empty() {
        bail!("{} contains no captions", args.file.display());
    }

    let from_ms = args.from.unwrap_or(config.player.start_offset_ms);
    let mut sink = StdoutSink {
        out: io::stdout().lock(),
    };
    info!(from = %format_offset(from_ms), events = timeline.len(), "starting playback");

    let reason = if args.deadline {
        let (handle, signal) = stop_channel();
        install_ctrlc(handle)?;
        DeadlineScheduler::new(&timeline).run(from_ms, &signal, &mut sink)?
    } else {
        let interval_ms = args.interval_ms.unwrap_or(config.player.poll_interval_ms);
        if interval_ms == 0 {
            bail!("--interval-ms must be at least 1");
        }
        let (ticker, ticks) = Ticker::spawn(Duration::from_millis(interval_ms));
        install_ctrlc(ticker.stop_handle())?;

        let mut driver = PollingDriver::new(&timeline, WallClock::starting_at(from_ms))
            .with_policy(config.player.on_error)
            .stop_at_end(true);
        let summary = driver.run(&ticks, &mut sink)?;
        ticker.stop();
        info!(
            ticks = summary.ticks,
            transitions = summary.transitions,
            failed = summary.failed_lookups,
            "playback finished"
        );
        summary.reason
    };

    if reason != StopReason::ReachedEnd {
        info!(?reason, "playback interrupted");
    }
    Ok(())
}

fn install_ctrlc(handle: StopHandle) -> Result<()> {
    ctrlc::set_handler(move || handle.stop()).context("Failed to install Ctrl-C handler")
}
