//! Poll-and-diff caption driver.
//!
//! On every tick the driver reads the transport position, performs one
//! timeline lookup and compares the resulting sequence number with the one
//! last shown. Only a change produces a transition, so polling jitter,
//! repeated positions and seeks inside the current event never duplicate
//! output.

use std::io;
use std::sync::mpsc::Receiver;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::clock::TimeSource;
use super::sink::{Transition, TransitionSink};
use super::ticker::Tick;
use crate::timeline::{Timeline, TimelineError};

/// What the driver does when a lookup fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Log the failure and wait for the next tick
    #[default]
    Skip,
    /// Stop the run and return the error
    Halt,
}

/// Errors that end a driver run.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("Lookup failed: {0}")]
    Lookup(#[from] TimelineError),

    #[error("Failed to emit transition: {0}")]
    Sink(#[from] io::Error),
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The tick channel closed (ticker stopped)
    TicksEnded,
    /// The final event was shown and the driver was asked to stop there
    ReachedEnd,
    /// A stop was requested while waiting
    Cancelled,
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub transitions: u64,
    pub idle_ticks: u64,
    pub failed_lookups: u64,
    pub reason: StopReason,
}

/// Emits one transition per distinct event as playback moves.
#[derive(Debug)]
pub struct PollingDriver<'t, C> {
    timeline: &'t Timeline,
    clock: C,
    policy: ErrorPolicy,
    stop_at_end: bool,
    shown: Option<usize>,
}

impl<'t, C: TimeSource> PollingDriver<'t, C> {
    pub fn new(timeline: &'t Timeline, clock: C) -> Self {
        Self {
            timeline,
            clock,
            policy: ErrorPolicy::default(),
            stop_at_end: false,
            shown: None,
        }
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// End [`run`](Self::run) once the timeline's last event has been shown.
    pub fn stop_at_end(mut self, stop: bool) -> Self {
        self.stop_at_end = stop;
        self
    }

    /// Sequence number of the event currently shown, if any.
    pub fn shown(&self) -> Option<usize> {
        self.shown
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Perform one tick's work: at most one lookup, at most one transition.
    ///
    /// Returns `Ok(None)` when there is no position or nothing changed.
    pub fn poll(&mut self) -> Result<Option<Transition>, TimelineError> {
        match self.clock.position_ms() {
            Some(position_ms) => self.poll_at(position_ms),
            None => Ok(None),
        }
    }

    /// Like [`poll`](Self::poll), for a position the caller already read.
    pub fn poll_at(&mut self, position_ms: u64) -> Result<Option<Transition>, TimelineError> {
        let event = self.timeline.lookup(position_ms)?;
        if self.shown == Some(event.sequence) {
            return Ok(None);
        }

        self.shown = Some(event.sequence);
        let transition = Transition::from(event);
        info!(
            sequence = transition.sequence(),
            position_ms,
            blank = transition.is_blank(),
            "caption transition"
        );
        Ok(Some(transition))
    }

    /// Consume ticks until the channel closes (or the end is reached when
    /// [`stop_at_end`](Self::stop_at_end) is set).
    pub fn run<S: TransitionSink>(
        &mut self,
        ticks: &Receiver<Tick>,
        sink: &mut S,
    ) -> Result<RunSummary, DriverError> {
        let last_sequence = self.timeline.last().map(|event| event.sequence);
        let mut summary = RunSummary {
            ticks: 0,
            transitions: 0,
            idle_ticks: 0,
            failed_lookups: 0,
            reason: StopReason::TicksEnded,
        };

        while let Ok(tick) = ticks.recv() {
            summary.ticks += 1;

            let Some(position_ms) = self.clock.position_ms() else {
                summary.idle_ticks += 1;
                continue;
            };

            match self.poll_at(position_ms) {
                Ok(Some(transition)) => {
                    sink.emit(&transition)?;
                    summary.transitions += 1;
                }
                Ok(None) => {}
                Err(err) => match self.policy {
                    ErrorPolicy::Skip => {
                        summary.failed_lookups += 1;
                        warn!(tick = tick.number, error = %err, "lookup failed, skipping tick");
                        continue;
                    }
                    ErrorPolicy::Halt => return Err(err.into()),
                },
            }

            if self.stop_at_end && self.shown.is_some() && self.shown == last_sequence {
                summary.reason = StopReason::ReachedEnd;
                break;
            }
        }

        debug!(?summary, "driver finished");
        Ok(summary)
    }
}
