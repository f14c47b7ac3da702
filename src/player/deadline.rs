//! Deadline scheduler: sleep until each event's start instead of polling.
//!
//! Simpler than the polling driver but it trusts its own wall clock, so it
//! cannot follow a transport that seeks or stalls. Use it for fire-and-forget
//! playback only.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::driver::{DriverError, StopReason};
use super::sink::{Transition, TransitionSink};
use super::ticker::StopSignal;
use crate::timeline::Timeline;

/// Emits every event of a timeline at its wall-clock deadline.
#[derive(Debug, Clone, Copy)]
pub struct DeadlineScheduler<'t> {
    timeline: &'t Timeline,
}

impl<'t> DeadlineScheduler<'t> {
    pub fn new(timeline: &'t Timeline) -> Self {
        Self { timeline }
    }

    /// Play from `from_ms`: emit the event current there immediately, then
    /// each following event once its offset is reached.
    ///
    /// Returns [`StopReason::ReachedEnd`] after the last event, or
    /// [`StopReason::Cancelled`] if `stop` fires during a wait.
    pub fn run<S: TransitionSink>(
        &self,
        from_ms: u64,
        stop: &StopSignal,
        sink: &mut S,
    ) -> Result<StopReason, DriverError> {
        let origin = Instant::now();
        let current = self.timeline.lookup(from_ms)?;
        sink.emit(&Transition::from(current))?;

        for event in &self.timeline.events()[current.sequence + 1..] {
            let due = origin + Duration::from_millis(event.offset_ms.saturating_sub(from_ms));
            if stop.wait(due.saturating_duration_since(Instant::now())) {
                debug!(sequence = event.sequence, "deadline playback cancelled");
                return Ok(StopReason::Cancelled);
            }
            info!(sequence = event.sequence, offset_ms = event.offset_ms, "deadline reached");
            sink.emit(&Transition::from(event))?;
        }
        Ok(StopReason::ReachedEnd)
    }
}
