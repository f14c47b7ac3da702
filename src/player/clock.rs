//! Playback position sources.
//!
//! The driver never owns playback: it asks a [`TimeSource`] where the
//! transport currently is, which may jump backwards or forwards between ticks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Where playback currently is, in milliseconds from the start of the media.
pub trait TimeSource {
    /// Current offset, or `None` while the transport has no position (e.g.
    /// still buffering). A tick without a position performs no lookup.
    fn position_ms(&self) -> Option<u64>;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn position_ms(&self) -> Option<u64> {
        (**self).position_ms()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn position_ms(&self) -> Option<u64> {
        (**self).position_ms()
    }
}

/// Monotonic wall clock starting at a given media offset.
#[derive(Debug, Clone)]
pub struct WallClock {
    started: Instant,
    origin_ms: u64,
}

impl WallClock {
    pub fn starting_at(origin_ms: u64) -> Self {
        Self {
            started: Instant::now(),
            origin_ms,
        }
    }

    /// Jump to `origin_ms` and keep running from there.
    pub fn seek(&mut self, origin_ms: u64) {
        self.started = Instant::now();
        self.origin_ms = origin_ms;
    }

    pub fn started(&self) -> Instant {
        self.started
    }

    pub fn origin_ms(&self) -> u64 {
        self.origin_ms
    }
}

impl TimeSource for WallClock {
    fn position_ms(&self) -> Option<u64> {
        let elapsed = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        Some(self.origin_ms.saturating_add(elapsed))
    }
}

/// Externally driven position, e.g. fed by a player's progress callback.
///
/// Clones share the same position.
#[derive(Debug, Clone)]
pub struct ManualClock {
    position: Arc<AtomicU64>,
}

/// Stored when no position is available.
const NO_POSITION: u64 = u64::MAX;

impl Default for ManualClock {
    fn default() -> Self {
        Self {
            position: Arc::new(AtomicU64::new(NO_POSITION)),
        }
    }
}

impl ManualClock {
    /// A clock with no position yet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(position_ms: u64) -> Self {
        let clock = Self::default();
        clock.set(position_ms);
        clock
    }

    /// Set the position. `u64::MAX` is saturated down by one, as it marks
    /// "no position".
    pub fn set(&self, position_ms: u64) {
        self.position
            .store(position_ms.min(NO_POSITION - 1), Ordering::Release);
    }

    pub fn clear(&self) {
        self.position.store(NO_POSITION, Ordering::Release);
    }
}

impl TimeSource for ManualClock {
    fn position_ms(&self) -> Option<u64> {
        match self.position.load(Ordering::Acquire) {
            NO_POSITION => None,
            position => Some(position),
        }
    }
}
