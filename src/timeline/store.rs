//! Append-only event storage, addressed by sequence number.

use super::error::TimelineError;
use super::event::DisplayEvent;

/// Fixed-capacity ordered array of display events.
///
/// Position equals sequence number. Events must arrive in sequence order with
/// non-decreasing offsets; the nearest-match search relies on both.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<DisplayEvent>,
    capacity: usize,
}

impl EventStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an event at its sequence position.
    pub fn push(&mut self, event: DisplayEvent) -> Result<usize, TimelineError> {
        let position = self.events.len();
        if event.sequence != position {
            return Err(TimelineError::rejected(
                event.sequence,
                format!("expected sequence {}", position),
            ));
        }
        if position >= self.capacity {
            return Err(TimelineError::rejected(
                event.sequence,
                format!("store is full ({} events)", self.capacity),
            ));
        }
        if let Some(last) = self.events.last() {
            if event.offset_ms < last.offset_ms {
                return Err(TimelineError::rejected(
                    event.sequence,
                    format!(
                        "offset {}ms precedes previous event at {}ms",
                        event.offset_ms, last.offset_ms
                    ),
                ));
            }
        }
        self.events.push(event);
        Ok(position)
    }

    pub fn get(&self, position: usize) -> Option<&DisplayEvent> {
        self.events.get(position)
    }

    pub fn as_slice(&self) -> &[DisplayEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Resolve the floor event for `query_ms`, starting from a nearby position.
    ///
    /// Scans forward while the next event still starts at or before the query,
    /// or backward until an event at or before the query is found. Falls back
    /// to the first event when the query precedes everything.
    pub fn floor_from(&self, start: usize, query_ms: u64) -> Option<&DisplayEvent> {
        let mut position = start.min(self.events.len().checked_sub(1)?);
        let anchor = &self.events[position];

        if query_ms >= anchor.offset_ms {
            while position + 1 < self.events.len() && self.events[position + 1].offset_ms <= query_ms
            {
                position += 1;
            }
        } else {
            while position > 0 && self.events[position].offset_ms > query_ms {
                position -= 1;
            }
        }
        self.events.get(position)
    }
}
