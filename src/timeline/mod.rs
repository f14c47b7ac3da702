//! Time-indexed caption timeline.
//!
//! Answers "which caption (or silence) applies at offset t" for an arbitrary,
//! possibly seeking, playback position.
//!
//! # Architecture
//!
//! - `event`: Display events, caption records and timestamp helpers
//! - `store`: Append-only event array (position = sequence number)
//! - `index/`: Digit trie over truncated offsets plus nearest-match search
//! - `sequencer`: Caption intervals to alternating silence/caption events
//! - `error`: Typed build and lookup failures
//!
//! A [`Timeline`] is built once and then only read. Lookups take `&self`
//! and touch no shared mutable state, so one timeline can serve any number
//! of threads.

mod error;
mod event;
pub mod index;
pub mod sequencer;
mod store;

use tracing::debug;

pub use error::TimelineError;
pub use event::{format_offset, parse_offset, Caption, DisplayEvent, EventKind, ParseOffsetError};
pub use index::{DigitIndex, IndexLayout, LayoutError};
pub use sequencer::Sequencer;
pub use store::EventStore;

/// Immutable caption timeline with floor lookup.
#[derive(Debug, Clone)]
pub struct Timeline {
    index: DigitIndex,
}

impl Timeline {
    /// Sequence `captions` and index the resulting events with the default
    /// whole-second layout.
    pub fn build(captions: &[Caption]) -> Result<Self, TimelineError> {
        Self::build_with_layout(captions, IndexLayout::default())
    }

    pub fn build_with_layout(
        captions: &[Caption],
        layout: IndexLayout,
    ) -> Result<Self, TimelineError> {
        let events = sequencer::sequence(captions)?;
        let timeline = Self::from_events(events, layout)?;
        debug!(
            captions = captions.len(),
            events = timeline.len(),
            buckets = timeline.index.bucket_count(),
            nodes = timeline.index.node_count(),
            "built timeline"
        );
        Ok(timeline)
    }

    /// Index already-sequenced events.
    ///
    /// Events must carry sequence numbers `0..n` in order with non-decreasing
    /// offsets.
    pub fn from_events(
        events: impl IntoIterator<Item = DisplayEvent>,
        layout: IndexLayout,
    ) -> Result<Self, TimelineError> {
        let events: Vec<DisplayEvent> = events.into_iter().collect();
        let mut index = DigitIndex::new(layout, events.len());
        for event in events {
            index.insert(event)?;
        }
        Ok(Self { index })
    }

    /// The event current at `offset_ms`.
    pub fn lookup(&self, offset_ms: u64) -> Result<&DisplayEvent, TimelineError> {
        self.index.lookup(offset_ms)
    }

    pub fn events(&self) -> &[DisplayEvent] {
        self.index.store().as_slice()
    }

    /// The last event, i.e. the state shown once playback runs past the end.
    pub fn last(&self) -> Option<&DisplayEvent> {
        self.events().last()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn layout(&self) -> IndexLayout {
        self.index.layout()
    }

    pub fn index(&self) -> &DigitIndex {
        &self.index
    }
}
