//! Timeline construction and lookup errors.

/// Errors raised while building or querying a [`Timeline`](super::Timeline).
///
/// All variants are local to the timeline; the host decides whether a failed
/// lookup halts playback or only skips a tick.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimelineError {
    /// Caption input is malformed or out of order.
    #[error("Invalid caption #{index}: {reason}")]
    Structural { index: usize, reason: String },

    /// Search reached a state that correct construction can never produce.
    #[error("Corrupt timeline index at depth {depth} while resolving {query_ms}ms: {detail}")]
    IndexCorruption {
        query_ms: u64,
        depth: usize,
        detail: &'static str,
    },

    /// Lookup requested before any event was inserted.
    #[error("Timeline is empty")]
    EmptyIndex,

    /// Offset cannot be represented by the index layout.
    #[error("Offset {offset_ms}ms exceeds the indexable maximum of {max_ms}ms")]
    OffsetOutOfRange { offset_ms: u64, max_ms: u64 },

    /// Event inserted out of sequence or beyond the store's capacity.
    #[error("Event #{sequence} rejected: {reason}")]
    Rejected { sequence: usize, reason: String },
}

impl TimelineError {
    pub(crate) fn structural(index: usize, reason: impl Into<String>) -> Self {
        Self::Structural {
            index,
            reason: reason.into(),
        }
    }

    pub(crate) fn rejected(sequence: usize, reason: impl Into<String>) -> Self {
        Self::Rejected {
            sequence,
            reason: reason.into(),
        }
    }

    /// Whether the error only affects the lookup that produced it.
    ///
    /// Build-time errors never occur during playback, so a driver that sees
    /// one of those has been handed a broken timeline.
    pub fn is_per_lookup(&self) -> bool {
        matches!(self, Self::IndexCorruption { .. } | Self::EmptyIndex)
    }
}
