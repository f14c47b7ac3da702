//! Turns caption intervals into the alternating silence/caption event stream.

use super::error::TimelineError;
use super::event::{Caption, DisplayEvent};

/// Builds display events from time-ordered captions.
///
/// Each caption yields a caption event at its start and a silence event one
/// millisecond after its end, so the silence starts strictly after the last
/// visible millisecond. A leading silence at 0 is added when the first
/// caption starts later.
#[derive(Debug, Default)]
pub struct Sequencer {
    events: Vec<DisplayEvent>,
    captions_seen: usize,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for `captions` captions (two events each plus a lead-in).
    pub fn with_capacity(captions: usize) -> Self {
        Self {
            events: Vec::with_capacity(event_capacity(captions)),
            captions_seen: 0,
        }
    }

    /// Append one caption.
    ///
    /// Fails if the caption ends before it starts, or does not start strictly
    /// after the previous event (overlaps and out-of-order input are never
    /// silently resolved).
    pub fn push(&mut self, caption: &Caption) -> Result<(), TimelineError> {
        let index = self.captions_seen;

        if caption.end_ms < caption.start_ms {
            return Err(TimelineError::structural(
                index,
                format!(
                    "ends at {}ms before it starts at {}ms",
                    caption.end_ms, caption.start_ms
                ),
            ));
        }

        let silence_ms = caption.end_ms.checked_add(1).ok_or_else(|| {
            TimelineError::structural(index, format!("end offset {}ms overflows", caption.end_ms))
        })?;

        match self.events.last() {
            Some(previous) if caption.start_ms <= previous.offset_ms => {
                return Err(TimelineError::structural(
                    index,
                    format!(
                        "starts at {}ms, not after the previous event at {}ms",
                        caption.start_ms, previous.offset_ms
                    ),
                ));
            }
            None if caption.start_ms > 0 => {
                self.events.push(DisplayEvent::silence(0, 0));
            }
            _ => {}
        }

        let sequence = self.events.len();
        self.events
            .push(DisplayEvent::caption(sequence, caption.start_ms, caption.text.clone()));
        self.events.push(DisplayEvent::silence(sequence + 1, silence_ms));
        self.captions_seen += 1;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn finish(self) -> Vec<DisplayEvent> {
        self.events
    }
}

/// Upper bound on events produced from `captions` captions.
pub fn event_capacity(captions: usize) -> usize {
    captions.saturating_mul(2).saturating_add(1)
}

/// Sequence a whole caption list.
pub fn sequence(captions: &[Caption]) -> Result<Vec<DisplayEvent>, TimelineError> {
    let mut sequencer = Sequencer::with_capacity(captions.len());
    for caption in captions {
        sequencer.push(caption)?;
    }
    Ok(sequencer.finish())
}
