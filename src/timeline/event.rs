//! Display events and the caption records they are sequenced from.

use std::fmt;

use serde::{Deserialize, Serialize};

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// A pre-parsed caption interval.
///
/// `start_ms` is the first visible millisecond and `end_ms` the last one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caption {
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
}

impl Caption {
    pub fn new(start_ms: u64, end_ms: u64, text: impl Into<String>) -> Self {
        Self {
            start_ms,
            end_ms,
            text: text.into(),
        }
    }
}

/// What the caption area shows while an event is current.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EventKind {
    /// Nothing on screen
    Silence,
    /// Caption text (lines separated by `\n`)
    Caption(String),
}

/// An atomic display state, in effect from `offset_ms` until the next event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayEvent {
    /// Dense position in the event store, `0..len`
    pub sequence: usize,
    /// Instant from which this event becomes current
    pub offset_ms: u64,
    pub kind: EventKind,
}

impl DisplayEvent {
    pub fn silence(sequence: usize, offset_ms: u64) -> Self {
        Self {
            sequence,
            offset_ms,
            kind: EventKind::Silence,
        }
    }

    pub fn caption(sequence: usize, offset_ms: u64, text: impl Into<String>) -> Self {
        Self {
            sequence,
            offset_ms,
            kind: EventKind::Caption(text.into()),
        }
    }

    pub fn is_silence(&self) -> bool {
        matches!(self.kind, EventKind::Silence)
    }

    /// Caption text, or an empty string for silence.
    pub fn text(&self) -> &str {
        match &self.kind {
            EventKind::Silence => "",
            EventKind::Caption(text) => text,
        }
    }
}

impl fmt::Display for DisplayEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} ", self.sequence, format_offset(self.offset_ms))?;
        match &self.kind {
            EventKind::Silence => write!(f, "<silence>"),
            EventKind::Caption(text) => write!(f, "{}", text.replace('\n', " / ")),
        }
    }
}

/// Format a millisecond offset as a subtitle timestamp (`HH:MM:SS,mmm`).
///
/// Hours are not wrapped, so offsets past 99 hours simply grow wider.
pub fn format_offset(offset_ms: u64) -> String {
    let hours = offset_ms / MS_PER_HOUR;
    let minutes = (offset_ms % MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = (offset_ms % MS_PER_MINUTE) / MS_PER_SECOND;
    let millis = offset_ms % MS_PER_SECOND;
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Errors from [`parse_offset`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseOffsetError {
    #[error("Empty offset")]
    Empty,

    #[error("Invalid offset '{input}': expected milliseconds or HH:MM:SS,mmm")]
    Malformed { input: String },

    #[error("Offset '{input}' is too large")]
    Overflow { input: String },
}

/// Parse an offset given either as plain milliseconds (`61500`) or as a
/// subtitle timestamp (`00:01:01,500`, `.` also accepted before the millis).
pub fn parse_offset(input: &str) -> Result<u64, ParseOffsetError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseOffsetError::Empty);
    }

    let malformed = || ParseOffsetError::Malformed {
        input: input.to_string(),
    };
    let overflow = || ParseOffsetError::Overflow {
        input: input.to_string(),
    };

    if input.bytes().all(|b| b.is_ascii_digit()) {
        return input.parse::<u64>().map_err(|_| overflow());
    }

    let (clock, millis) = match input.rsplit_once([',', '.']) {
        Some((clock, millis)) => (clock, millis),
        None => (input, "0"),
    };
    if millis.is_empty() || millis.len() > 3 || !millis.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    // "5" after the separator means 500ms, as in a decimal fraction
    let millis: u64 = format!("{:0<3}", millis).parse().map_err(|_| malformed())?;

    let parts: Vec<&str> = clock.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m, s] => (*h, *m, *s),
        [m, s] => ("0", *m, *s),
        _ => return Err(malformed()),
    };

    let field = |value: &str, limit: Option<u64>| -> Result<u64, ParseOffsetError> {
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let parsed: u64 = value.parse().map_err(|_| overflow())?;
        match limit {
            Some(limit) if parsed >= limit => Err(malformed()),
            _ => Ok(parsed),
        }
    };

    let hours = field(hours, None)?;
    let minutes = field(minutes, Some(60))?;
    let seconds = field(seconds, Some(60))?;

    hours
        .checked_mul(MS_PER_HOUR)
        .and_then(|ms| ms.checked_add(minutes * MS_PER_MINUTE))
        .and_then(|ms| ms.checked_add(seconds * MS_PER_SECOND))
        .and_then(|ms| ms.checked_add(millis))
        .ok_or_else(overflow)
}
