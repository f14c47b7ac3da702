//! Where transitions go.

use std::fmt;
use std::io;

use crate::timeline::{DisplayEvent, EventKind};

/// A change in what the caption area should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Clear the caption area
    Blank { sequence: usize, offset_ms: u64 },
    /// Show caption text
    Caption {
        sequence: usize,
        offset_ms: u64,
        text: String,
    },
}

impl Transition {
    pub fn sequence(&self) -> usize {
        match self {
            Self::Blank { sequence, .. } | Self::Caption { sequence, .. } => *sequence,
        }
    }

    pub fn offset_ms(&self) -> u64 {
        match self {
            Self::Blank { offset_ms, .. } | Self::Caption { offset_ms, .. } => *offset_ms,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank { .. })
    }
}

impl From<&DisplayEvent> for Transition {
    fn from(event: &DisplayEvent) -> Self {
        match &event.kind {
            EventKind::Silence => Self::Blank {
                sequence: event.sequence,
                offset_ms: event.offset_ms,
            },
            EventKind::Caption(text) => Self::Caption {
                sequence: event.sequence,
                offset_ms: event.offset_ms,
                text: text.clone(),
            },
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank { .. } => write!(f, "<blank>"),
            Self::Caption { text, .. } => write!(f, "{}", text),
        }
    }
}

/// Receives transitions from a driver. Rendering is up to the host.
pub trait TransitionSink {
    fn emit(&mut self, transition: &Transition) -> io::Result<()>;
}

impl<S: TransitionSink + ?Sized> TransitionSink for &mut S {
    fn emit(&mut self, transition: &Transition) -> io::Result<()> {
        (**self).emit(transition)
    }
}

/// Keeps every transition in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub transitions: Vec<Transition>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sequences(&self) -> Vec<usize> {
        self.transitions.iter().map(Transition::sequence).collect()
    }
}

impl TransitionSink for CollectingSink {
    fn emit(&mut self, transition: &Transition) -> io::Result<()> {
        self.transitions.push(transition.clone());
        Ok(())
    }
}
