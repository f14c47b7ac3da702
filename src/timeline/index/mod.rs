//! Digit index over display event offsets.
//!
//! A fixed-depth, base-10 branching trie keyed on the truncated decimal
//! digits of each event's offset. Leaves point into the [`EventStore`], which
//! resolves whatever the trie's resolution cannot distinguish.
//!
//! # Module Structure
//!
//! - [`layout`] - Positional divisors (depth and resolution)
//! - `node` - Arena nodes and child selection helpers
//! - `search` - Nearest-match lookup

pub mod layout;
mod node;
mod search;

use tracing::trace;

pub use layout::{IndexLayout, LayoutError};

use self::node::{Node, NodeId, ROOT};
use super::error::TimelineError;
use super::event::DisplayEvent;
use super::store::EventStore;

/// Write-once, read-many index answering floor queries over display events.
///
/// Nodes live in an arena and are addressed by [`NodeId`]; branches are only
/// allocated for digits that were actually observed, so memory stays
/// proportional to `events x depth`.
#[derive(Debug, Clone)]
pub struct DigitIndex {
    layout: IndexLayout,
    nodes: Vec<Node>,
    store: EventStore,
}

impl DigitIndex {
    pub fn new(layout: IndexLayout, capacity: usize) -> Self {
        Self {
            layout,
            nodes: vec![Node::empty_branch()],
            store: EventStore::with_capacity(capacity),
        }
    }

    /// Store an event and index its bucket.
    ///
    /// The first event to reach a bucket owns its leaf; later events in the
    /// same bucket are only stored and found through the store scan.
    pub fn insert(&mut self, event: DisplayEvent) -> Result<usize, TimelineError> {
        let offset_ms = event.offset_ms;
        let max_ms = self.layout.max_offset_ms();
        if offset_ms > max_ms {
            return Err(TimelineError::OffsetOutOfRange { offset_ms, max_ms });
        }

        let position = self.store.push(event)?;
        let last_level = self.layout.depth() - 1;
        let mut node = ROOT;

        for (level, digit) in self.layout.digits(offset_ms).enumerate() {
            let existing = match &self.nodes[node] {
                Node::Branch(children) => children[digit],
                Node::Leaf(_) => {
                    return Err(TimelineError::IndexCorruption {
                        query_ms: offset_ms,
                        depth: level,
                        detail: "leaf found above the final digit level",
                    })
                }
            };

            node = match existing {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(if level == last_level {
                        Node::Leaf(position)
                    } else {
                        Node::empty_branch()
                    });
                    if let Node::Branch(children) = &mut self.nodes[node] {
                        children[digit] = Some(child);
                    }
                    child
                }
            };
        }

        trace!(position, offset_ms, nodes = self.nodes.len(), "indexed event");
        Ok(position)
    }

    pub fn layout(&self) -> IndexLayout {
        self.layout
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Total arena size, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct buckets (leaves) in the trie.
    pub fn bucket_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Leaf(_)))
            .count()
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }
}
