//! Nearest-match search: trie descent, then store resolution.

use tracing::trace;

use super::node::{highest_child, lowest_child, nearest_child, Node, ROOT};
use super::DigitIndex;
use crate::timeline::error::TimelineError;
use crate::timeline::event::DisplayEvent;

/// How the descent picks children once it has left the query's exact path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Descent {
    /// Follow the query digit at every level
    Exact,
    /// Diverged below the query: take the highest child from here on
    Floor,
    /// Diverged above the query: take the lowest child from here on
    Ceiling,
}

impl DigitIndex {
    /// Return the event current at `query_ms`: the latest event whose offset
    /// is at or before the query, or the first event if the query precedes
    /// them all.
    ///
    /// The trie locates a bucket adjacent to the query; the event store scan
    /// then settles the exact predecessor, including digits below the index
    /// resolution.
    pub fn lookup(&self, query_ms: u64) -> Result<&DisplayEvent, TimelineError> {
        if self.store.is_empty() {
            return Err(TimelineError::EmptyIndex);
        }

        // Everything stored fits under the maximum, so clamping only affects
        // which bucket the descent lands in. The store scan uses the real query.
        let key = query_ms.min(self.layout.max_offset_ms());
        let mut descent = Descent::Exact;
        let mut node = ROOT;

        for (depth, digit) in self.layout.digits(key).enumerate() {
            let children = match self.node(node) {
                Node::Branch(children) => children,
                Node::Leaf(position) => return self.resolve(*position, query_ms, depth),
            };

            let next = match descent {
                Descent::Exact => match children[digit] {
                    Some(child) => Some(child),
                    None => nearest_child(children, digit).map(|(neighbour, child)| {
                        descent = if neighbour < digit {
                            Descent::Floor
                        } else {
                            Descent::Ceiling
                        };
                        trace!(query_ms, depth, digit, neighbour, ?descent, "left exact path");
                        child
                    }),
                },
                Descent::Floor => highest_child(children),
                Descent::Ceiling => lowest_child(children),
            };

            node = next.ok_or(TimelineError::IndexCorruption {
                query_ms,
                depth,
                detail: "branch has no populated children",
            })?;
        }

        match self.node(node) {
            Node::Leaf(position) => self.resolve(*position, query_ms, self.layout.depth()),
            Node::Branch(_) => Err(TimelineError::IndexCorruption {
                query_ms,
                depth: self.layout.depth(),
                detail: "digit path ended on a branch",
            }),
        }
    }

    fn resolve(
        &self,
        position: usize,
        query_ms: u64,
        depth: usize,
    ) -> Result<&DisplayEvent, TimelineError> {
        if position >= self.store.len() {
            return Err(TimelineError::IndexCorruption {
                query_ms,
                depth,
                detail: "leaf points past the event store",
            });
        }
        self.store
            .floor_from(position, query_ms)
            .ok_or(TimelineError::EmptyIndex)
    }
}
