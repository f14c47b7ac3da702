//! Arena-allocated trie nodes.

/// Position of a node in the index arena.
pub type NodeId = usize;

/// Arena slot of the root branch.
pub const ROOT: NodeId = 0;

/// One trie node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// One optional child per decimal digit
    Branch([Option<NodeId>; 10]),
    /// Event store position of the first event that reached this bucket
    Leaf(usize),
}

impl Node {
    pub fn empty_branch() -> Self {
        Node::Branch([None; 10])
    }
}

/// Closest populated digit to `digit`, nearest first, lower digit on ties.
///
/// `digit` itself is skipped: callers only ask once the exact child is known
/// to be absent.
pub fn nearest_child(children: &[Option<NodeId>; 10], digit: usize) -> Option<(usize, NodeId)> {
    for distance in 1..10 {
        let below = digit.checked_sub(distance);
        let above = Some(digit + distance).filter(|d| *d < 10);
        for candidate in [below, above].into_iter().flatten() {
            if let Some(id) = children[candidate] {
                return Some((candidate, id));
            }
        }
    }
    None
}

/// Highest populated child (searching 9 downward).
pub fn highest_child(children: &[Option<NodeId>; 10]) -> Option<NodeId> {
    children.iter().rev().find_map(|child| *child)
}

/// Lowest populated child (searching 0 upward).
pub fn lowest_child(children: &[Option<NodeId>; 10]) -> Option<NodeId> {
    children.iter().find_map(|child| *child)
}
