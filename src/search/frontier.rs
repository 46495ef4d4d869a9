use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::search::node::SearchNode;

struct Entry {
    node: SearchNode,
    seq: u64,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Inverted on purpose: BinaryHeap is a max-heap and the frontier
        // pops minima. Equal bounds fall back to insertion order so pops
        // are deterministic.
        other
            .node
            .lower_bound
            .total_cmp(&self.node.lower_bound)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// The best-first frontier: pending search nodes ordered by lower bound.
///
/// Nodes are owned by the frontier while queued and handed back on pop;
/// they are never reprioritized or removed from the middle.
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Frontier {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    pub fn push(&mut self, node: SearchNode) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Entry { node, seq });
    }

    /// Removes and returns the node with the smallest lower bound.
    pub fn pop_min(&mut self) -> Option<SearchNode> {
        self.heap.pop().map(|entry| entry.node)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}
