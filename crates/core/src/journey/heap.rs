//! Indexable binary min-heap for the A* open set.
//! This module exists because the search must re-prioritize nodes that are
//! already queued, which `std::collections::BinaryHeap` cannot do in place.
//! It does not own scores; callers pass the f-score alongside each node.

use slotmap::SecondaryMap;

use crate::types::{Cost, NodeId};

/// Invariant: after every mutation, `slots[id]` is the index of `id`'s entry
/// in `entries`. Ordering is by f-score alone; entries with equal f-scores
/// come out in an insertion-order-dependent order.
#[derive(Default)]
pub(crate) struct FrontierHeap {
    entries: Vec<(NodeId, Cost)>,
    slots: SecondaryMap<NodeId, usize>,
}

impl FrontierHeap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.slots.contains_key(id)
    }

    pub(crate) fn push(&mut self, id: NodeId, f: Cost) {
        debug_assert!(!self.contains(id), "queued nodes are re-prioritized via update");
        self.entries.push((id, f));
        self.slots.insert(id, self.entries.len() - 1);
        self.sift_up(self.entries.len() - 1);
    }

    pub(crate) fn pop(&mut self) -> Option<(NodeId, Cost)> {
        if self.entries.is_empty() {
            return None;
        }
        let min = self.entries.swap_remove(0);
        self.slots.remove(min.0);
        if let Some(&(moved, _)) = self.entries.first() {
            self.slots.insert(moved, 0);
            self.sift_down(0);
        }
        Some(min)
    }

    /// Re-establish heap order for an already-queued node whose priority
    /// changed. A node that is not queued is left alone.
    pub(crate) fn update(&mut self, id: NodeId, f: Cost) {
        let Some(&index) = self.slots.get(id) else {
            return;
        };
        self.entries[index].1 = f;
        let index = self.sift_up(index);
        self.sift_down(index);
    }

    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.entries[parent].1.total_cmp(&self.entries[index].1).is_le() {
                break;
            }
            self.swap(parent, index);
            index = parent;
        }
        index
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let left = 2 * index + 1;
            if left >= self.entries.len() {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < self.entries.len()
                && self.entries[right].1.total_cmp(&self.entries[left].1).is_lt()
            {
                child = right;
            }
            if self.entries[index].1.total_cmp(&self.entries[child].1).is_le() {
                break;
            }
            self.swap(index, child);
            index = child;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
        self.slots.insert(self.entries[a].0, a);
        self.slots.insert(self.entries[b].0, b);
    }
}
