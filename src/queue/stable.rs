//! # Stable priority queue.
//!
//! [`StablePriorityQueue`] is a binary max-heap whose entries are compared by
//! [`PriorityKey`] only. A plain heap keyed by priority does not keep FIFO order
//! among equal priorities; the sequence half of the key restores it.
//!
//! ## Rules
//! - `extract()` yields the maximum priority; ties go to the earliest insertion.
//! - Keys come either from the queue's own [`Sequence`] (`insert`) or from a
//!   caller-owned one (`insert_keyed`) when several queues must share a counter.
//! - The stored item never takes part in comparisons.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::key::{PriorityKey, Sequence};

/// Heap entry: an item tagged with its key.
struct Entry<T> {
    key: PriorityKey,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for Entry<T> {}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue with stable order for items of equal priority.
pub struct StablePriorityQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    sequence: Sequence,
}

impl<T> Default for StablePriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StablePriorityQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            sequence: Sequence::new(),
        }
    }

    /// Inserts an item, drawing its sequence from this queue's own counter.
    pub fn insert(&mut self, item: T, priority: i64) {
        let key = self.sequence.next(priority);
        self.heap.push(Entry { key, item });
    }

    /// Inserts an item under a key issued by an external [`Sequence`].
    ///
    /// Keys must be unique within the queue for extraction order to be total.
    pub fn insert_keyed(&mut self, item: T, key: PriorityKey) {
        self.heap.push(Entry { key, item });
    }

    /// Removes the highest-priority, earliest-inserted item.
    ///
    /// Returns `None` on an empty queue.
    pub fn extract(&mut self) -> Option<T> {
        self.heap.pop().map(|e| e.item)
    }

    /// Key of the item `extract()` would return next.
    pub fn peek_key(&self) -> Option<PriorityKey> {
        self.heap.peek().map(|e| e.key)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
