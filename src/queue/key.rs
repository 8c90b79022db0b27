//! # Composite ordering key.
//!
//! [`PriorityKey`] orders items by priority **descending**, then by sequence
//! **ascending**, so that `max()` is the highest-priority, earliest-inserted item.
//!
//! ```text
//! (5, seq=3) > (5, seq=7) > (0, seq=1) > (-2, seq=0)
//! ```
//!
//! [`Sequence`] hands out keys from a monotonically increasing `u64` counter.

use std::cmp::Ordering;

/// Ordering key of a queued item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PriorityKey {
    /// Consumption priority; larger values are served first.
    pub priority: i64,
    /// Insertion sequence; smaller values are served first among equal priorities.
    pub sequence: u64,
}

impl PriorityKey {
    /// Creates a key from its parts.
    #[inline]
    pub fn new(priority: i64, sequence: u64) -> Self {
        Self { priority, sequence }
    }
}

impl Ord for PriorityKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for PriorityKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Monotonic sequence generator.
///
/// A `u64` counter incremented once per key; it does not wrap within any
/// realistic lifetime of an emitter.
#[derive(Debug, Default)]
pub struct Sequence {
    next: u64,
}

impl Sequence {
    /// Creates a generator starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh key for `priority` and advances the counter.
    #[inline]
    pub fn next(&mut self, priority: i64) -> PriorityKey {
        let key = PriorityKey::new(priority, self.next);
        self.next += 1;
        key
    }

    /// Number of keys issued so far.
    #[inline]
    pub fn issued(&self) -> u64 {
        self.next
    }
}
