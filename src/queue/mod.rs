//! Stable priority queue and its ordering key.
//!
//! This module groups the ordering primitives used by the emitter:
//!
//! ## Contents
//! - [`PriorityKey`] composite `(priority, sequence)` ordering key
//! - [`Sequence`] monotonic `u64` sequence generator
//! - [`StablePriorityQueue`] max-priority-first queue with FIFO among equals
//!
//! ## Quick wiring
//! ```text
//! Emitter
//!   ├─ Sequence ──next(priority)──► PriorityKey
//!   ├─ StablePriorityQueue<PendingValue>   (buffered values)
//!   └─ StablePriorityQueue<Waiter>         (backpressure waiters)
//!        both keyed from the same Sequence, so paired entries extract in lockstep
//! ```

mod key;
mod stable;

pub use key::{PriorityKey, Sequence};
pub use stable::StablePriorityQueue;
