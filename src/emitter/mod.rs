//! Emitter: the priority channel coordinator.
//!
//! Internal modules:
//! - [`state`]: shared state and the emit/advance/complete/fail algorithm;
//! - [`handle`]: producer-facing [`Emitter`];
//! - [`future`]: [`Acknowledgment`] and [`Advance`] futures;
//! - [`builder`]: [`EmitterBuilder`] wiring config and subscribers.
//!
//! ## Data flow
//! ```text
//! emit(v, p) ──► consumer waiting? ──yes──► current = v, wake consumer, ack ready
//!                      │
//!                      no
//!                      ▼
//!        buffered ◄─(p, seq)─► backpressure        ack pending
//!                      │
//! advance() ───────────┘ extract max from both: current = v, release its producer
//! ```

mod builder;
mod future;
mod handle;
mod state;

pub use builder::EmitterBuilder;
pub use future::{Acknowledgment, Advance};
pub use handle::Emitter;

pub(crate) use state::Shared;
