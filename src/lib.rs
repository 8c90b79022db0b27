//! # priority-emitter
//!
//! **priority-emitter** is a priority-ordered, backpressure-aware async channel.
//!
//! Many producers emit values tagged with an integer priority; one consumer pulls
//! them one at a time and always receives the highest-priority pending value,
//! with emission order breaking ties. A producer's acknowledgment stays pending
//! until that exact value has been consumed, unless the consumer was already
//! waiting, in which case the value is handed off immediately.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   ┌────────────┐   ┌────────────┐   ┌────────────┐
//!   │ producer 1 │   │ producer 2 │   │ producer N │      Emitter (Clone)
//!   └─────┬──────┘   └─────┬──────┘   └─────┬──────┘
//!         │ emit(v, p)     │ emit(v, p)     │ complete() / fail(e)
//!         ▼                ▼                ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  Shared state (one mutex)                                        │
//! │  - buffered:     StablePriorityQueue<T>       (priority, seq)    │
//! │  - backpressure: StablePriorityQueue<waiter>  same keys          │
//! │  - waiting consumer slot                                         │
//! │  - terminal outcome (Completed | Failed)                         │
//! └──────────────┬──────────────────────────────────────┬────────────┘
//!                │ advance() / current()                │ publish(Event)
//!                ▼                                      ▼
//!         ┌────────────┐                        Bus ──► SubscriberSet
//!         │  Consumer  │                                ├─► LogWriter
//!         └────────────┘                                └─► custom Subscribe
//! ```
//!
//! ### Lifecycle
//! ```text
//! Emitter::new() / Emitter::builder(cfg).build()
//!   ├─► emit(v, p)*          values buffered or handed off
//!   ├─► complete() | fail(e) exactly once; later emit() → ChannelClosed
//!   └─► consumer drains the buffer, then observes Ok(false) | Err(ProducerFailure)
//! ```
//!
//! ## Features
//! | Area              | Description                                               | Key types / traits                        |
//! |-------------------|-----------------------------------------------------------|-------------------------------------------|
//! | **Producers**     | Emit with priority, complete or fail the channel.          | [`Emitter`], [`Acknowledgment`]           |
//! | **Consumer**      | Pull values in priority order.                             | [`Consumer`], [`Consume`], [`Advance`]    |
//! | **Ordering**      | Stable max-priority queue.                                 | [`StablePriorityQueue`], [`PriorityKey`]  |
//! | **Subscriber API**| Observe channel activity (logging, metrics).               | [`Subscribe`], [`Event`], [`EventKind`]   |
//! | **Errors**        | Typed contract violations and producer failures.           | [`EmitterError`]                          |
//! | **Configuration** | Channel name, default priority, bus capacity.              | [`EmitterConfig`], [`EmitterBuilder`]     |
//!
//! ## Optional features
//! - `logging`: exports the built-in [`LogWriter`] subscriber (writes via `tracing`).
//!
//! ## Example
//! ```rust
//! use priority_emitter::{Emitter, EmitterError};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), EmitterError> {
//!     let emitter = Emitter::new();
//!     let consumer = emitter.iterate();
//!
//!     let producer = emitter.clone();
//!     let handle = tokio::spawn(async move {
//!         for (job, priority) in [("rebuild-index", 0), ("page-oncall", 9), ("gc", 0)] {
//!             let ack = producer.emit(job, priority)?;
//!             // Backpressure: wait until the consumer took this job.
//!             ack.await?;
//!         }
//!         producer.complete()
//!     });
//!
//!     while consumer.advance().await? {
//!         println!("running {}", consumer.current()?);
//!     }
//!     handle.await.map_err(|_| EmitterError::ChannelClosed)??;
//!     Ok(())
//! }
//! ```

mod config;
mod consumer;
mod emitter;
mod error;
mod events;
mod queue;
mod subscribers;

// ---- Public re-exports ----

pub use config::EmitterConfig;
pub use consumer::{Consume, Consumer};
pub use emitter::{Acknowledgment, Advance, Emitter, EmitterBuilder};
pub use error::{EmitterError, FailureReason};
pub use events::{Bus, Event, EventKind};
pub use queue::{PriorityKey, Sequence, StablePriorityQueue};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
