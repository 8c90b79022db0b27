//! # Event subscribers for emitter observability.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out,
//! and (with the `logging` feature) the built-in [`LogWriter`].
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Emitter ── publish(Event) ──► Bus ──► listener ──► SubscriberSet
//!                                                         │
//!                                             ┌───────────┼───────────┐
//!                                             ▼           ▼           ▼
//!                                         LogWriter    Metrics     Custom
//! ```
//!
//! Subscribers observe; they never influence delivery order or backpressure.

#[cfg(feature = "logging")]
mod embedded;
mod subscribe;
mod subscriber_set;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
pub use subscribe::Subscribe;
pub use subscriber_set::SubscriberSet;
