//! # Channel events published by the emitter.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Flow events**: a value was handed off, buffered or consumed; the consumer is waiting
//! - **Terminal events**: the channel completed or failed
//! - **Diagnostic events**: API misuse and subscriber health
//!
//! The [`Event`] struct carries additional metadata such as timestamps, the channel name,
//! the ordering key of the value involved and the buffered depth.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use priority_emitter::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::ValueBuffered)
//!     .with_channel("jobs")
//!     .with_key(5, 12)
//!     .with_pending(3);
//!
//! assert_eq!(ev.kind, EventKind::ValueBuffered);
//! assert_eq!(ev.channel.as_deref(), Some("jobs"));
//! assert_eq!(ev.priority, Some(5));
//! assert_eq!(ev.pending, Some(3));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::queue::PriorityKey;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of channel events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Flow events ===
    /// A value went straight to a waiting consumer (no backpressure applied).
    ///
    /// Sets:
    /// - `priority`, `sequence`: key of the value
    /// - `pending`: buffered depth (always 0)
    ValueHandedOff,

    /// A value was buffered; its producer now waits for consumption.
    ///
    /// Sets:
    /// - `priority`, `sequence`: key of the value
    /// - `pending`: buffered depth after insertion
    ValueBuffered,

    /// The consumer took a buffered value and released its producer.
    ///
    /// Sets:
    /// - `priority`, `sequence`: key of the value
    /// - `pending`: buffered depth after extraction
    ValueConsumed,

    /// The consumer suspended in `advance()` with nothing buffered.
    ConsumerWaiting,

    // === Terminal events ===
    /// The channel was completed.
    ///
    /// Sets:
    /// - `pending`: values still to be drained
    Completed,

    /// The channel was failed by a producer.
    ///
    /// Sets:
    /// - `pending`: values still to be drained
    /// - `reason`: failure message
    Failed,

    // === Diagnostic events ===
    /// An operation was rejected as API misuse.
    ///
    /// Sets:
    /// - `reason`: error label (e.g. `"reentrant_advance"`)
    ContractViolation,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `channel`: subscriber name
    /// - `reason`: reason string (e.g., "full", "closed")
    SubscriberOverflow,

    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `channel`: subscriber name
    /// - `reason`: panic info/message
    SubscriberPanicked,
}

/// Channel event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Channel name (or subscriber name for subscriber events).
    pub channel: Option<Arc<str>>,
    /// Priority of the value involved.
    pub priority: Option<i64>,
    /// Emit sequence of the value involved.
    pub sequence: Option<u64>,
    /// Buffered depth after the operation.
    pub pending: Option<usize>,
    /// Human-readable reason (errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            channel: None,
            priority: None,
            sequence: None,
            pending: None,
            reason: None,
        }
    }

    /// Attaches a channel name.
    #[inline]
    pub fn with_channel(mut self, channel: impl Into<Arc<str>>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Attaches an optional channel name.
    #[inline]
    pub fn with_channel_opt(mut self, channel: Option<&Arc<str>>) -> Self {
        self.channel = channel.cloned();
        self
    }

    /// Attaches the ordering key of the value involved.
    #[inline]
    pub fn with_key(mut self, priority: i64, sequence: u64) -> Self {
        self.priority = Some(priority);
        self.sequence = Some(sequence);
        self
    }

    #[inline]
    pub(crate) fn with_priority_key(self, key: PriorityKey) -> Self {
        self.with_key(key.priority, key.sequence)
    }

    /// Attaches the buffered depth.
    #[inline]
    pub fn with_pending(mut self, pending: usize) -> Self {
        self.pending = Some(pending);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_channel(subscriber)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_channel(subscriber)
            .with_reason(info)
    }

    #[inline]
    pub fn is_subscriber_overflow(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberOverflow)
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, EventKind::Completed | EventKind::Failed)
    }
}
