//! # LogWriter: event logger
//!
//! A minimal subscriber that writes incoming [`Event`]s through `tracing`.
//! Install any `tracing` subscriber (e.g. `tracing_subscriber::fmt`) to see them.
//!
//! ## Example output
//! ```text
//! DEBUG [buffered] channel="jobs" priority=5 seq=3 pending=2
//! DEBUG [handoff] channel="jobs" priority=0 seq=4 pending=0
//! DEBUG [consumed] channel="jobs" priority=5 seq=3 pending=1
//! DEBUG [waiting] channel="jobs"
//!  INFO [completed] channel="jobs" pending=0
//!  WARN [failed] channel="jobs" pending=0 err="disk gone"
//!  WARN [violation] channel="jobs" err="reentrant_advance"
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let channel = e.channel.as_deref().unwrap_or("-");
        let reason = e.reason.as_deref().unwrap_or("unknown");
        match e.kind {
            EventKind::ValueHandedOff => {
                tracing::debug!("[handoff] channel={channel:?}{}", key_fields(e));
            }
            EventKind::ValueBuffered => {
                tracing::debug!("[buffered] channel={channel:?}{}", key_fields(e));
            }
            EventKind::ValueConsumed => {
                tracing::debug!("[consumed] channel={channel:?}{}", key_fields(e));
            }
            EventKind::ConsumerWaiting => {
                tracing::debug!("[waiting] channel={channel:?}");
            }
            EventKind::Completed => {
                tracing::info!("[completed] channel={channel:?}{}", key_fields(e));
            }
            EventKind::Failed => {
                tracing::warn!("[failed] channel={channel:?}{} err={reason:?}", key_fields(e));
            }
            EventKind::ContractViolation => {
                tracing::warn!("[violation] channel={channel:?} err={reason:?}");
            }
            EventKind::SubscriberOverflow => {
                tracing::warn!("[subscriber-overflow] subscriber={channel} {reason}");
            }
            EventKind::SubscriberPanicked => {
                tracing::error!("[subscriber-panicked] subscriber={channel} info={reason}");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}

/// Renders the ordering key and depth, skipping fields the event does not carry.
fn key_fields(e: &Event) -> String {
    let mut out = String::new();
    if let Some(priority) = e.priority {
        out.push_str(&format!(" priority={priority}"));
    }
    if let Some(sequence) = e.sequence {
        out.push_str(&format!(" seq={sequence}"));
    }
    if let Some(pending) = e.pending {
        out.push_str(&format!(" pending={pending}"));
    }
    out
}
