//! Error types used by the emitter and its consumer handle.
//!
//! [`EmitterError`] covers two groups of failures:
//!
//! - **contract violations** raised at the call site (`ReentrantAdvance`,
//!   `ChannelClosed`, `AlreadyTerminal`, `PrematureGetCurrent`, `EndedWithNoItems`);
//! - the **producer failure** passed to [`Emitter::fail`](crate::Emitter::fail)
//!   and delivered to the consumer unchanged.
//!
//! The enum provides helper methods (`as_label`, `as_message`) for logging/metrics.

use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

/// Application error a producer ends the channel with.
///
/// Shared so the consumer observes the exact same error value, on every
/// `advance()` after the buffered values are drained.
pub type FailureReason = Arc<dyn StdError + Send + Sync + 'static>;

/// # Errors produced by the emitter.
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum EmitterError {
    /// `advance()` was called while a previous `advance()` had not resolved.
    #[error("the prior advance() must resolve before advancing again")]
    ReentrantAdvance,

    /// `emit()` was called after the channel reached its terminal outcome.
    #[error("channel is closed; no further values are accepted")]
    ChannelClosed,

    /// `complete()` or `fail()` was called after the channel reached its terminal outcome.
    #[error("channel has already been completed or failed")]
    AlreadyTerminal,

    /// `current()` was called before any successful `advance()`.
    #[error("advance() must resolve before reading the current value")]
    PrematureGetCurrent,

    /// `current()` was called on a channel that ended without yielding any value.
    #[error("channel ended with no items")]
    EndedWithNoItems,

    /// The producer side ended the channel with an error.
    #[error("producer failed: {0}")]
    ProducerFailure(FailureReason),
}

impl EmitterError {
    /// Wraps an application error as a producer failure.
    pub fn producer<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        EmitterError::ProducerFailure(Arc::new(error))
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use priority_emitter::EmitterError;
    ///
    /// assert_eq!(EmitterError::ChannelClosed.as_label(), "channel_closed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EmitterError::ReentrantAdvance => "reentrant_advance",
            EmitterError::ChannelClosed => "channel_closed",
            EmitterError::AlreadyTerminal => "already_terminal",
            EmitterError::PrematureGetCurrent => "premature_get_current",
            EmitterError::EndedWithNoItems => "ended_with_no_items",
            EmitterError::ProducerFailure(_) => "producer_failure",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            EmitterError::ProducerFailure(reason) => format!("producer failure: {reason}"),
            other => other.to_string(),
        }
    }

    /// Indicates whether the error reports misuse of the API rather than an
    /// application failure.
    ///
    /// # Example
    /// ```
    /// use priority_emitter::EmitterError;
    ///
    /// assert!(EmitterError::ReentrantAdvance.is_contract_violation());
    ///
    /// let failed = EmitterError::producer(std::io::Error::other("disk gone"));
    /// assert!(!failed.is_contract_violation());
    /// ```
    pub fn is_contract_violation(&self) -> bool {
        !matches!(self, EmitterError::ProducerFailure(_))
    }

    /// Returns the producer's failure reason, if this is a producer failure.
    pub fn reason(&self) -> Option<&FailureReason> {
        match self {
            EmitterError::ProducerFailure(reason) => Some(reason),
            _ => None,
        }
    }
}
