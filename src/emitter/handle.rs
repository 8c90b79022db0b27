//! # Producer-facing emitter handle.
//!
//! [`Emitter`] is what producers hold. It is cheap to clone; all clones feed the
//! same channel and the same single consumer obtained via [`Emitter::iterate`].

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::config::EmitterConfig;
use crate::consumer::Consumer;
use crate::error::{EmitterError, FailureReason};

use super::builder::EmitterBuilder;
use super::future::Acknowledgment;
use super::state::Shared;

/// Priority-ordered, backpressure-aware channel (producer side).
///
/// ## Example
/// ```rust
/// use priority_emitter::Emitter;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), priority_emitter::EmitterError> {
///     let emitter = Emitter::new();
///
///     let _ = emitter.emit("message one", 0)?;
///     let _ = emitter.emit("message two", 0)?;
///     let _ = emitter.emit("important message", 5)?;
///     emitter.complete()?;
///
///     let consumer = emitter.iterate();
///     let mut seen = Vec::new();
///     while consumer.advance().await? {
///         seen.push(consumer.current()?);
///     }
///     assert_eq!(seen, ["important message", "message one", "message two"]);
///     Ok(())
/// }
/// ```
pub struct Emitter<T> {
    shared: Arc<Shared<T>>,
    default_priority: i64,
}

impl<T> Emitter<T> {
    /// Creates an emitter with default configuration and no subscribers.
    ///
    /// Does not require a running tokio runtime.
    pub fn new() -> Self {
        Self::from_parts(Shared::new(None, None, None), &EmitterConfig::default())
    }

    /// Returns a builder for an emitter with custom configuration and subscribers.
    pub fn builder(cfg: EmitterConfig) -> EmitterBuilder<T> {
        EmitterBuilder::new(cfg)
    }

    pub(crate) fn from_parts(shared: Shared<T>, cfg: &EmitterConfig) -> Self {
        Self {
            shared: Arc::new(shared),
            default_priority: cfg.default_priority,
        }
    }

    /// Emits a value with the given priority (larger is served first).
    ///
    /// Returns an [`Acknowledgment`] that resolves once the value is consumed,
    /// or immediately when a consumer was already waiting for it.
    ///
    /// # Errors
    /// [`EmitterError::ChannelClosed`] if the channel was completed or failed.
    pub fn emit(&self, value: T, priority: i64) -> Result<Acknowledgment, EmitterError> {
        self.shared.emit(value, priority)
    }

    /// Emits a value with the configured default priority.
    pub fn emit_default(&self, value: T) -> Result<Acknowledgment, EmitterError> {
        self.shared.emit(value, self.default_priority)
    }

    /// Completes the channel. The consumer drains buffered values, then
    /// observes `advance() == Ok(false)`.
    ///
    /// # Errors
    /// [`EmitterError::AlreadyTerminal`] if the channel was already completed or failed.
    pub fn complete(&self) -> Result<(), EmitterError> {
        self.shared.complete()
    }

    /// Fails the channel with an application error.
    ///
    /// The consumer receives [`EmitterError::ProducerFailure`] carrying this
    /// error, immediately if it is waiting or after buffered values are drained.
    ///
    /// # Errors
    /// [`EmitterError::AlreadyTerminal`] if the channel was already completed or failed.
    pub fn fail<E>(&self, error: E) -> Result<(), EmitterError>
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        let boxed: Box<dyn StdError + Send + Sync + 'static> = error.into();
        self.shared.fail(Arc::from(boxed))
    }

    /// Fails the channel with an already shared reason, delivered as-is.
    pub fn fail_with(&self, reason: FailureReason) -> Result<(), EmitterError> {
        self.shared.fail(reason)
    }

    /// Returns the consumer handle.
    ///
    /// Only one logical consumer is supported; every call returns a handle to
    /// the same consumer position.
    pub fn iterate(&self) -> Consumer<T> {
        Consumer::new(Arc::clone(&self.shared))
    }

    /// Number of buffered values (and of producers waiting on backpressure).
    pub fn len(&self) -> usize {
        self.shared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` once `complete()` or `fail()` succeeded.
    pub fn is_terminal(&self) -> bool {
        self.shared.is_terminal()
    }

    /// Channel name from the configuration, if any.
    pub fn name(&self) -> Option<&str> {
        self.shared.channel()
    }
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            default_priority: self.default_priority,
        }
    }
}

impl<T> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("name", &self.name())
            .field("buffered", &self.len())
            .field("terminal", &self.is_terminal())
            .finish()
    }
}
