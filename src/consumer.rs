//! # Consumer handle.
//!
//! [`Consumer`] is the only way to pull values out of an [`Emitter`](crate::Emitter).
//! It forwards `advance()`/`current()` to the channel state and exposes nothing
//! else, so consumer code cannot emit, complete or fail the channel.
//!
//! The [`Consume`] trait names that two-method surface, for code that should
//! accept any priority-ordered source.
//!
//! ## Protocol
//! ```text
//! loop {
//!   advance().await ─┬─ Ok(true)  → current() returns the next value
//!                    ├─ Ok(false) → channel completed, all values drained
//!                    └─ Err(e)    → producer failure or misuse
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use crate::emitter::{Advance, Shared};
use crate::error::EmitterError;

/// Consumer-side interface of a priority channel.
pub trait Consume<T> {
    /// Moves to the next value; see [`Advance`].
    ///
    /// Must not be called again until the returned future resolved; an
    /// overlapping call resolves to [`EmitterError::ReentrantAdvance`].
    fn advance(&self) -> Advance;

    /// Returns the value the last successful `advance()` moved to.
    ///
    /// # Errors
    /// - [`EmitterError::PrematureGetCurrent`] before any successful `advance()`
    /// - [`EmitterError::EndedWithNoItems`] if the channel ended without values
    fn current(&self) -> Result<T, EmitterError>;
}

/// Handle given to the single consumer of an emitter.
pub struct Consumer<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Consumer<T> {
    pub(crate) fn new(shared: Arc<Shared<T>>) -> Self {
        Self { shared }
    }

    /// See [`Consume::advance`].
    pub fn advance(&self) -> Advance {
        self.shared.advance()
    }
}

impl<T: Clone> Consumer<T> {
    /// See [`Consume::current`].
    pub fn current(&self) -> Result<T, EmitterError> {
        self.shared.current()
    }
}

impl<T: Clone> Consume<T> for Consumer<T> {
    fn advance(&self) -> Advance {
        Consumer::advance(self)
    }

    fn current(&self) -> Result<T, EmitterError> {
        Consumer::current(self)
    }
}

impl<T> fmt::Debug for Consumer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Consumer")
            .field("channel", &self.shared.channel())
            .finish_non_exhaustive()
    }
}
