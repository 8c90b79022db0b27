//! # Futures returned by the emitter.
//!
//! - [`Acknowledgment`]: returned by `emit()`; resolves once the value is consumed.
//! - [`Advance`]: returned by `advance()`; resolves to "has next".
//!
//! Both are decided **eagerly**: the state transition happens when the method is
//! called, and the future only waits for the other side to resolve it. An
//! outcome known at call time (handoff, buffered value, terminal state, misuse)
//! yields an already-resolved future.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::error::EmitterError;

/// Producer-side acknowledgment of an emitted value.
///
/// Resolves to:
/// - `Ok(())` immediately when the value was handed to a waiting consumer;
/// - `Ok(())` once the consumer advances onto this exact value;
/// - `Err(ChannelClosed)` if the channel is dropped while the value is still buffered.
#[must_use = "awaiting the acknowledgment is what applies backpressure"]
#[derive(Debug)]
pub struct Acknowledgment {
    rx: Option<oneshot::Receiver<()>>,
}

impl Acknowledgment {
    pub(crate) fn handed_off() -> Self {
        Self { rx: None }
    }

    pub(crate) fn pending(rx: oneshot::Receiver<()>) -> Self {
        Self { rx: Some(rx) }
    }

    /// Returns `true` if the value went straight to a waiting consumer.
    pub fn is_handed_off(&self) -> bool {
        self.rx.is_none()
    }
}

impl Future for Acknowledgment {
    type Output = Result<(), EmitterError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.get_mut().rx.as_mut() {
            None => Poll::Ready(Ok(())),
            Some(rx) => Pin::new(rx)
                .poll(cx)
                .map(|r| r.map_err(|_| EmitterError::ChannelClosed)),
        }
    }
}

/// Consumer-side result of `advance()`.
///
/// Resolves to `Ok(true)` when a new current value is available, `Ok(false)`
/// when the channel completed, or an error (`ReentrantAdvance`,
/// `ProducerFailure`).
#[must_use = "the consumer must await advance() before advancing again"]
#[derive(Debug)]
pub struct Advance {
    inner: AdvanceInner,
}

#[derive(Debug)]
enum AdvanceInner {
    Ready(Result<bool, EmitterError>),
    Waiting(oneshot::Receiver<Result<bool, EmitterError>>),
}

impl Advance {
    pub(crate) fn ready(result: Result<bool, EmitterError>) -> Self {
        Self {
            inner: AdvanceInner::Ready(result),
        }
    }

    pub(crate) fn waiting(rx: oneshot::Receiver<Result<bool, EmitterError>>) -> Self {
        Self {
            inner: AdvanceInner::Waiting(rx),
        }
    }

    /// Returns `true` if the outcome was already known when `advance()` was called.
    pub fn is_ready(&self) -> bool {
        matches!(self.inner, AdvanceInner::Ready(_))
    }
}

impl Future for Advance {
    type Output = Result<bool, EmitterError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().inner {
            AdvanceInner::Ready(result) => Poll::Ready(result.clone()),
            AdvanceInner::Waiting(rx) => Pin::new(rx)
                .poll(cx)
                .map(|r| r.unwrap_or(Err(EmitterError::ChannelClosed))),
        }
    }
}
