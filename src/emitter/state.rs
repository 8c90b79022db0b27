//! # Shared channel state and the coordination algorithm.
//!
//! [`Shared`] owns everything producers and the consumer coordinate through,
//! behind a single mutex:
//!
//! ```text
//! State {
//!     buffered:     StablePriorityQueue<T>                 values not yet consumed
//!     backpressure: StablePriorityQueue<Sender<()>>        one waiter per buffered value
//!     waiting:      Option<Sender<Result<bool, _>>>        suspended advance()
//!     terminal:     Option<Terminal>                       Completed | Failed(reason)
//!     current:      Option<T>                              last value handed to the consumer
//!     sequence:     Sequence                               shared by both queues
//! }
//! ```
//!
//! ## Invariants
//! - `buffered.len() == backpressure.len()` whenever the lock is released.
//! - `waiting` is set only while `buffered` is empty and `terminal` is unset.
//! - `terminal` is written at most once.
//!
//! ## Rules
//! - Every operation runs its check-and-mutate sequence under the lock and
//!   never awaits while holding it; suspension happens on the returned futures.
//! - A waiter is resolved only by the opposite side: producers resolve the
//!   consumer, the consumer resolves producers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::error::{EmitterError, FailureReason};
use crate::events::{Bus, Event, EventKind};
use crate::queue::{Sequence, StablePriorityQueue};

use super::future::{Acknowledgment, Advance};

/// Terminal outcome of a channel.
#[derive(Clone, Debug)]
pub(crate) enum Terminal {
    Completed,
    Failed(FailureReason),
}

impl Terminal {
    /// Result an `advance()` observes once buffered values are exhausted.
    fn outcome(&self) -> Result<bool, EmitterError> {
        match self {
            Terminal::Completed => Ok(false),
            Terminal::Failed(reason) => Err(EmitterError::ProducerFailure(Arc::clone(reason))),
        }
    }
}

struct State<T> {
    buffered: StablePriorityQueue<T>,
    backpressure: StablePriorityQueue<oneshot::Sender<()>>,
    waiting: Option<oneshot::Sender<Result<bool, EmitterError>>>,
    terminal: Option<Terminal>,
    current: Option<T>,
    sequence: Sequence,
}

/// State shared by every producer handle and the consumer handle.
pub(crate) struct Shared<T> {
    state: Mutex<State<T>>,
    channel: Option<Arc<str>>,
    bus: Option<Bus>,
    /// Stops the subscriber listener once the last handle is gone.
    listener: Option<CancellationToken>,
}

impl<T> Shared<T> {
    pub(crate) fn new(
        channel: Option<Arc<str>>,
        bus: Option<Bus>,
        listener: Option<CancellationToken>,
    ) -> Self {
        Self {
            state: Mutex::new(State {
                buffered: StablePriorityQueue::new(),
                backpressure: StablePriorityQueue::new(),
                waiting: None,
                terminal: None,
                current: None,
                sequence: Sequence::new(),
            }),
            channel,
            bus,
            listener,
        }
    }

    pub(crate) fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    /// Buffers `value` or hands it to a waiting consumer.
    pub(crate) fn emit(&self, value: T, priority: i64) -> Result<Acknowledgment, EmitterError> {
        let mut guard = self.lock();
        let state = &mut *guard;

        if state.terminal.is_some() {
            return Err(self.violation(EmitterError::ChannelClosed));
        }

        let key = state.sequence.next(priority);

        if let Some(waiting) = state.waiting.take() {
            // A dropped advance() future leaves a closed sender behind; buffer instead.
            if waiting.send(Ok(true)).is_ok() {
                let replaced = state.current.replace(value);
                self.publish(|| {
                    Event::new(EventKind::ValueHandedOff)
                        .with_priority_key(key)
                        .with_pending(0)
                });
                // The replaced value may re-enter the emitter from its Drop.
                drop(guard);
                drop(replaced);
                return Ok(Acknowledgment::handed_off());
            }
        }

        let (tx, rx) = oneshot::channel();
        state.buffered.insert_keyed(value, key);
        state.backpressure.insert_keyed(tx, key);

        let pending = state.buffered.len();
        self.publish(|| {
            Event::new(EventKind::ValueBuffered)
                .with_priority_key(key)
                .with_pending(pending)
        });
        Ok(Acknowledgment::pending(rx))
    }

    /// Ends the channel normally.
    pub(crate) fn complete(&self) -> Result<(), EmitterError> {
        self.terminate(Terminal::Completed)
    }

    /// Ends the channel with a producer failure.
    pub(crate) fn fail(&self, reason: FailureReason) -> Result<(), EmitterError> {
        self.terminate(Terminal::Failed(reason))
    }

    fn terminate(&self, outcome: Terminal) -> Result<(), EmitterError> {
        // Rendered before locking: `Display` of the reason is user code.
        let message = match &outcome {
            Terminal::Failed(reason) if self.bus.is_some() => Some(reason.to_string()),
            _ => None,
        };

        let mut guard = self.lock();
        let state = &mut *guard;

        if state.terminal.is_some() {
            return Err(self.violation(EmitterError::AlreadyTerminal));
        }

        let pending = state.buffered.len();
        self.publish(|| {
            let kind = match &outcome {
                Terminal::Completed => EventKind::Completed,
                Terminal::Failed(_) => EventKind::Failed,
            };
            let ev = Event::new(kind).with_pending(pending);
            match message {
                Some(message) => ev.with_reason(message),
                None => ev,
            }
        });

        if let Some(waiting) = state.waiting.take() {
            let _ = waiting.send(outcome.outcome());
        }
        state.terminal = Some(outcome);
        Ok(())
    }

    /// Moves the consumer to the next value.
    pub(crate) fn advance(&self) -> Advance {
        let mut guard = self.lock();
        let state = &mut *guard;

        if state.waiting.as_ref().is_some_and(|w| !w.is_closed()) {
            return Advance::ready(Err(self.violation(EmitterError::ReentrantAdvance)));
        }
        state.waiting = None;

        if let Some(key) = state.buffered.peek_key() {
            let replaced = std::mem::replace(&mut state.current, state.buffered.extract());
            // Same key as the value just taken, so this releases exactly its producer.
            if let Some(producer) = state.backpressure.extract() {
                let _ = producer.send(());
            }

            let pending = state.buffered.len();
            self.publish(|| {
                Event::new(EventKind::ValueConsumed)
                    .with_priority_key(key)
                    .with_pending(pending)
            });
            drop(guard);
            drop(replaced);
            return Advance::ready(Ok(true));
        }

        if let Some(terminal) = &state.terminal {
            return Advance::ready(terminal.outcome());
        }

        let (tx, rx) = oneshot::channel();
        state.waiting = Some(tx);
        self.publish(|| Event::new(EventKind::ConsumerWaiting));
        Advance::waiting(rx)
    }

    /// Value set by the latest successful `advance()`.
    pub(crate) fn current(&self) -> Result<T, EmitterError>
    where
        T: Clone,
    {
        let state = self.lock();
        match &state.current {
            Some(value) => Ok(value.clone()),
            None if state.terminal.is_some() => Err(self.violation(EmitterError::EndedWithNoItems)),
            None => Err(self.violation(EmitterError::PrematureGetCurrent)),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().buffered.len()
    }

    pub(crate) fn is_terminal(&self) -> bool {
        self.lock().terminal.is_some()
    }

    // ---------------------------
    // Helpers
    // ---------------------------

    /// Locks the state. Poisoning is ignored: the only user code run under the
    /// lock is `T::clone` in `current()`, which mutates nothing. Values leaving
    /// the state are dropped after the guard is released.
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publishes an event tagged with the channel name; the event is only
    /// built when a bus is attached.
    fn publish(&self, make: impl FnOnce() -> Event) {
        if let Some(bus) = &self.bus {
            bus.publish(make().with_channel_opt(self.channel.as_ref()));
        }
    }

    /// Reports a contract violation and hands the error back to the caller.
    fn violation(&self, err: EmitterError) -> EmitterError {
        self.publish(|| Event::new(EventKind::ContractViolation).with_reason(err.as_label()));
        err
    }
}

impl<T> Drop for Shared<T> {
    fn drop(&mut self) {
        if let Some(token) = &self.listener {
            token.cancel();
        }
    }
}
