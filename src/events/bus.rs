//! # Event bus for broadcasting channel events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`] that provides
//! non-blocking event publishing from the emitter's producer and consumer paths.
//!
//! ## Architecture
//! ```text
//! Publishers:                          Subscriber (one):
//!   emit()     ──┐
//!   advance()  ──┼──────► Bus ───────► listener ────► SubscriberSet
//!   complete() ──┤  (broadcast chan)   (spawned by EmitterBuilder)
//!   fail()     ──┘
//! ```
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks; it is called while the
//!   emitter's state lock is held, so it must not await.
//! - **Lagging listener**: gets `RecvError::Lagged(n)` and loses the `n` oldest
//!   events; the listener skips the gap and keeps going.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for channel events.
///
/// Clones share one ring buffer. Publishing never waits and nothing is
/// retained for receivers that subscribe later.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity.
    ///
    /// The minimum capacity is 1 (clamped).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<Event>(capacity);
        Self { tx }
    }

    /// Publishes an event to all active receivers.
    ///
    /// If there are no receivers, the event is dropped.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a new receiver that will observe subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[tokio::test]
    async fn test_publish_reaches_receiver() {
        let bus = Bus::new(4);
        let mut rx = bus.subscribe();
        bus.publish(Event::new(EventKind::Completed).with_pending(2));

        let ev = rx.recv().await.expect("event");
        assert_eq!(ev.kind, EventKind::Completed);
        assert_eq!(ev.pending, Some(2));
    }

    #[test]
    fn test_publish_without_receivers_is_dropped() {
        let bus = Bus::new(0);
        bus.publish(Event::new(EventKind::ConsumerWaiting));
        let mut rx = bus.subscribe();
        assert!(rx.try_recv().is_err());
    }
}
