use std::marker::PhantomData;
use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;

use crate::{
    config::EmitterConfig,
    events::Bus,
    subscribers::{Subscribe, SubscriberSet},
};

use super::{handle::Emitter, state::Shared};

/// Builder for constructing an [`Emitter`] with optional subscribers.
pub struct EmitterBuilder<T> {
    cfg: EmitterConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> EmitterBuilder<T> {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: EmitterConfig) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive channel events through dedicated workers with
    /// bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Adds a single subscriber.
    pub fn with_subscriber(mut self, subscriber: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Builds the emitter.
    ///
    /// With subscribers attached, this creates the event bus and spawns the
    /// listener task, so it must run inside a tokio runtime. Without
    /// subscribers no bus exists and no runtime is needed.
    pub fn build(self) -> Emitter<T> {
        let channel: Option<Arc<str>> = self.cfg.name.as_deref().map(Arc::from);

        if self.subscribers.is_empty() {
            return Emitter::from_parts(Shared::new(channel, None, None), &self.cfg);
        }

        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let set = SubscriberSet::new(self.subscribers, bus.clone());
        let token = CancellationToken::new();
        spawn_listener(&bus, set, token.clone());

        Emitter::from_parts(Shared::new(channel, Some(bus), Some(token)), &self.cfg)
    }
}

/// Forwards bus events to the subscriber set until the channel state is dropped,
/// then flushes what is left and shuts the workers down.
fn spawn_listener(bus: &Bus, set: SubscriberSet, token: CancellationToken) {
    let mut rx = bus.subscribe();

    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                msg = rx.recv() => match msg {
                    Ok(ev) => set.emit(&ev),
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                }
            }
        }

        while let Ok(ev) = rx.try_recv() {
            set.emit(&ev);
        }
        set.shutdown().await;
    });
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::mpsc;

    use super::*;
    use crate::events::{Event, EventKind};

    struct Recorder {
        tx: mpsc::UnboundedSender<Event>,
    }

    #[async_trait]
    impl Subscribe for Recorder {
        async fn on_event(&self, event: &Event) {
            let _ = self.tx.send(event.clone());
        }

        fn name(&self) -> &'static str {
            "recorder"
        }
    }

    #[test]
    fn test_build_without_subscribers_needs_no_runtime() {
        let emitter: Emitter<u8> = EmitterBuilder::new(EmitterConfig::default().with_name("quiet"))
            .with_subscribers(Vec::new())
            .build();
        assert_eq!(emitter.name(), Some("quiet"));
        assert!(emitter.emit(1, 0).is_ok());
    }

    #[tokio::test]
    async fn test_listener_flushes_events_and_shuts_down_on_drop() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let recorder: Arc<dyn Subscribe> = Arc::new(Recorder { tx });
        let emitter = Emitter::builder(EmitterConfig::default().with_name("jobs"))
            .with_subscriber(recorder)
            .build();

        let consumer = emitter.iterate();
        let _ack = emitter.emit(7u32, 2);
        assert!(emitter.complete().is_ok());
        assert!(matches!(consumer.advance().await, Ok(true)));
        assert!(matches!(consumer.advance().await, Ok(false)));

        // Dropped before the listener ever ran: events must still be flushed.
        drop(consumer);
        drop(emitter);

        let mut seen = Vec::new();
        let drained = tokio::time::timeout(Duration::from_secs(3), async {
            // Ends once the worker exits and drops the recorder.
            while let Some(ev) = rx.recv().await {
                seen.push(ev);
            }
        })
        .await;
        assert!(drained.is_ok());

        let kinds: Vec<EventKind> = seen.iter().map(|ev| ev.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::ValueBuffered,
                EventKind::Completed,
                EventKind::ValueConsumed
            ]
        );
        assert!(seen.iter().all(|ev| ev.channel.as_deref() == Some("jobs")));
        assert_eq!(seen[0].priority, Some(2));
        assert_eq!(seen[1].pending, Some(1));
    }
}
