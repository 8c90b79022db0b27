use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use priority_emitter::{Consumer, Emitter, EmitterError, FailureReason};
use tokio::time::Instant;

async fn drain<T: Clone>(consumer: &Consumer<T>) -> Result<Vec<T>, EmitterError> {
    let mut items = Vec::new();
    while consumer.advance().await? {
        items.push(consumer.current()?);
    }
    Ok(items)
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct AppError(&'static str);

#[tokio::test]
async fn order_for_same_priority_items() {
    let emitter = Emitter::new();
    for i in 1..=5 {
        let _ack = emitter.emit(i, 0).expect("emit");
    }
    emitter.complete().expect("complete");

    let items = drain(&emitter.iterate()).await.expect("drain");
    assert_eq!(items, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn order_for_different_priority_items() {
    let emitter = Emitter::new();
    let producer = emitter.clone();

    // Producer runs first and fills the buffer before anyone consumes.
    let task = tokio::spawn(async move {
        for (value, priority) in [(1, 1), (2, 1), (3, 2), (4, 3), (5, 3)] {
            let _ack = producer.emit(value, priority).expect("emit");
        }
        producer.complete().expect("complete");
    });
    task.await.expect("producer task");

    let items = drain(&emitter.iterate()).await.expect("drain");
    assert_eq!(items, vec![4, 5, 3, 1, 2]);
}

#[tokio::test(start_paused = true)]
async fn consumer_waits_for_values_to_be_emitted() {
    let delay = Duration::from_millis(350);
    let emitter = Emitter::new();
    let producer = emitter.clone();
    let start = Instant::now();

    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let ack = producer.emit(1, 0).expect("emit");
        assert!(ack.is_handed_off());
        producer.complete().expect("complete");
    });

    let consumer = emitter.iterate();
    let mut seen = 0;
    while consumer.advance().await.expect("advance") {
        assert_eq!(consumer.current().expect("current"), 1);
        seen += 1;
    }
    assert_eq!(seen, 1);
    assert!(start.elapsed() >= delay);
}

#[tokio::test(start_paused = true)]
async fn back_pressure_holds_producer_until_consumed() {
    let delay = Duration::from_millis(350);
    let emitter = Emitter::new();
    let consumer = emitter.iterate();

    let reader = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let mut n = 0;
        while consumer.advance().await.expect("advance") {
            let _ = consumer.current().expect("current");
            n += 1;
        }
        n
    });

    let start = Instant::now();
    emitter.emit(1, 0).expect("emit").await.expect("first ack");
    emitter.emit(1, 0).expect("emit").await.expect("second ack");
    emitter.complete().expect("complete");

    // Producer waited while the first value was consumed.
    assert!(start.elapsed() >= delay);
    assert_eq!(reader.await.expect("reader"), 2);
}

#[tokio::test]
async fn ack_resolves_only_for_the_consumed_value() {
    let emitter = Emitter::new();
    let consumer = emitter.iterate();

    let mut low = emitter.emit("low", 0).expect("emit");
    let mut high = emitter.emit("high", 5).expect("emit");
    assert!((&mut low).now_or_never().is_none());
    assert!((&mut high).now_or_never().is_none());

    assert!(consumer.advance().await.expect("advance"));
    assert_eq!(consumer.current().expect("current"), "high");
    assert!(matches!((&mut high).now_or_never(), Some(Ok(()))));
    assert!((&mut low).now_or_never().is_none());

    assert!(consumer.advance().await.expect("advance"));
    assert_eq!(consumer.current().expect("current"), "low");
    assert!(matches!(low.now_or_never(), Some(Ok(()))));
}

#[tokio::test]
async fn second_producer_released_after_first_is_drained() {
    let emitter = Emitter::new();
    let consumer = emitter.iterate();

    let mut first = emitter.emit('a', 0).expect("emit");
    let mut second = emitter.clone().emit('b', 0).expect("emit");

    assert!(consumer.advance().await.expect("advance"));
    assert!(matches!((&mut first).now_or_never(), Some(Ok(()))));
    assert!((&mut second).now_or_never().is_none());

    assert!(consumer.advance().await.expect("advance"));
    assert!(matches!(second.now_or_never(), Some(Ok(()))));
}

#[test]
fn double_advance_is_rejected() {
    let emitter: Emitter<u32> = Emitter::new();
    let consumer = emitter.iterate();

    let first = consumer.advance();
    assert!(!first.is_ready());

    let second = consumer.advance();
    assert!(second.is_ready());
    assert!(matches!(
        second.now_or_never(),
        Some(Err(EmitterError::ReentrantAdvance))
    ));

    // The first advance is still live and gets the next value.
    let _ack = emitter.emit(9, 0).expect("emit");
    assert!(matches!(first.now_or_never(), Some(Ok(true))));
    assert_eq!(consumer.current().ok(), Some(9));
}

#[test]
fn current_before_advance() {
    let emitter: Emitter<u32> = Emitter::new();
    let err = emitter.iterate().current().expect_err("no value yet");
    assert!(matches!(err, EmitterError::PrematureGetCurrent));
    assert_eq!(
        err.to_string(),
        "advance() must resolve before reading the current value"
    );
}

#[test]
fn current_fails_on_completed_channel() {
    let emitter: Emitter<u32> = Emitter::new();
    emitter.complete().expect("complete");
    assert!(matches!(
        emitter.iterate().current(),
        Err(EmitterError::EndedWithNoItems)
    ));
}

#[test]
fn double_complete_is_rejected() {
    let emitter: Emitter<u32> = Emitter::new();
    emitter.complete().expect("first complete");
    assert!(matches!(
        emitter.complete(),
        Err(EmitterError::AlreadyTerminal)
    ));
}

#[tokio::test]
async fn advance_fails_with_producer_error_when_waiting() {
    let emitter: Emitter<u32> = Emitter::new();
    let producer = emitter.clone();

    let advance = emitter.iterate().advance();
    tokio::spawn(async move {
        producer.fail(AppError("foo")).expect("fail");
    });

    let err = advance.await.expect_err("producer failure");
    let reason = err.reason().expect("reason");
    assert_eq!(reason.to_string(), "foo");
    assert!(reason.downcast_ref::<AppError>().is_some());
}

#[tokio::test]
async fn failure_delivered_after_buffer_is_drained() {
    let emitter = Emitter::new();
    let reason: FailureReason = Arc::new(AppError("disk gone"));

    let _a = emitter.emit(1, 0).expect("emit");
    let _b = emitter.emit(2, 3).expect("emit");
    emitter.fail_with(reason.clone()).expect("fail");
    assert!(matches!(emitter.emit(3, 0), Err(EmitterError::ChannelClosed)));

    let consumer = emitter.iterate();
    assert!(consumer.advance().await.expect("advance"));
    assert_eq!(consumer.current().ok(), Some(2));
    assert!(consumer.advance().await.expect("advance"));
    assert_eq!(consumer.current().ok(), Some(1));

    for _ in 0..2 {
        let err = consumer.advance().await.expect_err("failure");
        assert!(err.reason().is_some_and(|r| Arc::ptr_eq(r, &reason)));
    }
    // The last consumed value stays readable.
    assert_eq!(consumer.current().ok(), Some(1));
}

#[tokio::test]
async fn complete_wakes_waiting_consumer() {
    let emitter: Emitter<u32> = Emitter::new();
    let mut advance = emitter.iterate().advance();
    assert!((&mut advance).now_or_never().is_none());

    emitter.complete().expect("complete");
    assert!(matches!(advance.await, Ok(false)));
}

#[tokio::test]
async fn dropped_channel_closes_pending_acks() {
    let emitter = Emitter::new();
    let ack = emitter.emit(1u8, 0).expect("emit");
    drop(emitter);
    assert!(matches!(ack.await, Err(EmitterError::ChannelClosed)));
}

/// A value whose `Drop` reads the emitter it came from.
#[derive(Clone)]
struct Job {
    id: u32,
    channel: Emitter<Job>,
}

impl Drop for Job {
    fn drop(&mut self) {
        let _ = self.channel.len();
    }
}

#[test]
fn replaced_value_may_use_the_emitter_in_drop() {
    let (done_tx, done_rx) = std::sync::mpsc::channel();

    std::thread::spawn(move || {
        let emitter = Emitter::new();
        let consumer = emitter.iterate();
        for id in 0..2 {
            let _ack = emitter
                .emit(Job { id, channel: emitter.clone() }, 0)
                .expect("emit");
        }

        assert!(matches!(consumer.advance().now_or_never(), Some(Ok(true))));
        assert_eq!(consumer.current().map(|job| job.id).ok(), Some(0));
        // Drops job 0 as the current value.
        assert!(matches!(consumer.advance().now_or_never(), Some(Ok(true))));
        assert_eq!(consumer.current().map(|job| job.id).ok(), Some(1));

        // Handoff to a waiting consumer drops job 1.
        let waiting = consumer.advance();
        let ack = emitter
            .emit(Job { id: 2, channel: emitter.clone() }, 0)
            .expect("emit");
        assert!(ack.is_handed_off());
        assert!(matches!(waiting.now_or_never(), Some(Ok(true))));
        assert_eq!(consumer.current().map(|job| job.id).ok(), Some(2));

        let _ = done_tx.send(());
    });

    assert!(
        done_rx.recv_timeout(Duration::from_secs(3)).is_ok(),
        "advance or emit blocked while dropping the replaced value"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn many_producers_on_threads_keep_per_priority_fifo() {
    let emitter = Emitter::new();
    let consumer = emitter.iterate();

    let mut producers = Vec::new();
    for producer_id in 0..4u32 {
        let tx = emitter.clone();
        producers.push(tokio::spawn(async move {
            for n in 0..50u32 {
                let priority = i64::from(n % 3);
                tx.emit((producer_id, n, priority), priority)
                    .expect("emit")
                    .await
                    .expect("ack");
            }
        }));
    }

    let closer = emitter.clone();
    tokio::spawn(async move {
        for p in producers {
            p.await.expect("producer");
        }
        closer.complete().expect("complete");
    });

    let items = drain(&consumer).await.expect("drain");
    assert_eq!(items.len(), 200);

    // Each producer's values arrive in its own emission order within a priority.
    for producer_id in 0..4 {
        for priority in 0..3 {
            let ns: Vec<u32> = items
                .iter()
                .filter(|(id, _, p)| *id == producer_id && *p == priority)
                .map(|(_, n, _)| *n)
                .collect();
            assert!(ns.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
