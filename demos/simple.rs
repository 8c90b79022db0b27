//! # Example: simple
//!
//! Two normal messages and one urgent message on a named channel.
//! The urgent one is consumed first even though it was emitted last.
//!
//! ## Flow
//! ```text
//! emit("message one", 0)       ──► buffered
//! emit("message two", 0)       ──► buffered
//! emit("important message", 5) ──► buffered
//! complete()
//! consumer: important message, message one, message two, end
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example simple --features logging
//! ```

use std::sync::Arc;

use priority_emitter::{Emitter, EmitterConfig, EmitterError, LogWriter, Subscribe};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), EmitterError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let logger: Arc<dyn Subscribe> = Arc::new(LogWriter::new());
    let emitter = Emitter::builder(EmitterConfig::default().with_name("messages"))
        .with_subscriber(logger)
        .build();

    let _one = emitter.emit("message one", 0)?;
    let _two = emitter.emit("message two", 0)?;
    let _important = emitter.emit("important message", 5)?;
    emitter.complete()?;

    let consumer = emitter.iterate();
    while consumer.advance().await? {
        println!("{}", consumer.current()?);
    }

    // Let the log subscriber catch up before exiting.
    tokio::task::yield_now().await;
    Ok(())
}
