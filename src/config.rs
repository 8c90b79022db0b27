//! # Emitter configuration.
//!
//! Provides [`EmitterConfig`] centralized settings for one emitter instance.
//!
//! Config is used in two ways:
//! 1. **Emitter creation**: `Emitter::builder(config).build()`
//! 2. **Emit defaults**: `Emitter::emit_default(value)` uses `default_priority`
//!
//! ## Sentinel values
//! - `name = None` → events carry no channel name
//! - `bus_capacity = 0` → clamped to 1 (only relevant when subscribers are attached)

/// Configuration of a single emitter.
///
/// ## Field semantics
/// - `name`: channel label attached to every published event
/// - `default_priority`: priority used by `emit_default`
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by Bus)
#[derive(Clone, Debug)]
pub struct EmitterConfig {
    /// Optional channel name, reported in events.
    pub name: Option<String>,

    /// Priority assigned by [`Emitter::emit_default`](crate::Emitter::emit_default).
    pub default_priority: i64,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Ignored when the emitter is built without subscribers (no bus is created).
    pub bus_capacity: usize,
}

impl EmitterConfig {
    /// Sets the channel name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the default priority.
    pub fn with_default_priority(mut self, priority: i64) -> Self {
        self.default_priority = priority;
        self
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for EmitterConfig {
    /// Default configuration:
    ///
    /// - `name = None`
    /// - `default_priority = 0`
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            name: None,
            default_priority: 0,
            bus_capacity: 1024,
        }
    }
}
