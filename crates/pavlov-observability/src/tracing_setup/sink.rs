use pavlov_core::models::Event;
use pavlov_core::traits::IEventSink;

use super::events;

/// Event sink that forwards every event to the structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl IEventSink for TracingSink {
    fn log_event(&mut self, event: Event) {
        events::emit(&event);
    }
}
