use crate::models::Event;

/// Receiver for learner events (`log_event(kind, fields)`).
///
/// Purely observational: the learners write to it and never read it back.
pub trait IEventSink {
    fn log_event(&mut self, event: Event);
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl IEventSink for NullSink {
    fn log_event(&mut self, _event: Event) {}
}

impl IEventSink for Vec<Event> {
    fn log_event(&mut self, event: Event) {
        self.push(event);
    }
}
