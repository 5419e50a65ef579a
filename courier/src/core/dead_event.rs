use courier_core::{Event, Message};
use std::sync::Arc;

/// Posted in place of an event that had no subscribers.
///
/// Subscribe to `DeadEvent` to detect events that are published but never
/// delivered, usually a sign of a missing registration. A `DeadEvent`
/// without subscribers is dropped silently.
#[derive(Debug, Clone)]
pub struct DeadEvent {
    source: Arc<str>,
    event: Event,
}

impl DeadEvent {
    /// Create a dead event for `event`, published on the bus named `source`.
    pub fn new(source: impl Into<Arc<str>>, event: Event) -> Self {
        Self {
            source: source.into(),
            event,
        }
    }

    /// Identifier of the bus the event was published on.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The undelivered event.
    pub fn event(&self) -> &Event {
        &self.event
    }
}

impl Message for DeadEvent {}
