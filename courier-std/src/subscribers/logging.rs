//! Logging Subscriber - Observability for published events.

use courier_core::{Event, Subscriber};

/// A subscriber that logs every event it receives.
///
/// It logs at `debug` level through `tracing` when the `tracing` feature is
/// enabled, and does nothing otherwise. Registering one for
/// `DeadEvent` is a cheap way to notice events nobody listens to.
///
/// # Example
///
/// ```rust,ignore
/// use courier::{DeadEvent, EventBus};
/// use courier_std::subscribers::LoggingSubscriber;
///
/// let bus = EventBus::new();
/// bus.register::<DeadEvent>(LoggingSubscriber::named("dead_events"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoggingSubscriber {
    name: &'static str,
}

impl LoggingSubscriber {
    /// Create a new `LoggingSubscriber` with a default name.
    pub fn new() -> Self {
        Self { name: "event" }
    }

    /// Create a new `LoggingSubscriber` with a custom name.
    ///
    /// The name is used in log messages to identify the subscription.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for LoggingSubscriber {
    fn default() -> Self {
        Self::new()
    }
}

impl Subscriber for LoggingSubscriber {
    fn invoke(&self, event: &Event) {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(name = %self.name, event = ?event, "Received event");
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = event;
        }
    }

    fn name(&self) -> &str {
        self.name
    }
}
