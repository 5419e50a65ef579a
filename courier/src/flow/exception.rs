//! Routing of subscriber failures.
//!
//! Dispatch strategies require that nothing escapes a subscriber's `invoke`.
//! Bus subscribers satisfy that by catching handler errors and panics and
//! passing them, with some context, to a [`SubscriberExceptionHandler`].

use courier_core::{Event, SubscriberError};
use std::sync::Arc;

/// Where a subscriber failure happened.
#[derive(Debug, Clone)]
pub struct SubscriberExceptionContext {
    bus: Arc<str>,
    subscriber: Arc<str>,
    event: Event,
}

impl SubscriberExceptionContext {
    /// Create a context for a failure of `subscriber` while handling `event`
    /// on the bus named `bus`.
    pub fn new(bus: Arc<str>, subscriber: Arc<str>, event: Event) -> Self {
        Self {
            bus,
            subscriber,
            event,
        }
    }

    /// Identifier of the bus that delivered the event.
    pub fn bus_identifier(&self) -> &str {
        &self.bus
    }

    /// Name of the failing subscriber.
    pub fn subscriber_name(&self) -> &str {
        &self.subscriber
    }

    /// The event being handled.
    pub fn event(&self) -> &Event {
        &self.event
    }
}

/// Receives failures caught at a subscriber's boundary.
///
/// Any `Fn(SubscriberError, &SubscriberExceptionContext)` closure is a
/// handler. Handlers must not panic.
pub trait SubscriberExceptionHandler: Send + Sync + 'static {
    /// Handle one failure.
    fn handle_exception(&self, error: SubscriberError, context: &SubscriberExceptionContext);
}

impl<F> SubscriberExceptionHandler for F
where
    F: Fn(SubscriberError, &SubscriberExceptionContext) + Send + Sync + 'static,
{
    fn handle_exception(&self, error: SubscriberError, context: &SubscriberExceptionContext) {
        self(error, context)
    }
}

/// The default handler: logs the failure at `error` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingExceptionHandler;

impl SubscriberExceptionHandler for LoggingExceptionHandler {
    fn handle_exception(&self, error: SubscriberError, context: &SubscriberExceptionContext) {
        #[cfg(feature = "tracing")]
        {
            tracing::error!(
                bus = %context.bus_identifier(),
                subscriber = %context.subscriber_name(),
                event = context.event().type_name(),
                error = %error,
                "Subscriber failed"
            );
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = (error, context);
        }
    }
}
