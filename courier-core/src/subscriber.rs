//! # Subscriber
//!
//! The capability a dispatch strategy delivers events to.
//!
//! A subscriber is deliberately minimal: it receives an [`Event`] and returns
//! nothing. Whether the call runs inline or is handed to an executor, and how
//! failures are reported, is decided by whoever built the subscriber, never
//! by the dispatch strategy.
//!
//! # Contract
//!
//! `invoke` must not let failures escape. A subscriber that can fail is
//! expected to catch the failure itself and route it somewhere (the bus
//! wraps typed handlers so that errors and panics reach its exception
//! handler). Strategies rely on this so that one failing subscriber never
//! prevents delivery to the next.

use crate::event::Event;
use std::sync::Arc;

/// A receiver of published events.
///
/// Any `Fn(&Event) + Send + Sync + 'static` closure is a subscriber.
///
/// # Example
///
/// ```rust
/// use courier_core::{Event, Subscriber};
///
/// struct Printer;
///
/// impl Subscriber for Printer {
///     fn invoke(&self, event: &Event) {
///         println!("received {}", event.type_name());
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Subscriber`",
    label = "missing `Subscriber` implementation",
    note = "Subscribers must implement `invoke(&self, &Event)`."
)]
pub trait Subscriber: Send + Sync + 'static {
    /// Deliver one event to this subscriber.
    fn invoke(&self, event: &Event);

    /// A human readable name, used in diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> Subscriber for F
where
    F: Fn(&Event) + Send + Sync + 'static,
{
    fn invoke(&self, event: &Event) {
        self(event)
    }
}

/// A shared handle to a subscriber.
pub type SubscriberRef = Arc<dyn Subscriber>;

/// The ordered sequence of subscribers resolved for one publish call.
pub type Subscribers = Vec<SubscriberRef>;
