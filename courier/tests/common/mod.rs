#![allow(dead_code)]

use courier::{
    EventBus, Message, SubscriberError, SubscriberExceptionContext, strategy::DispatchMode,
    testing::CallLog,
};
use std::sync::{Arc, Mutex};

// ============================================================================
// Test Event Types
// ============================================================================

/// The outer event. Its payload is a tag carried into the log.
#[derive(Clone, Copy, Debug)]
pub struct Ping(pub &'static str);
impl Message for Ping {}

/// Published from inside the `X` subscriber of [`Ping`].
#[derive(Clone, Copy, Debug)]
pub struct Pong(pub &'static str);
impl Message for Pong {}

#[derive(Clone, Copy, Debug)]
pub struct Tick(pub u64);
impl Message for Tick {}

// ============================================================================
// Test Buses
// ============================================================================

/// A bus where `X` and `Y` subscribe to [`Ping`], `X` publishes a [`Pong`]
/// with the same tag, and `Z` subscribes to [`Pong`].
///
/// Every invocation is logged as `name(tag)`.
pub fn reentrant_bus(mode: DispatchMode, log: &CallLog) -> Arc<EventBus> {
    let bus = Arc::new(EventBus::builder().dispatch_mode(mode).build());
    let weak = Arc::downgrade(&bus);

    let x = log.clone();
    bus.subscribe_named("X", move |ping: &Ping| {
        x.push(format!("X({})", ping.0));
        if let Some(bus) = weak.upgrade() {
            bus.post(Pong(ping.0))?;
        }
        Ok(())
    });

    let y = log.clone();
    bus.subscribe_named("Y", move |ping: &Ping| {
        y.push(format!("Y({})", ping.0));
        Ok(())
    });

    let z = log.clone();
    bus.subscribe_named("Z", move |pong: &Pong| {
        z.push(format!("Z({})", pong.0));
        Ok(())
    });

    bus
}

// ============================================================================
// Exception Collection
// ============================================================================

/// One reported failure: bus, subscriber, message.
pub type Failure = (String, String, String);

/// Collects everything passed to an exception handler.
#[derive(Clone, Default)]
pub struct Failures {
    seen: Arc<Mutex<Vec<Failure>>>,
}

impl Failures {
    pub fn handler(&self) -> impl Fn(SubscriberError, &SubscriberExceptionContext) + use<> {
        let seen = Arc::clone(&self.seen);
        move |error: SubscriberError, context: &SubscriberExceptionContext| {
            seen.lock().unwrap().push((
                context.bus_identifier().to_string(),
                context.subscriber_name().to_string(),
                error.to_string(),
            ));
        }
    }

    pub fn all(&self) -> Vec<Failure> {
        self.seen.lock().unwrap().clone()
    }
}
