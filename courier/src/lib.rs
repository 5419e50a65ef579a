//! # courier - In-Process Event Bus
//!
//! `courier` delivers events published on one thread to subscribers
//! registered for the event's type. How nested publishes are ordered is
//! decided by a pluggable [`DispatchStrategy`]:
//!
//! - **Per-thread queue** (default): breadth-first. An event published from
//!   inside a subscriber is queued and delivered after every subscriber of
//!   the current event, all on the publishing thread.
//! - **Immediate**: depth-first. A nested publish is delivered before the
//!   outer publish moves to its next subscriber.
//! - **Global queue**: one queue shared by all threads, delivering each
//!   event to each subscriber exactly once with no ordering guarantee.
//!
//! ## Quick Start
//!
//! ```rust
//! use courier::{EventBus, Message};
//!
//! #[derive(Debug)]
//! struct UserSignedUp { name: String }
//! impl Message for UserSignedUp {}
//!
//! let bus = EventBus::new();
//! bus.subscribe(|event: &UserSignedUp| {
//!     println!("welcome, {}", event.name);
//!     Ok(())
//! });
//!
//! bus.post(UserSignedUp { name: "ada".into() }).unwrap();
//! ```
//!
//! ## Failures
//!
//! Handler errors and panics never reach the publisher. They are passed to
//! the bus's [`SubscriberExceptionHandler`], which logs them by default.
//! Events nobody subscribed to are re-posted as [`DeadEvent`].

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod core;
mod flow;
mod orchestrator;

pub use courier_core::{
    // Error types
    BoxError,
    DispatchError,
    // Core traits
    DispatchStrategy,
    Event,
    Executor,
    Message,
    Subscriber,
    SubscriberError,
    SubscriberRef,
    Subscribers,
    Task,
};

pub use crate::{
    core::dead_event::DeadEvent,
    flow::{
        exception::{LoggingExceptionHandler, SubscriberExceptionContext, SubscriberExceptionHandler},
        handler::HandlerSubscriber,
    },
    orchestrator::{EventBus, EventBusBuilder, SubscriberRegistry, SubscriptionId},
};

/// Dispatch strategies.
pub mod strategy {
    pub use courier_std::strategy::{
        DispatchMode, GlobalQueueStrategy, IMMEDIATE, ImmediateStrategy, PerThreadQueueStrategy,
        global_queue, immediate, per_thread_queue,
    };
}

/// Executors deciding where subscriber work runs.
pub mod executor {
    #[cfg(feature = "tokio")]
    pub use courier_std::executor::TokioExecutor;
    pub use courier_std::executor::{DirectExecutor, ThreadPoolExecutor};
}

/// Standard subscriber implementations.
pub mod subscribers {
    pub use courier_std::subscribers::LoggingSubscriber;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use courier_std::testing::*;
}

/// Prelude module - common imports for Courier.
///
/// # Usage
///
/// ```rust
/// use courier::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, DeadEvent, DispatchError, Event, EventBus, Message, Subscriber,
        SubscriberError, SubscriberExceptionContext, SubscriptionId, strategy::DispatchMode,
    };
}
