//! # courier-core
//!
//! Core traits for the Courier in-process event bus.
//!
//! This crate has minimal dependencies and is meant to be imported by code
//! that implements subscribers, executors or dispatch strategies without
//! pulling in the full `courier-std` implementations.
//!
//! # Moving parts
//!
//! ## [`Event`]
//!
//! A published payload plus the type metadata the registry uses to find
//! subscribers. Opaque to dispatch strategies.
//!
//! ## [`Subscriber`]
//!
//! The capability that receives an event: `invoke(&Event)`. Subscribers own
//! their failure handling; nothing escapes `invoke`.
//!
//! ## [`DispatchStrategy`]
//!
//! The policy that decides when and in what order the resolved subscribers
//! of a publish call are invoked. Standard strategies (immediate,
//! per-thread queue, global queue) live in `courier-std`.
//!
//! ## [`Executor`]
//!
//! Decides on which thread a subscriber's work runs. Orthogonal to the
//! strategy.
//!
//! # Error Types
//!
//! - [`DispatchError`] - Errors reported by strategies
//! - [`SubscriberError`] - Failures caught at a subscriber's boundary

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod event;
mod executor;
mod message;
mod strategy;
mod subscriber;

// Re-exports
pub use error::{BoxError, DispatchError, SubscriberError};
pub use event::Event;
pub use executor::{Executor, Task};
pub use message::Message;
pub use strategy::DispatchStrategy;
pub use subscriber::{Subscriber, SubscriberRef, Subscribers};
