//! # courier-std
//!
//! Standard implementations for the Courier event bus.
//!
//! This crate provides:
//! - **Dispatch strategies**: [`ImmediateStrategy`], [`PerThreadQueueStrategy`],
//!   [`GlobalQueueStrategy`], selectable through [`DispatchMode`]
//! - **Executors**: [`DirectExecutor`], [`ThreadPoolExecutor`] and, with the
//!   `tokio` feature, `TokioExecutor`
//! - **Standard subscribers**: Logging
//! - **Testing utilities**: call logs, recording and counting subscribers
//!
//! [`ImmediateStrategy`]: strategy::ImmediateStrategy
//! [`PerThreadQueueStrategy`]: strategy::PerThreadQueueStrategy
//! [`GlobalQueueStrategy`]: strategy::GlobalQueueStrategy
//! [`DispatchMode`]: strategy::DispatchMode
//! [`DirectExecutor`]: executor::DirectExecutor
//! [`ThreadPoolExecutor`]: executor::ThreadPoolExecutor

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use courier_core;

// Modules
pub mod executor;
pub mod strategy;
pub mod subscribers;
pub mod testing;
