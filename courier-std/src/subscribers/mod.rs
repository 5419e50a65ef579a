//! Standard subscriber implementations.

mod logging;

pub use logging::LoggingSubscriber;
