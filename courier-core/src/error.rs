//! Error types for Courier.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`DispatchError`] - Errors a dispatch strategy reports to the publisher
//! - [`SubscriberError`] - Failures caught at a subscriber's boundary

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors a dispatch strategy can report.
///
/// These are always raised before any subscriber of the rejected call has
/// been enqueued or invoked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Accepting the call would push the strategy's queue past its
    /// configured bound.
    #[error("dispatch queue is full ({pending} pending, limit {limit})")]
    QueueFull {
        /// Entries pending (including those of the rejected call).
        pending: usize,
        /// The configured bound.
        limit: usize,
    },
}

/// Failures caught at a subscriber's boundary.
///
/// These never propagate through a dispatch strategy; the subscriber that
/// caught them routes them to an exception handler instead.
#[derive(Error, Debug)]
pub enum SubscriberError {
    /// The handler returned an error.
    #[error("subscriber failed: {0}")]
    Failed(#[source] BoxError),

    /// The handler panicked.
    #[error("subscriber panicked: {0}")]
    Panic(String),

    /// The event payload was not of the type the subscriber handles.
    #[error("subscriber expected `{expected}` but received `{actual}`")]
    TypeMismatch {
        /// Type the subscriber was registered for.
        expected: &'static str,
        /// Type of the delivered payload.
        actual: &'static str,
    },

    /// The executor refused the subscriber's task.
    #[error("executor rejected task: {0}")]
    Rejected(String),
}

// Convenience conversions
impl From<BoxError> for SubscriberError {
    fn from(err: BoxError) -> Self {
        SubscriberError::Failed(err)
    }
}
