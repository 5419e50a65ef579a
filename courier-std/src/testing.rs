//! Testing utilities for Courier.
//!
//! This module provides utilities to make testing dispatch order and
//! delivery counts easier.
//!
//! # Features
//!
//! - [`CallLog`]: A shared, ordered log of invocations
//! - [`RecordingSubscriber`]: A subscriber that appends `label(payload)` to a [`CallLog`]
//! - [`CountingSubscriber`]: A subscriber that counts invocations

use courier_core::{Event, Subscriber, SubscriberRef};
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

/// Render a payload for a log line: string payloads verbatim, anything else
/// by type name.
pub fn describe(event: &Event) -> String {
    if let Some(text) = event.downcast_ref::<&'static str>() {
        (*text).to_string()
    } else if let Some(text) = event.downcast_ref::<String>() {
        text.clone()
    } else {
        event.type_name().to_string()
    }
}

// ============================================================================
// Call Log
// ============================================================================

/// An ordered log of subscriber invocations, shared between clones.
///
/// # Example
///
/// ```rust
/// use courier_core::Event;
/// use courier_std::testing::CallLog;
///
/// let log = CallLog::new();
/// log.record("X", &Event::new("A"));
/// assert_eq!(log.entries(), ["X(A)"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `label(payload)`.
    pub fn record(&self, label: &str, event: &Event) {
        self.push(format!("{label}({})", describe(event)));
    }

    /// Append a raw line.
    pub fn push(&self, line: impl Into<String>) {
        self.lock().push(line.into());
    }

    /// A copy of the recorded lines, in order.
    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Number of recorded lines.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        // A panicking subscriber in a test must not hide what was recorded.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// Recording Subscriber
// ============================================================================

/// A subscriber that records each invocation into a [`CallLog`].
pub struct RecordingSubscriber {
    label: String,
    log: CallLog,
}

impl RecordingSubscriber {
    /// Create a recording subscriber writing to `log`.
    pub fn new(label: impl Into<String>, log: &CallLog) -> Self {
        Self {
            label: label.into(),
            log: log.clone(),
        }
    }

    /// Create a recording subscriber already wrapped as a [`SubscriberRef`].
    pub fn shared(label: impl Into<String>, log: &CallLog) -> SubscriberRef {
        Arc::new(Self::new(label, log))
    }
}

impl Subscriber for RecordingSubscriber {
    fn invoke(&self, event: &Event) {
        self.log.record(&self.label, event);
    }

    fn name(&self) -> &str {
        &self.label
    }
}

// ============================================================================
// Counting Subscriber
// ============================================================================

/// A subscriber that counts invocations. Clones share the counter.
#[derive(Debug, Clone, Default)]
pub struct CountingSubscriber {
    count: Arc<AtomicUsize>,
}

impl CountingSubscriber {
    /// Create a new counting subscriber.
    pub fn new() -> Self {
        Self::default()
    }

    /// A [`SubscriberRef`] sharing this counter.
    pub fn subscriber(&self) -> SubscriberRef {
        Arc::new(self.clone())
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Subscriber for CountingSubscriber {
    fn invoke(&self, _event: &Event) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_payloads() {
        assert_eq!(describe(&Event::new("A")), "A");
        assert_eq!(describe(&Event::new(String::from("B"))), "B");
        assert_eq!(describe(&Event::new(3_u8)), "u8");
    }

    #[test]
    fn test_counting_subscriber_shares_counter() {
        let counter = CountingSubscriber::new();
        let shared = counter.subscriber();

        shared.invoke(&Event::new(()));
        shared.invoke(&Event::new(()));
        assert_eq!(counter.count(), 2);

        counter.reset();
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_recording_subscriber_uses_label() {
        let log = CallLog::new();
        let subscriber = RecordingSubscriber::shared("X", &log);

        subscriber.invoke(&Event::new("A"));

        assert_eq!(subscriber.name(), "X");
        assert_eq!(log.entries(), ["X(A)"]);
        log.clear();
        assert!(log.is_empty());
    }
}
