//! Registry module for subscriber management.
//!
//! Subscribers are registered per message type and resolved, in
//! registration order, for each published event.

use courier_core::{Event, Message, SubscriberRef, Subscribers};
use dashmap::DashMap;
use std::{
    any::TypeId,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

/// Handle identifying one registration, used to unregister it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

struct Registration {
    id: SubscriptionId,
    subscriber: SubscriberRef,
}

/// A thread-safe registry of subscribers keyed by message type.
///
/// Registration order is delivery order. [`resolve`](Self::resolve) returns
/// a snapshot, so registrations made or removed while an event is being
/// delivered only affect later publish calls.
///
/// # Example
/// ```ignore
/// let registry = SubscriberRegistry::new();
/// let id = registry.register::<OrderPlaced>(Arc::new(audit));
///
/// let subscribers = registry.resolve(&Event::new(OrderPlaced { id: 1 }));
/// registry.unregister(id);
/// ```
pub struct SubscriberRegistry {
    by_type: DashMap<TypeId, Vec<Registration>>,
    next_id: AtomicU64,
}

impl SubscriberRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            by_type: DashMap::new(),
            next_id: AtomicU64::new(0),
        }
    }

    /// Register `subscriber` for events carrying an `M`.
    pub fn register<M: Message>(&self, subscriber: SubscriberRef) -> SubscriptionId {
        self.register_for(TypeId::of::<M>(), subscriber)
    }

    /// Register `subscriber` for events whose payload type is `message_type`.
    pub fn register_for(&self, message_type: TypeId, subscriber: SubscriberRef) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.by_type
            .entry(message_type)
            .or_default()
            .push(Registration { id, subscriber });
        id
    }

    /// Remove a registration. Returns `false` if it was not registered.
    pub fn unregister(&self, id: SubscriptionId) -> bool {
        let mut removed = false;
        self.by_type.retain(|_, registrations| {
            if !removed {
                let before = registrations.len();
                registrations.retain(|r| r.id != id);
                removed = registrations.len() != before;
            }
            !registrations.is_empty()
        });
        removed
    }

    /// The ordered subscribers for `event`'s payload type.
    ///
    /// Empty when nothing is registered for that type.
    pub fn resolve(&self, event: &Event) -> Subscribers {
        self.by_type
            .get(&event.message_type())
            .map(|registrations| {
                registrations
                    .iter()
                    .map(|r| Arc::clone(&r.subscriber))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of subscribers registered for `M`.
    pub fn subscriber_count<M: Message>(&self) -> usize {
        self.by_type
            .get(&TypeId::of::<M>())
            .map_or(0, |registrations| registrations.len())
    }

    /// Total number of registrations.
    pub fn len(&self) -> usize {
        self.by_type.iter().map(|entry| entry.value().len()).sum()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SubscriberRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberRegistry")
            .field("types", &self.by_type.len())
            .field("subscribers", &self.len())
            .finish()
    }
}
