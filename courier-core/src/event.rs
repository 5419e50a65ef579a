//! The published event record.

use crate::message::Message;
use std::{
    any::{Any, TypeId},
    fmt,
    sync::Arc,
};

/// A published payload together with the metadata identifying its type.
///
/// The payload is type-erased and shared: cloning an `Event` is a reference
/// count bump, and every subscriber of one publish call observes the same
/// value. Events are immutable once created.
///
/// The dispatch strategies never look inside the payload. Only the registry
/// (to pick subscribers by type) and the subscribers themselves (to
/// downcast) do.
#[derive(Clone)]
pub struct Event {
    payload: Arc<dyn Any + Send + Sync>,
    message_type: TypeId,
    type_name: &'static str,
}

impl Event {
    /// Wrap a message into an event.
    pub fn new<M: Message>(message: M) -> Self {
        Self::from_arc(Arc::new(message))
    }

    /// Wrap an already shared message without copying it.
    pub fn from_arc<M: Message>(message: Arc<M>) -> Self {
        Self {
            payload: message,
            message_type: TypeId::of::<M>(),
            type_name: std::any::type_name::<M>(),
        }
    }

    /// The `TypeId` of the wrapped message.
    pub fn message_type(&self) -> TypeId {
        self.message_type
    }

    /// The type name of the wrapped message, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns `true` if the payload is an `M`.
    pub fn is<M: Message>(&self) -> bool {
        self.message_type == TypeId::of::<M>()
    }

    /// Borrow the payload as an `M`, if that is its type.
    pub fn downcast_ref<M: Message>(&self) -> Option<&M> {
        self.payload.downcast_ref::<M>()
    }

    /// Returns `true` if both events share the same payload allocation.
    pub fn ptr_eq(&self, other: &Event) -> bool {
        Arc::ptr_eq(&self.payload, &other.payload)
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("type", &self.type_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Ping(u32);
    impl Message for Ping {}

    #[test]
    fn test_event_downcast() {
        let event = Event::new(Ping(7));

        assert!(event.is::<Ping>());
        assert!(!event.is::<String>());
        assert_eq!(event.downcast_ref::<Ping>(), Some(&Ping(7)));
        assert_eq!(event.downcast_ref::<String>(), None);
        assert!(event.type_name().ends_with("Ping"));
    }

    #[test]
    fn test_event_clone_shares_payload() {
        let event = Event::new(String::from("hello"));
        let copy = event.clone();

        assert!(event.ptr_eq(&copy));
        assert!(!event.ptr_eq(&Event::new(String::from("hello"))));
    }

    #[test]
    fn test_event_from_arc_keeps_allocation() {
        let shared = Arc::new(Ping(1));
        let event = Event::from_arc(shared.clone());

        let inner = event.downcast_ref::<Ping>().unwrap();
        assert!(std::ptr::eq(inner, &*shared));
        assert_eq!(event.message_type(), TypeId::of::<Ping>());
    }
}
