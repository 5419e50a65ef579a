use courier_core::{DispatchError, DispatchStrategy, Event, Subscribers};

/// The shared immediate strategy.
///
/// The strategy holds no state, so this one instance can serve every bus and
/// every thread.
pub static IMMEDIATE: ImmediateStrategy = ImmediateStrategy;

/// Depth-first, synchronous delivery.
///
/// Invokes each subscriber in order on the calling thread. If a subscriber
/// publishes another event while being invoked, that nested dispatch runs to
/// completion before the next subscriber of the outer event is invoked.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateStrategy;

impl DispatchStrategy for ImmediateStrategy {
    fn dispatch(&self, event: Event, subscribers: Subscribers) -> Result<(), DispatchError> {
        for subscriber in &subscribers {
            subscriber.invoke(&event);
        }
        Ok(())
    }
}
