//! Dispatch strategy core trait.

use crate::{error::DispatchError, event::Event, subscriber::Subscribers};

/// Policy deciding when, in what order and on which thread each resolved
/// subscriber is invoked for a published event.
///
/// # Contract
///
/// Every subscriber in `subscribers` has `invoke(&event)` called exactly
/// once by the time some `dispatch` call on this strategy returns control to
/// its original top-level caller. A nested call made from inside `invoke`
/// may return before its own subscribers ran if the strategy defers them to
/// a drain loop that is already running further up the same stack.
///
/// An empty `subscribers` sequence is a no-op. An `Err` is only returned
/// before any subscriber of this call has been enqueued or invoked.
///
/// Implementations differ only in ordering and concurrency behaviour, so a
/// bus can hold any of them behind `Arc<dyn DispatchStrategy>`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a dispatch strategy",
    label = "missing `DispatchStrategy` implementation",
    note = "Implement `DispatchStrategy` to control delivery order."
)]
pub trait DispatchStrategy: Send + Sync {
    /// Deliver `event` to every subscriber in `subscribers`.
    fn dispatch(&self, event: Event, subscribers: Subscribers) -> Result<(), DispatchError>;
}

impl<T: DispatchStrategy + ?Sized> DispatchStrategy for &T {
    fn dispatch(&self, event: Event, subscribers: Subscribers) -> Result<(), DispatchError> {
        (**self).dispatch(event, subscribers)
    }
}

impl<T: DispatchStrategy + ?Sized> DispatchStrategy for std::sync::Arc<T> {
    fn dispatch(&self, event: Event, subscribers: Subscribers) -> Result<(), DispatchError> {
        (**self).dispatch(event, subscribers)
    }
}
