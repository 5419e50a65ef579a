//! Executor core trait.

use crate::error::SubscriberError;

/// A unit of subscriber work handed to an [`Executor`].
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Decides on which thread a subscriber's work actually runs.
///
/// Executors are orthogonal to dispatch strategies: the strategy controls
/// the order in which subscribers are invoked, the executor controls how
/// each invocation is carried out once it happens.
pub trait Executor: Send + Sync + 'static {
    /// Run or schedule `task`.
    ///
    /// Returns [`SubscriberError::Rejected`] if the task could not be
    /// accepted; the task is dropped in that case.
    fn execute(&self, task: Task) -> Result<(), SubscriberError>;
}

impl<T: Executor + ?Sized> Executor for std::sync::Arc<T> {
    fn execute(&self, task: Task) -> Result<(), SubscriberError> {
        (**self).execute(task)
    }
}
