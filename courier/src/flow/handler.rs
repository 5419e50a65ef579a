//! Typed handlers wrapped as subscribers.

use crate::flow::exception::{SubscriberExceptionContext, SubscriberExceptionHandler};
use courier_core::{BoxError, Event, Executor, Message, Subscriber, SubscriberError};
use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

type HandlerFn<M> = dyn Fn(&M) -> Result<(), BoxError> + Send + Sync;

/// A subscriber that runs a typed handler through an executor.
///
/// This is the boundary between fallible user code and the dispatch core:
///
/// - `invoke` hands the call to the executor and returns; whether the
///   handler runs inline or on another thread is the executor's business.
/// - The payload is downcast to `M`; a mismatch is reported as
///   [`SubscriberError::TypeMismatch`].
/// - Handler errors and panics are caught and passed to the exception
///   handler, as is an executor refusing the task.
///
/// Nothing ever escapes `invoke`.
pub struct HandlerSubscriber<M: Message> {
    name: Arc<str>,
    handler: Arc<HandlerFn<M>>,
    executor: Arc<dyn Executor>,
    exceptions: Arc<dyn SubscriberExceptionHandler>,
    bus: Arc<str>,
}

impl<M: Message> HandlerSubscriber<M> {
    /// Wrap `handler` for delivery on the bus named `bus`.
    pub fn new<F>(
        name: impl Into<Arc<str>>,
        handler: F,
        executor: Arc<dyn Executor>,
        exceptions: Arc<dyn SubscriberExceptionHandler>,
        bus: Arc<str>,
    ) -> Self
    where
        F: Fn(&M) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            handler: Arc::new(handler),
            executor,
            exceptions,
            bus,
        }
    }

    fn context(&self, event: &Event) -> SubscriberExceptionContext {
        SubscriberExceptionContext::new(
            Arc::clone(&self.bus),
            Arc::clone(&self.name),
            event.clone(),
        )
    }
}

impl<M: Message> Subscriber for HandlerSubscriber<M> {
    fn invoke(&self, event: &Event) {
        let handler = Arc::clone(&self.handler);
        let exceptions = Arc::clone(&self.exceptions);
        let context = self.context(event);

        let task = Box::new(move || {
            if let Err(error) = run_handler(&*handler, context.event()) {
                exceptions.handle_exception(error, &context);
            }
        });

        if let Err(error) = self.executor.execute(task) {
            self.exceptions.handle_exception(error, &self.context(event));
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn run_handler<M: Message>(handler: &HandlerFn<M>, event: &Event) -> Result<(), SubscriberError> {
    let Some(message) = event.downcast_ref::<M>() else {
        return Err(SubscriberError::TypeMismatch {
            expected: std::any::type_name::<M>(),
            actual: event.type_name(),
        });
    };

    match panic::catch_unwind(AssertUnwindSafe(|| handler(message))) {
        Ok(result) => result.map_err(SubscriberError::Failed),
        Err(payload) => Err(SubscriberError::Panic(panic_message(&*payload))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
