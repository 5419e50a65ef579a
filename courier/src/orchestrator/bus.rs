//! The event bus.
//!
//! [`EventBus`] ties the pieces together: it resolves subscribers from its
//! [`SubscriberRegistry`] and hands each published event to its
//! [`DispatchStrategy`]. The strategy is fixed when the bus is built.
//!
//! | Constructor                    | Strategy           | Executor      |
//! |--------------------------------|--------------------|---------------|
//! | [`EventBus::new`]              | per-thread queue   | direct        |
//! | [`EventBus::asynchronous`]     | global queue       | caller's      |
//! | [`EventBus::builder`]          | configurable       | configurable  |

use crate::{
    core::dead_event::DeadEvent,
    flow::{
        exception::{LoggingExceptionHandler, SubscriberExceptionHandler},
        handler::HandlerSubscriber,
    },
    orchestrator::registry::{SubscriberRegistry, SubscriptionId},
};
use courier_core::{
    BoxError, DispatchError, DispatchStrategy, Event, Executor, Message, Subscriber,
};
use courier_std::{executor::DirectExecutor, strategy::DispatchMode};
use std::{fmt, sync::Arc};

/// An in-process publish/subscribe bus.
///
/// # Example
///
/// ```rust
/// use courier::{EventBus, Message};
///
/// #[derive(Debug)]
/// struct OrderPlaced { id: u64 }
/// impl Message for OrderPlaced {}
///
/// let bus = EventBus::new();
/// bus.subscribe(|order: &OrderPlaced| {
///     println!("order {} placed", order.id);
///     Ok(())
/// });
///
/// bus.post(OrderPlaced { id: 1 }).unwrap();
/// ```
pub struct EventBus {
    identifier: Arc<str>,
    registry: SubscriberRegistry,
    strategy: Arc<dyn DispatchStrategy>,
    executor: Arc<dyn Executor>,
    exceptions: Arc<dyn SubscriberExceptionHandler>,
}

impl EventBus {
    /// A bus named `"default"` with breadth-first per-thread delivery,
    /// handlers run on the publishing thread and failures logged.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Like [`EventBus::new`], with a custom identifier.
    pub fn named(identifier: impl Into<Arc<str>>) -> Self {
        Self::builder().identifier(identifier).build()
    }

    /// A bus delivering through one shared queue, running handlers on
    /// `executor`.
    pub fn asynchronous(identifier: impl Into<Arc<str>>, executor: impl Executor) -> Self {
        Self::builder()
            .identifier(identifier)
            .dispatch_mode(DispatchMode::GlobalQueue)
            .executor(executor)
            .build()
    }

    /// Start configuring a bus.
    pub fn builder() -> EventBusBuilder {
        EventBusBuilder::new()
    }

    /// The bus identifier, used in logs and dead events.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The subscriber registry.
    pub fn registry(&self) -> &SubscriberRegistry {
        &self.registry
    }

    /// Subscribe a typed handler to `M`.
    ///
    /// The handler runs through the bus executor; an `Err` or a panic is
    /// reported to the bus exception handler and does not affect other
    /// subscribers.
    pub fn subscribe<M, F>(&self, handler: F) -> SubscriptionId
    where
        M: Message,
        F: Fn(&M) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.subscribe_named(std::any::type_name::<F>(), handler)
    }

    /// Like [`subscribe`](Self::subscribe), with a name for diagnostics.
    pub fn subscribe_named<M, F>(&self, name: impl Into<Arc<str>>, handler: F) -> SubscriptionId
    where
        M: Message,
        F: Fn(&M) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        let subscriber = HandlerSubscriber::<M>::new(
            name,
            handler,
            Arc::clone(&self.executor),
            Arc::clone(&self.exceptions),
            Arc::clone(&self.identifier),
        );
        self.registry.register::<M>(Arc::new(subscriber))
    }

    /// Register a raw subscriber for `M`.
    ///
    /// The subscriber is invoked directly by the dispatch strategy, bypassing
    /// the bus executor and exception handler.
    pub fn register<M: Message>(&self, subscriber: impl Subscriber) -> SubscriptionId {
        self.registry.register::<M>(Arc::new(subscriber))
    }

    /// Remove a subscription. Returns `false` if it was not registered.
    pub fn unregister(&self, id: SubscriptionId) -> bool {
        self.registry.unregister(id)
    }

    /// Publish `message` to every subscriber registered for its type.
    pub fn post<M: Message>(&self, message: M) -> Result<(), DispatchError> {
        self.post_event(Event::new(message))
    }

    /// Publish an already wrapped event.
    ///
    /// If nothing is subscribed to the event's type, a [`DeadEvent`] is
    /// posted instead (unless the event already is one).
    pub fn post_event(&self, event: Event) -> Result<(), DispatchError> {
        let subscribers = self.registry.resolve(&event);

        if subscribers.is_empty() {
            if event.is::<DeadEvent>() {
                return Ok(());
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(bus = %self.identifier, event = event.type_name(), "No subscribers, posting dead event");

            return self.post(DeadEvent::new(Arc::clone(&self.identifier), event));
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            bus = %self.identifier,
            event = event.type_name(),
            subscribers = subscribers.len(),
            "Posting event"
        );

        self.strategy.dispatch(event, subscribers)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("identifier", &self.identifier)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// EventBusBuilder - for configuring buses
// ============================================================================

/// Builder for constructing an [`EventBus`].
///
/// # Example
/// ```ignore
/// let bus = EventBus::builder()
///     .identifier("orders")
///     .dispatch_mode(DispatchMode::Immediate)
///     .exception_handler(|error, context| eprintln!("{context:?}: {error}"))
///     .build();
/// ```
pub struct EventBusBuilder {
    identifier: Arc<str>,
    mode: DispatchMode,
    max_pending: Option<usize>,
    strategy: Option<Arc<dyn DispatchStrategy>>,
    executor: Arc<dyn Executor>,
    exceptions: Arc<dyn SubscriberExceptionHandler>,
}

impl EventBusBuilder {
    /// Defaults: identifier `"default"`, per-thread queue, direct executor,
    /// logging exception handler.
    pub fn new() -> Self {
        Self {
            identifier: Arc::from("default"),
            mode: DispatchMode::default(),
            max_pending: None,
            strategy: None,
            executor: Arc::new(DirectExecutor),
            exceptions: Arc::new(LoggingExceptionHandler),
        }
    }

    /// Set the bus identifier.
    pub fn identifier(mut self, identifier: impl Into<Arc<str>>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Pick one of the standard strategies.
    pub fn dispatch_mode(mut self, mode: DispatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Bound the queue of the selected standard strategy.
    ///
    /// Ignored when a custom strategy is supplied.
    pub fn max_pending(mut self, limit: usize) -> Self {
        self.max_pending = Some(limit);
        self
    }

    /// Use a custom strategy instead of a [`DispatchMode`].
    pub fn strategy(mut self, strategy: impl DispatchStrategy + 'static) -> Self {
        self.strategy = Some(Arc::new(strategy));
        self
    }

    /// Executor for handlers subscribed through [`EventBus::subscribe`].
    pub fn executor(mut self, executor: impl Executor) -> Self {
        self.executor = Arc::new(executor);
        self
    }

    /// Where handler failures are reported.
    pub fn exception_handler(mut self, handler: impl SubscriberExceptionHandler) -> Self {
        self.exceptions = Arc::new(handler);
        self
    }

    /// Build the bus.
    pub fn build(self) -> EventBus {
        let strategy = self
            .strategy
            .unwrap_or_else(|| self.mode.build(self.max_pending));

        EventBus {
            identifier: self.identifier,
            registry: SubscriberRegistry::new(),
            strategy,
            executor: self.executor,
            exceptions: self.exceptions,
        }
    }
}

impl Default for EventBusBuilder {
    fn default() -> Self {
        Self::new()
    }
}
