use courier_core::{DispatchError, DispatchStrategy, Event, SubscriberRef, Subscribers};
use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    fmt,
    sync::atomic::{AtomicU64, Ordering},
    vec,
};

static NEXT_STRATEGY_ID: AtomicU64 = AtomicU64::new(0);

thread_local! {
    // Keyed by strategy id so two strategy instances used on one thread
    // never share a queue or a draining flag.
    static THREAD_QUEUES: RefCell<HashMap<u64, ThreadQueue>> = RefCell::new(HashMap::new());
}

/// One publish call still awaiting full delivery on this thread.
struct QueuedEvent {
    event: Event,
    subscribers: vec::IntoIter<SubscriberRef>,
}

#[derive(Default)]
struct ThreadQueue {
    entries: VecDeque<QueuedEvent>,
    draining: bool,
}

/// Breadth-first delivery, ordered per calling thread.
///
/// Every thread gets its own private queue and draining flag. The outermost
/// `dispatch` on a thread drains that queue; a `dispatch` made from inside a
/// subscriber on the same thread only appends to it and returns, so its
/// subscribers run after all subscribers of the events queued before it.
///
/// Given subscribers `[X, Y]` for event `A` and `Z` for event `B`, where `X`
/// publishes `B`, the delivery order is `X(A), Y(A), Z(B)`.
///
/// Events published on different threads are not ordered relative to each
/// other. The thread's state is released when its outermost drain finishes,
/// including when a subscriber panics.
pub struct PerThreadQueueStrategy {
    id: u64,
    max_pending: Option<usize>,
}

impl PerThreadQueueStrategy {
    /// Create a strategy with no bound on queued entries.
    pub fn new() -> Self {
        Self {
            id: NEXT_STRATEGY_ID.fetch_add(1, Ordering::Relaxed),
            max_pending: None,
        }
    }

    /// Bound the number of queued entries per thread.
    ///
    /// A nested `dispatch` that would exceed `limit` fails with
    /// [`DispatchError::QueueFull`] and enqueues nothing.
    pub fn with_max_pending(mut self, limit: usize) -> Self {
        self.max_pending = Some(limit);
        self
    }

    /// The configured bound, if any.
    pub fn max_pending(&self) -> Option<usize> {
        self.max_pending
    }

    /// Number of entries queued for the calling thread.
    pub fn pending(&self) -> usize {
        self.with_state(|queue| queue.map_or(0, |q| q.entries.len()))
    }

    /// Whether the calling thread is currently inside this strategy's drain
    /// loop.
    pub fn is_draining(&self) -> bool {
        self.with_state(|queue| queue.is_some_and(|q| q.draining))
    }

    /// Whether any state is currently allocated for the calling thread.
    pub fn has_thread_state(&self) -> bool {
        self.with_state(|queue| queue.is_some())
    }

    fn with_state<R>(&self, f: impl FnOnce(Option<&ThreadQueue>) -> R) -> R {
        THREAD_QUEUES.with(|queues| f(queues.borrow().get(&self.id)))
    }

    /// Append an entry and report whether the caller must start draining.
    fn enqueue(&self, event: Event, subscribers: Subscribers) -> Result<bool, DispatchError> {
        THREAD_QUEUES.with(|queues| {
            let mut queues = queues.borrow_mut();

            if let Some(limit) = self.max_pending {
                let pending = queues.get(&self.id).map_or(0, |q| q.entries.len()) + 1;
                if pending > limit {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(pending, limit, "per-thread dispatch queue is full");
                    return Err(DispatchError::QueueFull { pending, limit });
                }
            }

            let queue = queues.entry(self.id).or_default();
            queue.entries.push_back(QueuedEvent {
                event,
                subscribers: subscribers.into_iter(),
            });

            if queue.draining {
                Ok(false)
            } else {
                queue.draining = true;
                Ok(true)
            }
        })
    }

    fn pop_front(&self) -> Option<QueuedEvent> {
        THREAD_QUEUES.with(|queues| {
            queues
                .borrow_mut()
                .get_mut(&self.id)
                .and_then(|q| q.entries.pop_front())
        })
    }

    fn drain(&self) {
        let _release = ReleaseOnDrop { id: self.id };

        #[cfg(feature = "tracing")]
        tracing::trace!(strategy = self.id, "draining per-thread dispatch queue");

        // The thread-local borrow is released before each invoke, so a
        // subscriber can re-enter `dispatch` and append to the queue.
        while let Some(QueuedEvent { event, subscribers }) = self.pop_front() {
            for subscriber in subscribers {
                subscriber.invoke(&event);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(strategy = self.id, "per-thread dispatch queue drained");
    }
}

impl Default for PerThreadQueueStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PerThreadQueueStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PerThreadQueueStrategy")
            .field("id", &self.id)
            .field("max_pending", &self.max_pending)
            .finish()
    }
}

impl DispatchStrategy for PerThreadQueueStrategy {
    fn dispatch(&self, event: Event, subscribers: Subscribers) -> Result<(), DispatchError> {
        if subscribers.is_empty() {
            return Ok(());
        }
        if self.enqueue(event, subscribers)? {
            self.drain();
        }
        Ok(())
    }
}

/// Removes the thread's state for one strategy, on every exit path of a
/// drain (including unwinding).
struct ReleaseOnDrop {
    id: u64,
}

impl Drop for ReleaseOnDrop {
    fn drop(&mut self) {
        // `try_with` because this may run while the thread is shutting down.
        let _ = THREAD_QUEUES.try_with(|queues| {
            match queues.try_borrow_mut() {
                Ok(mut queues) => {
                    queues.remove(&self.id);
                }
                Err(_) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        strategy = self.id,
                        "per-thread dispatch queue still borrowed, leaving its state in place"
                    );
                }
            }
        });
    }
}
