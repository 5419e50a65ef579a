use courier_core::{DispatchError, DispatchStrategy, Event, SubscriberRef, Subscribers};
use crossbeam_channel::{Receiver, Sender};
use std::fmt;

/// One delivery obligation: a single subscriber still owed an event.
struct QueuedDelivery {
    event: Event,
    subscriber: SubscriberRef,
}

/// Weakly ordered delivery through one queue shared by all threads.
///
/// Each dispatch splits the event into one entry per subscriber, pushes them
/// (in subscriber order) onto a lock-free multi-producer/multi-consumer
/// queue, then drains that queue on the calling thread until it is observed
/// empty. A thread may therefore deliver entries enqueued by other threads.
///
/// Every entry is delivered exactly once. Nothing else is promised about
/// order: once several threads dispatch concurrently, an event published
/// earlier may reach its subscribers after one published later, even when
/// both were published from the same thread.
pub struct GlobalQueueStrategy {
    sender: Sender<QueuedDelivery>,
    receiver: Receiver<QueuedDelivery>,
    max_pending: Option<usize>,
}

impl GlobalQueueStrategy {
    /// Create a strategy with an unbounded queue.
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self {
            sender,
            receiver,
            max_pending: None,
        }
    }

    /// Bound the number of queued entries.
    ///
    /// The bound is soft: it is checked against a snapshot of the queue
    /// length, so concurrent dispatches may briefly overshoot it. A rejected
    /// call enqueues nothing.
    pub fn with_max_pending(mut self, limit: usize) -> Self {
        self.max_pending = Some(limit);
        self
    }

    /// The configured bound, if any.
    pub fn max_pending(&self) -> Option<usize> {
        self.max_pending
    }

    /// Number of entries currently queued.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    fn check_capacity(&self, incoming: usize) -> Result<(), DispatchError> {
        let Some(limit) = self.max_pending else {
            return Ok(());
        };
        let pending = self.receiver.len() + incoming;
        if pending > limit {
            #[cfg(feature = "tracing")]
            tracing::warn!(pending, limit, "global dispatch queue is full");
            return Err(DispatchError::QueueFull { pending, limit });
        }
        Ok(())
    }
}

impl Default for GlobalQueueStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GlobalQueueStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalQueueStrategy")
            .field("pending", &self.pending())
            .field("max_pending", &self.max_pending)
            .finish()
    }
}

impl DispatchStrategy for GlobalQueueStrategy {
    fn dispatch(&self, event: Event, subscribers: Subscribers) -> Result<(), DispatchError> {
        if subscribers.is_empty() {
            return Ok(());
        }
        self.check_capacity(subscribers.len())?;

        for subscriber in subscribers {
            // `self` owns the receiver, so the channel is never disconnected.
            let _ = self.sender.send(QueuedDelivery {
                event: event.clone(),
                subscriber,
            });
        }

        while let Ok(QueuedDelivery { event, subscriber }) = self.receiver.try_recv() {
            subscriber.invoke(&event);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CallLog, CountingSubscriber, RecordingSubscriber, describe};
    use std::{
        collections::HashSet,
        sync::{Arc, Barrier, Mutex},
        thread,
    };

    #[test]
    fn test_single_thread_keeps_enqueue_order() {
        let strategy = GlobalQueueStrategy::new();
        let log = CallLog::new();
        let subscribers = vec![
            RecordingSubscriber::shared("X", &log),
            RecordingSubscriber::shared("Y", &log),
        ];

        strategy.dispatch(Event::new("A"), subscribers).unwrap();

        assert_eq!(log.entries(), ["X(A)", "Y(A)"]);
        assert_eq!(strategy.pending(), 0);
    }

    #[test]
    fn test_nested_dispatch_is_queued_behind_pending_entries() {
        let strategy = Arc::new(GlobalQueueStrategy::new());
        let log = CallLog::new();

        let z = RecordingSubscriber::shared("Z", &log);
        let x_log = log.clone();
        let inner = Arc::clone(&strategy);
        let x: SubscriberRef = Arc::new(move |event: &Event| {
            x_log.record("X", event);
            inner.dispatch(Event::new("B"), vec![z.clone()]).unwrap();
        });
        let y = RecordingSubscriber::shared("Y", &log);

        strategy.dispatch(Event::new("A"), vec![x, y]).unwrap();

        // The nested call drains the shared queue itself, so `Y(A)`, which
        // was queued first, is delivered before `Z(B)`.
        assert_eq!(log.entries(), ["X(A)", "Y(A)", "Z(B)"]);
    }

    #[test]
    fn test_other_thread_delivers_pending_entries() {
        // `blocker` holds `pubA` inside its own drain while `pubB` publishes.
        let started = Arc::new(Barrier::new(2));
        let release = Arc::new(Barrier::new(2));
        let deliveries = Arc::new(Mutex::new(Vec::new()));

        let record = {
            let deliveries = Arc::clone(&deliveries);
            move |event: &Event| {
                let thread = thread::current().name().map(str::to_string);
                deliveries.lock().unwrap().push((describe(event), thread));
            }
        };
        let recorder: SubscriberRef = Arc::new(record.clone());
        let blocker: SubscriberRef = {
            let (started, release) = (Arc::clone(&started), Arc::clone(&release));
            Arc::new(move |event: &Event| {
                record(event);
                started.wait();
                release.wait();
            })
        };

        let strategy = GlobalQueueStrategy::new();
        thread::scope(|scope| {
            let a = thread::Builder::new()
                .name("pubA".into())
                .spawn_scoped(scope, || {
                    strategy
                        .dispatch(Event::new("A1"), vec![blocker, recorder.clone()])
                        .unwrap();
                })
                .unwrap();
            let b = thread::Builder::new()
                .name("pubB".into())
                .spawn_scoped(scope, || {
                    started.wait();
                    strategy.dispatch(Event::new("B"), vec![recorder.clone()]).unwrap();
                    release.wait();
                })
                .unwrap();
            a.join().unwrap();
            b.join().unwrap();
        });

        let deliveries = deliveries.lock().unwrap();
        let by = |label: &str| {
            deliveries
                .iter()
                .filter(|(seen, _)| seen == label)
                .map(|(_, thread)| thread.as_deref())
                .collect::<Vec<_>>()
        };
        // The second entry of `A1` was published by `pubA` but delivered by
        // `pubB`, ahead of `pubB`'s own event.
        assert_eq!(by("A1"), [Some("pubA"), Some("pubB")]);
        assert_eq!(by("B"), [Some("pubB")]);
        assert_eq!(
            deliveries.iter().skip(1).map(|(seen, _)| seen.as_str()).collect::<Vec<_>>(),
            ["A1", "B"]
        );
        assert_eq!(strategy.pending(), 0);
    }

    #[test]
    fn test_exactly_once_under_concurrency() {
        const THREADS: usize = 100;
        const EVENTS: usize = 100;
        const SUBSCRIBERS: usize = 10;

        let strategy = GlobalQueueStrategy::new();
        let counter = CountingSubscriber::new();
        let subscribers: Subscribers = (0..SUBSCRIBERS).map(|_| counter.subscriber()).collect();

        thread::scope(|scope| {
            for _ in 0..THREADS {
                scope.spawn(|| {
                    for _ in 0..EVENTS {
                        strategy
                            .dispatch(Event::new(()), subscribers.clone())
                            .unwrap();
                    }
                });
            }
        });

        assert_eq!(counter.count(), THREADS * EVENTS * SUBSCRIBERS);
        assert_eq!(strategy.pending(), 0);
    }

    #[test]
    fn test_each_delivery_observed_once() {
        const THREADS: usize = 8;
        const EVENTS: usize = 250;

        let strategy = GlobalQueueStrategy::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let subscriber: SubscriberRef = Arc::new(move |event: &Event| {
            if let Some(id) = event.downcast_ref::<usize>() {
                sink.lock().unwrap().push(*id);
            }
        });

        thread::scope(|scope| {
            for t in 0..THREADS {
                let strategy = &strategy;
                let subscriber = subscriber.clone();
                scope.spawn(move || {
                    for e in 0..EVENTS {
                        strategy
                            .dispatch(Event::new(t * EVENTS + e), vec![subscriber.clone()])
                            .unwrap();
                    }
                });
            }
        });

        let seen = seen.lock().unwrap();
        let unique: HashSet<usize> = seen.iter().copied().collect();
        assert_eq!(seen.len(), THREADS * EVENTS);
        assert_eq!(unique.len(), THREADS * EVENTS);
    }

    #[test]
    fn test_queue_bound_rejects_whole_event() {
        let strategy = GlobalQueueStrategy::new().with_max_pending(2);
        let counter = CountingSubscriber::new();
        let subscribers: Subscribers = (0..3).map(|_| counter.subscriber()).collect();

        let result = strategy.dispatch(Event::new("A"), subscribers);

        assert_eq!(
            result,
            Err(DispatchError::QueueFull {
                pending: 3,
                limit: 2
            })
        );
        assert_eq!(counter.count(), 0);
        assert_eq!(strategy.pending(), 0);
    }
}
