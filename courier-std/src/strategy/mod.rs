//! Dispatch strategies.
//!
//! Three interchangeable implementations of [`DispatchStrategy`] that differ
//! only in when, in what order and on which thread subscribers are invoked:
//!
//! | Strategy                      | Nested publish      | Ordering                     |
//! |-------------------------------|---------------------|------------------------------|
//! | [`ImmediateStrategy`]         | runs immediately    | depth-first, calling thread  |
//! | [`PerThreadQueueStrategy`]    | queued on thread    | breadth-first, per thread    |
//! | [`GlobalQueueStrategy`]       | queued globally     | none beyond exactly-once     |
//!
//! A bus picks one at construction time, either through the constructor
//! functions below or through [`DispatchMode`].

mod global;
mod immediate;
mod per_thread;

pub use global::GlobalQueueStrategy;
pub use immediate::{IMMEDIATE, ImmediateStrategy};
pub use per_thread::PerThreadQueueStrategy;

use courier_core::DispatchStrategy;
use std::sync::Arc;

/// The stateless depth-first strategy.
pub fn immediate() -> ImmediateStrategy {
    IMMEDIATE
}

/// A new breadth-first strategy with per-thread queues.
pub fn per_thread_queue() -> PerThreadQueueStrategy {
    PerThreadQueueStrategy::new()
}

/// A new weakly ordered strategy with one shared queue.
pub fn global_queue() -> GlobalQueueStrategy {
    GlobalQueueStrategy::new()
}

/// Selects one of the standard strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// [`ImmediateStrategy`].
    Immediate,
    /// [`PerThreadQueueStrategy`].
    #[default]
    PerThreadQueue,
    /// [`GlobalQueueStrategy`].
    GlobalQueue,
}

impl DispatchMode {
    /// Build the selected strategy.
    ///
    /// `max_pending` bounds the queue of the queued strategies and is
    /// ignored by [`DispatchMode::Immediate`], which has no queue.
    pub fn build(self, max_pending: Option<usize>) -> Arc<dyn DispatchStrategy> {
        match self {
            DispatchMode::Immediate => Arc::new(immediate()),
            DispatchMode::PerThreadQueue => {
                let strategy = per_thread_queue();
                match max_pending {
                    Some(limit) => Arc::new(strategy.with_max_pending(limit)),
                    None => Arc::new(strategy),
                }
            }
            DispatchMode::GlobalQueue => {
                let strategy = global_queue();
                match max_pending {
                    Some(limit) => Arc::new(strategy.with_max_pending(limit)),
                    None => Arc::new(strategy),
                }
            }
        }
    }
}
