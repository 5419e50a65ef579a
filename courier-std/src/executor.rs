//! Standard executors.
//!
//! - [`DirectExecutor`]: runs the task inline on the calling thread
//! - [`ThreadPoolExecutor`]: hands the task to a `futures` thread pool
//! - [`TokioExecutor`]: runs the task on a tokio blocking thread (feature `tokio`)

use courier_core::{Executor, SubscriberError, Task};
use futures::executor::ThreadPool;
use std::{fmt, io};

/// Runs every task immediately on the thread that calls `execute`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectExecutor;

impl Executor for DirectExecutor {
    fn execute(&self, task: Task) -> Result<(), SubscriberError> {
        task();
        Ok(())
    }
}

/// Runs tasks on a `futures` thread pool.
#[derive(Clone)]
pub struct ThreadPoolExecutor {
    pool: ThreadPool,
}

impl ThreadPoolExecutor {
    /// Create a pool with one thread per CPU.
    pub fn new() -> io::Result<Self> {
        ThreadPool::builder()
            .name_prefix("courier-")
            .create()
            .map(Self::from_pool)
    }

    /// Create a pool with `threads` worker threads.
    pub fn with_threads(threads: usize) -> io::Result<Self> {
        ThreadPool::builder()
            .pool_size(threads.max(1))
            .name_prefix("courier-")
            .create()
            .map(Self::from_pool)
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: ThreadPool) -> Self {
        Self { pool }
    }
}

impl fmt::Debug for ThreadPoolExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadPoolExecutor").finish_non_exhaustive()
    }
}

impl Executor for ThreadPoolExecutor {
    fn execute(&self, task: Task) -> Result<(), SubscriberError> {
        self.pool.spawn_ok(async move { task() });
        Ok(())
    }
}

/// Runs tasks on the blocking thread pool of a tokio runtime.
#[cfg(feature = "tokio")]
#[derive(Debug, Clone)]
pub struct TokioExecutor {
    handle: tokio::runtime::Handle,
}

#[cfg(feature = "tokio")]
impl TokioExecutor {
    /// Use the given runtime.
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    /// Use the runtime the caller is running on.
    pub fn current() -> Result<Self, SubscriberError> {
        tokio::runtime::Handle::try_current()
            .map(Self::new)
            .map_err(|err| SubscriberError::Rejected(err.to_string()))
    }
}

#[cfg(feature = "tokio")]
impl Executor for TokioExecutor {
    fn execute(&self, task: Task) -> Result<(), SubscriberError> {
        drop(self.handle.spawn_blocking(task));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        sync::{Arc, mpsc},
        thread,
        time::Duration,
    };

    #[test]
    fn test_direct_executor_runs_inline() {
        let caller = thread::current().id();
        let (tx, rx) = mpsc::channel();

        DirectExecutor
            .execute(Box::new(move || tx.send(thread::current().id()).unwrap()))
            .unwrap();

        assert_eq!(rx.try_recv().unwrap(), caller);
    }

    #[test]
    fn test_thread_pool_executor_runs_elsewhere() {
        let executor = ThreadPoolExecutor::with_threads(2).unwrap();
        let caller = thread::current().id();
        let (tx, rx) = mpsc::channel();

        for _ in 0..4 {
            let tx = tx.clone();
            executor
                .execute(Box::new(move || tx.send(thread::current().id()).unwrap()))
                .unwrap();
        }

        for _ in 0..4 {
            let worker = rx.recv_timeout(Duration::from_secs(5)).unwrap();
            assert_ne!(worker, caller);
        }
    }

    #[test]
    fn test_executor_through_arc() {
        let executor: Arc<dyn Executor> = Arc::new(DirectExecutor);
        let (tx, rx) = mpsc::channel();

        executor
            .execute(Box::new(move || tx.send(1).unwrap()))
            .unwrap();

        assert_eq!(rx.try_recv(), Ok(1));
    }

    #[cfg(feature = "tokio")]
    #[tokio::test(flavor = "multi_thread")]
    async fn test_tokio_executor_runs_task() {
        let executor = TokioExecutor::current().unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel();

        executor
            .execute(Box::new(move || {
                let _ = tx.send(42);
            }))
            .unwrap();

        assert_eq!(rx.await.unwrap(), 42);
    }

    #[cfg(feature = "tokio")]
    #[test]
    fn test_tokio_executor_requires_runtime() {
        assert!(matches!(
            TokioExecutor::current(),
            Err(SubscriberError::Rejected(_))
        ));
    }
}
