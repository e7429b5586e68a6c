/// Per-request deferred task queue
///
/// This module provides `BackgroundTasks`, the queue handle that request
/// handlers append deferred work onto. One queue is created per inbound
/// request; after the response has been written, the surrounding request
/// layer hands the queue to the runner.
///
/// # Ordering
///
/// The queue is strictly FIFO: tasks registered earlier in a request run
/// before tasks registered later. Queues belonging to different requests are
/// independent and carry no ordering guarantee relative to each other.
///
/// # Example
///
/// ```
/// use herodex_tasks::queue::BackgroundTasks;
///
/// let tasks = BackgroundTasks::new();
/// tasks.add_task("first", async { Ok(()) });
/// tasks.add_task("second", async { Ok(()) });
/// assert_eq!(tasks.len(), 2);
/// ```

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::task::{DeferredTask, TaskError};

/// Cloneable handle to a per-request FIFO queue of deferred tasks
///
/// Clones share the same underlying queue, so the handle can be injected
/// into request extensions and extracted by any handler in the chain.
#[derive(Clone, Default)]
pub struct BackgroundTasks {
    inner: Arc<Mutex<VecDeque<DeferredTask>>>,
}

impl BackgroundTasks {
    /// Creates a new, empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a unit of work to run after the response is sent
    ///
    /// Tasks run in registration order. The returned id identifies the task
    /// in log output.
    ///
    /// # Arguments
    ///
    /// * `label` - Human-readable label used in log output
    /// * `job` - The work to execute
    pub fn add_task<F>(&self, label: impl Into<String>, job: F) -> Uuid
    where
        F: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        let task = DeferredTask::new(label, job);
        let id = task.id();

        let mut queue = self.inner.lock().expect("task queue lock poisoned");
        queue.push_back(task);

        id
    }

    /// Number of queued tasks
    pub fn len(&self) -> usize {
        self.inner.lock().expect("task queue lock poisoned").len()
    }

    /// Returns true if no tasks are queued
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drains the queue, returning all tasks in registration order
    ///
    /// Tasks registered after this call end up in a fresh queue and are not
    /// picked up by an already-started drain.
    pub fn take_all(&self) -> Vec<DeferredTask> {
        let mut queue = self.inner.lock().expect("task queue lock poisoned");
        queue.drain(..).collect()
    }
}

impl std::fmt::Debug for BackgroundTasks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundTasks")
            .field("len", &self.len())
            .finish()
    }
}
