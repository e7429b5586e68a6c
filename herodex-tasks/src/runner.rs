/// Deferred task runner
///
/// This module executes the tasks a request queued, strictly after the
/// response has been handed off. The drain runs on a spawned tokio task, so
/// the client never observes added latency, and a task failure can never
/// reach the already-completed HTTP response: failures are recorded via
/// `tracing::error!` and the drain moves on to the next task.
///
/// # Ordering
///
/// Tasks from one queue run sequentially in registration order. Queues from
/// different requests drain on independent spawned tasks with no relative
/// ordering guarantee.
///
/// # Example
///
/// ```no_run
/// use herodex_tasks::queue::BackgroundTasks;
/// use herodex_tasks::runner::spawn_drain;
///
/// # async fn example() {
/// let tasks = BackgroundTasks::new();
/// tasks.add_task("message-log", async { Ok(()) });
///
/// let handle = spawn_drain(tasks);
/// let report = handle.await.unwrap();
/// assert_eq!(report.completed, 1);
/// # }
/// ```

use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::queue::BackgroundTasks;
use crate::task::TaskState;

/// Summary of one queue drain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Tasks that completed successfully
    pub completed: usize,

    /// Tasks that failed (errors were logged, never propagated)
    pub failed: usize,
}

impl DrainReport {
    /// Total tasks executed in this drain
    pub fn total(&self) -> usize {
        self.completed + self.failed
    }
}

/// Hands a request's queue to a spawned worker task
///
/// Returns the join handle so callers that care (tests, shutdown paths) can
/// await the report; the request path simply drops it.
pub fn spawn_drain(tasks: BackgroundTasks) -> JoinHandle<DrainReport> {
    tokio::spawn(drain(tasks))
}

/// Executes all queued tasks sequentially in FIFO order
///
/// Each task transitions `Queued → Running → Completed | Failed`. A failure
/// is logged and counted, and never aborts the remaining tasks.
pub async fn drain(tasks: BackgroundTasks) -> DrainReport {
    let queue = tasks.take_all();
    let mut report = DrainReport::default();

    for mut task in queue {
        task.transition_to(TaskState::Running);

        let result = match task.take_job() {
            Some(job) => job.await,
            // Job already taken; nothing left to attempt
            None => Ok(()),
        };

        match result {
            Ok(()) => {
                task.transition_to(TaskState::Completed);
                report.completed += 1;
                debug!(
                    task_id = %task.id(),
                    label = task.label(),
                    "Deferred task completed"
                );
            }
            Err(e) => {
                task.transition_to(TaskState::Failed);
                report.failed += 1;
                error!(
                    task_id = %task.id(),
                    label = task.label(),
                    error = %e,
                    "Deferred task failed"
                );
            }
        }
    }

    report
}
