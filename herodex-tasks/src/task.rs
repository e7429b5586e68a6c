/// Deferred task unit and state machine
///
/// A `DeferredTask` is an opaque unit of work (a boxed future) registered
/// during request handling and executed after the response has been sent.
/// Each task is executed at most once.
///
/// # State Machine
///
/// ```text
/// queued → running → completed
///                  → failed
/// ```
///
/// # Example
///
/// ```
/// use herodex_tasks::task::{DeferredTask, TaskState};
///
/// let task = DeferredTask::new("message-log", async { Ok(()) });
/// assert_eq!(task.state(), TaskState::Queued);
/// ```

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use thiserror::Error;
use uuid::Uuid;

use crate::sink::SinkError;

/// Error produced by a deferred task's job
///
/// These errors never reach the HTTP caller; the runner records them
/// out-of-band via tracing.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Writing to the log sink failed
    #[error("sink write failed: {0}")]
    Sink(#[from] SinkError),

    /// Task-specific failure
    #[error("task failed: {0}")]
    Failed(String),
}

/// The job type carried by a deferred task
pub type TaskFuture = BoxFuture<'static, Result<(), TaskError>>;

/// Deferred task execution state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Task is queued, waiting for the runner
    Queued,

    /// Task is currently being executed
    Running,

    /// Task completed successfully
    Completed,

    /// Task failed with an error
    Failed,
}

impl TaskState {
    /// Converts state to a string for log output
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Queued => "queued",
            TaskState::Running => "running",
            TaskState::Completed => "completed",
            TaskState::Failed => "failed",
        }
    }

    /// Checks if state is terminal (task has finished)
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Completed | TaskState::Failed)
    }

    /// Checks if transition to target state is valid
    pub fn can_transition_to(&self, target: TaskState) -> bool {
        match (self, target) {
            (TaskState::Queued, TaskState::Running) => true,
            (TaskState::Running, TaskState::Completed) => true,
            (TaskState::Running, TaskState::Failed) => true,

            // Terminal states cannot transition
            _ => false,
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of deferred work: a boxed job plus execution metadata
pub struct DeferredTask {
    /// Unique task ID
    id: Uuid,

    /// Human-readable label for log output
    label: String,

    /// Current execution state
    state: TaskState,

    /// The job to run; taken by the runner, so it can run at most once
    job: Option<TaskFuture>,

    /// When the task was registered
    queued_at: DateTime<Utc>,

    /// When the runner picked the task up
    started_at: Option<DateTime<Utc>>,

    /// When the task reached a terminal state
    finished_at: Option<DateTime<Utc>>,
}

impl DeferredTask {
    /// Creates a new task in the queued state
    ///
    /// # Arguments
    ///
    /// * `label` - Human-readable label used in log output
    /// * `job` - The work to execute after the response is sent
    pub fn new<F>(label: impl Into<String>, job: F) -> Self
    where
        F: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        DeferredTask {
            id: Uuid::new_v4(),
            label: label.into(),
            state: TaskState::Queued,
            job: Some(Box::pin(job)),
            queued_at: Utc::now(),
            started_at: None,
            finished_at: None,
        }
    }

    /// Unique task ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Human-readable label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current execution state
    pub fn state(&self) -> TaskState {
        self.state
    }

    /// When the task was registered
    pub fn queued_at(&self) -> DateTime<Utc> {
        self.queued_at
    }

    /// When the runner picked the task up, if it has started
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// When the task reached a terminal state, if it has finished
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Transitions the task to a new state, stamping timestamps
    ///
    /// Returns `false` (and leaves the task unchanged) if the transition is
    /// not allowed by the state machine.
    pub fn transition_to(&mut self, target: TaskState) -> bool {
        if !self.state.can_transition_to(target) {
            return false;
        }

        match target {
            TaskState::Running => self.started_at = Some(Utc::now()),
            TaskState::Completed | TaskState::Failed => self.finished_at = Some(Utc::now()),
            TaskState::Queued => {}
        }

        self.state = target;
        true
    }

    /// Takes the job out of the task for execution
    ///
    /// Returns `None` on any subsequent call, which is what guarantees the
    /// single execution attempt.
    pub fn take_job(&mut self) -> Option<TaskFuture> {
        self.job.take()
    }
}

impl fmt::Debug for DeferredTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredTask")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("state", &self.state)
            .field("queued_at", &self.queued_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_is_queued() {
        let task = DeferredTask::new("test", async { Ok(()) });
        assert_eq!(task.state(), TaskState::Queued);
        assert!(task.started_at().is_none());
        assert!(task.finished_at().is_none());
    }

    #[test]
    fn test_valid_transitions() {
        let mut task = DeferredTask::new("test", async { Ok(()) });

        assert!(task.transition_to(TaskState::Running));
        assert_eq!(task.state(), TaskState::Running);
        assert!(task.started_at().is_some());

        assert!(task.transition_to(TaskState::Completed));
        assert_eq!(task.state(), TaskState::Completed);
        assert!(task.finished_at().is_some());
    }

    #[test]
    fn test_invalid_transitions_are_rejected() {
        let mut task = DeferredTask::new("test", async { Ok(()) });

        // Cannot finish before starting
        assert!(!task.transition_to(TaskState::Completed));
        assert_eq!(task.state(), TaskState::Queued);

        task.transition_to(TaskState::Running);
        task.transition_to(TaskState::Failed);

        // Terminal states cannot transition
        assert!(!task.transition_to(TaskState::Running));
        assert!(!task.transition_to(TaskState::Completed));
        assert_eq!(task.state(), TaskState::Failed);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!TaskState::Queued.is_terminal());
        assert!(!TaskState::Running.is_terminal());
        assert!(TaskState::Completed.is_terminal());
        assert!(TaskState::Failed.is_terminal());
    }

    #[test]
    fn test_take_job_is_single_use() {
        let mut task = DeferredTask::new("test", async { Ok(()) });
        assert!(task.take_job().is_some());
        assert!(task.take_job().is_none());
    }
}
