//! # Herodex Deferred Tasks
//!
//! This crate provides the deferred-task machinery used by the Herodex API
//! server: work registered while a request is being handled and executed
//! after the response has been sent, without blocking the client.
//!
//! ## Modules
//!
//! - `task`: The `DeferredTask` unit of work and its state machine
//! - `queue`: `BackgroundTasks`, the per-request FIFO queue handle
//! - `runner`: Drains a queue on a separate execution context
//! - `sink`: The shared append-only log sink (file-backed and in-memory)
//!
//! ## Example
//!
//! ```no_run
//! use herodex_tasks::queue::BackgroundTasks;
//! use herodex_tasks::runner::spawn_drain;
//! use herodex_tasks::sink::{LogSink, MemorySink};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let sink = Arc::new(MemorySink::new());
//! let tasks = BackgroundTasks::new();
//!
//! let task_sink = sink.clone();
//! tasks.add_task("greeting-log", async move {
//!     task_sink.append("hello\n").await?;
//!     Ok(())
//! });
//!
//! // After the response is finalized the queue is handed off:
//! spawn_drain(tasks);
//! # }
//! ```

pub mod queue;
pub mod runner;
pub mod sink;
pub mod task;

pub use queue::BackgroundTasks;
pub use runner::{spawn_drain, DrainReport};
pub use sink::{FileSink, LogSink, MemorySink, SinkError};
pub use task::{DeferredTask, TaskError, TaskState};
