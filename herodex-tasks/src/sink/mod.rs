/// Log sink contract and implementations
///
/// This module defines the contract for the append-only log sink that
/// deferred tasks write notification lines to, plus the two implementations:
///
/// - `FileSink`: append-only text file behind a single writer task
/// - `MemorySink`: in-memory sink for tests and demos
///
/// # Sink Contract
///
/// All sinks must:
/// 1. Append whole lines atomically with respect to other appenders
/// 2. Surface I/O failures to the calling task (which reports them
///    out-of-band; they never reach an HTTP response)
/// 3. Be shareable across tasks from concurrent requests
///
/// # Example
///
/// ```no_run
/// use herodex_tasks::sink::{FileSink, LogSink};
///
/// # async fn example() -> Result<(), herodex_tasks::sink::SinkError> {
/// let sink = FileSink::open("log.txt").await?;
/// sink.append("notification for spidey@example.com: hi\n").await?;
/// sink.close().await;
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::FileSink;
pub use memory::MemorySink;

/// Log sink error types
#[derive(Debug, Error)]
pub enum SinkError {
    /// Underlying I/O failure
    #[error("log sink I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sink has been closed and accepts no further writes
    #[error("log sink is closed")]
    Closed,
}

/// Append-only line sink shared by all deferred tasks
///
/// Implementations must serialize concurrent appends so lines from
/// different tasks never interleave.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Appends one line to the sink
    ///
    /// The line is expected to be newline-terminated by the caller; the sink
    /// writes it verbatim.
    async fn append(&self, line: &str) -> Result<(), SinkError>;
}
