/// In-memory log sink for testing and demos
///
/// This sink collects appended lines in memory instead of touching the
/// filesystem. It's useful for:
/// - Testing notification flows without external dependencies
/// - Asserting on exact line content and ordering
/// - Simulating sink failures
///
/// # Example
///
/// ```
/// use herodex_tasks::sink::{LogSink, MemorySink};
///
/// # async fn example() -> Result<(), herodex_tasks::sink::SinkError> {
/// let sink = MemorySink::new();
/// sink.append("first\n").await?;
/// sink.append("second\n").await?;
/// assert_eq!(sink.lines(), ["first\n", "second\n"]);
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use std::io;
use std::sync::{Arc, Mutex};

use super::{LogSink, SinkError};

/// In-memory sink collecting lines in append order
///
/// Clones share the same line buffer, so a test can keep one handle and
/// hand another to the application under test.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,

    /// When true, every append fails with an I/O error
    fail_appends: bool,
}

impl MemorySink {
    /// Creates a new, empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink whose appends always fail
    ///
    /// Useful for exercising the runner's failure isolation.
    pub fn failing() -> Self {
        MemorySink {
            lines: Arc::new(Mutex::new(Vec::new())),
            fail_appends: true,
        }
    }

    /// Snapshot of all appended lines, in append order
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("sink lock poisoned").clone()
    }

    /// Number of appended lines
    pub fn len(&self) -> usize {
        self.lines.lock().expect("sink lock poisoned").len()
    }

    /// Returns true if nothing has been appended
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LogSink for MemorySink {
    async fn append(&self, line: &str) -> Result<(), SinkError> {
        if self.fail_appends {
            return Err(SinkError::Io(io::Error::new(
                io::ErrorKind::Other,
                "simulated sink failure",
            )));
        }

        self.lines
            .lock()
            .expect("sink lock poisoned")
            .push(line.to_string());
        Ok(())
    }
}
