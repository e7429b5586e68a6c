/// File-backed log sink with single-writer discipline
///
/// This sink appends lines to a text file. All appends, from however many
/// concurrent drains, flow through a single-consumer queue into one writer
/// task that owns the file handle. That single-writer discipline is what
/// keeps concurrent lines from interleaving: the writer handles one whole
/// line (write + flush) before picking up the next.
///
/// # Error Reporting
///
/// Each append waits for an acknowledgment from the writer, so an I/O
/// failure surfaces to the task that attempted the write. The writer also
/// logs failures, since the requesting task may already be gone.
///
/// # Shutdown
///
/// `close()` stops accepting writes, lets the writer drain whatever is
/// queued, and joins it. Appends after close fail with `SinkError::Closed`.
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
use std::path::{Path, PathBuf};
use std::sync::Mutex as StdMutex;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, oneshot, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::{LogSink, SinkError};

/// One queued write plus the channel to acknowledge it on
struct WriteRequest {
    line: String,
    ack: oneshot::Sender<Result<(), SinkError>>,
}

/// Append-only file sink
///
/// Cheap to share behind an `Arc`; all clones of the sender feed the same
/// writer task.
pub struct FileSink {
    /// Path the sink writes to (kept for log output)
    path: PathBuf,

    /// Sender side of the writer queue; `None` once closed
    tx: StdMutex<Option<mpsc::UnboundedSender<WriteRequest>>>,

    /// Writer task handle, joined on close
    writer: Mutex<Option<JoinHandle<()>>>,
}

impl FileSink {
    /// Opens the sink, creating the file if needed
    ///
    /// Spawns the writer task immediately; the sink is ready for appends as
    /// soon as this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or opened for append
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        info!(path = %path.display(), "Opened notification log sink");

        let (tx, rx) = mpsc::unbounded_channel();
        let writer = tokio::spawn(write_loop(file, rx));

        Ok(FileSink {
            path,
            tx: StdMutex::new(Some(tx)),
            writer: Mutex::new(Some(writer)),
        })
    }

    /// Path the sink writes to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Closes the sink and joins the writer task
    ///
    /// Queued writes are drained before the writer exits. Safe to call once;
    /// later appends fail with `SinkError::Closed`.
    pub async fn close(&self) {
        let tx = self.tx.lock().expect("sink sender lock poisoned").take();
        drop(tx);

        if let Some(handle) = self.writer.lock().await.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "Log sink writer task panicked");
            }
        }

        info!(path = %self.path.display(), "Notification log sink closed");
    }
}

#[async_trait]
impl LogSink for FileSink {
    async fn append(&self, line: &str) -> Result<(), SinkError> {
        let tx = self
            .tx
            .lock()
            .expect("sink sender lock poisoned")
            .clone()
            .ok_or(SinkError::Closed)?;

        let (ack_tx, ack_rx) = oneshot::channel();
        tx.send(WriteRequest {
            line: line.to_string(),
            ack: ack_tx,
        })
        .map_err(|_| SinkError::Closed)?;

        ack_rx.await.map_err(|_| SinkError::Closed)?
    }
}

/// Single consumer of the write queue; owns the file handle
async fn write_loop(mut file: File, mut rx: mpsc::UnboundedReceiver<WriteRequest>) {
    while let Some(request) = rx.recv().await {
        let result = write_line(&mut file, &request.line).await;

        if let Err(ref e) = result {
            // The appending task gets the error too, but it may have given
            // up waiting; keep a record either way.
            error!(error = %e, "Log sink write failed");
        }

        // The appender may have been dropped; the write itself still counts
        let _ = request.ack.send(result);
    }

    if let Err(e) = file.flush().await {
        warn!(error = %e, "Failed to flush log sink on shutdown");
    }

    debug!("Log sink writer stopped");
}

/// Writes one whole line and flushes it
async fn write_line(file: &mut File, line: &str) -> Result<(), SinkError> {
    file.write_all(line.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}
