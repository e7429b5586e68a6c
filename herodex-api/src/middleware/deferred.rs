/// Deferred-task queue middleware
///
/// Gives every request its own `BackgroundTasks` queue via request
/// extensions, then hands the queue to the runner once the inner service has
/// produced the response. The drain runs on a spawned task, so the client
/// never waits on queued work and never observes its outcome.
///
/// Handlers extract the queue with `Extension<BackgroundTasks>` and append
/// work to it; handlers that queue nothing cost a single allocation here.

use axum::{extract::Request, middleware::Next, response::Response};
use herodex_tasks::{queue::BackgroundTasks, runner};
use tracing::debug;

/// Injects a fresh task queue and drains it after the response is produced
pub async fn deferred_tasks_layer(mut req: Request, next: Next) -> Response {
    let tasks = BackgroundTasks::new();
    req.extensions_mut().insert(tasks.clone());

    let response = next.run(req).await;

    if !tasks.is_empty() {
        debug!(queued = tasks.len(), "Draining deferred tasks after response");
        runner::spawn_drain(tasks);
    }

    response
}
