/// Notification endpoints
///
/// This module provides the notification endpoint. The endpoint never writes
/// the log itself: it registers deferred tasks on the request's
/// `BackgroundTasks` queue and acknowledges immediately. The queue drains
/// after the response has gone out, so the caller observes neither the
/// latency nor the outcome of the log writes.
///
/// # Endpoints
///
/// - `POST /notifications/send/:email` - Schedule notification log writes

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use herodex_tasks::queue::BackgroundTasks;
use serde::{Deserialize, Serialize};

/// Query parameters for the send endpoint
#[derive(Debug, Deserialize)]
pub struct SendNotificationParams {
    /// Optional query string; when present, its sighting is logged too
    pub q: Option<String>,
}

/// Send notification response
#[derive(Debug, Serialize, Deserialize)]
pub struct SendNotificationResponse {
    /// Fixed acknowledgment message
    pub message: String,
}

/// Formats one notification log line
///
/// `message` is expected to be newline-terminated by the caller, so the
/// line is complete as returned.
pub fn notification_line(email: &str, message: &str) -> String {
    format!("notification for {}: {}", email, message)
}

/// Send notification
///
/// Schedules a deferred task writing `message to {email}` to the log sink.
/// If `q` is non-empty, a `found query: {q}` task is registered first; the
/// two tasks run in that order once the response has been sent.
///
/// # Endpoint
///
/// ```text
/// POST /notifications/send/spidey@example.com?q=hello
/// ```
///
/// # Response
///
/// ```json
/// { "message": "Notification sent in the background" }
/// ```
pub async fn send_notification(
    State(state): State<AppState>,
    Extension(tasks): Extension<BackgroundTasks>,
    Path(email): Path<String>,
    Query(params): Query<SendNotificationParams>,
) -> ApiResult<Json<SendNotificationResponse>> {
    if let Some(q) = params.q.as_deref().filter(|q| !q.is_empty()) {
        let sink = state.log_sink.clone();
        let line = notification_line("", &format!("found query: {}\n", q));
        tasks.add_task("query-log", async move {
            sink.append(&line).await?;
            Ok(())
        });
    }

    let sink = state.log_sink.clone();
    let line = notification_line(&email, &format!("message to {}\n", email));
    tasks.add_task("message-log", async move {
        sink.append(&line).await?;
        Ok(())
    });

    Ok(Json(SendNotificationResponse {
        message: "Notification sent in the background".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_line_format() {
        assert_eq!(
            notification_line("spidey@example.com", "message to spidey@example.com\n"),
            "notification for spidey@example.com: message to spidey@example.com\n"
        );
    }

    #[test]
    fn test_notification_line_with_empty_subject() {
        assert_eq!(
            notification_line("", "found query: hello\n"),
            "notification for : found query: hello\n"
        );
    }
}
