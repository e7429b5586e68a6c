/// Admin namespace endpoints
///
/// All routes here sit behind the admin token gate; the middleware has
/// already rejected unauthenticated callers by the time a handler runs.
///
/// # Endpoints
///
/// - `POST /admin/` - Admin acknowledgment

use axum::Json;
use serde::{Deserialize, Serialize};

/// Admin response
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminResponse {
    /// Acknowledgment message
    pub message: String,
}

/// Admin handler
pub async fn update_admin() -> Json<AdminResponse> {
    Json(AdminResponse {
        message: "Admin getting schwifty".to_string(),
    })
}
