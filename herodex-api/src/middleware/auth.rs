/// Admin token gate
///
/// Routes under the admin namespace require callers to present the
/// configured token in the `x-token` header. The gate itself is the pure
/// `authorized` check; the middleware wraps it and decides the status code:
/// a missing header is 401, a wrong token is 403.
///
/// # Example
///
/// ```ignore
/// let admin_routes = Router::new()
///     .route("/", post(routes::admin::update_admin))
///     .layer(axum::middleware::from_fn_with_state(
///         state.clone(),
///         middleware::auth::require_admin_token,
///     ));
/// ```

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::{app::AppState, error::ApiError};

/// Header carrying the admin token
pub const ADMIN_TOKEN_HEADER: &str = "x-token";

/// Checks whether the request headers carry the expected admin token
pub fn authorized(headers: &HeaderMap, expected: &str) -> bool {
    headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|token| token == expected)
        .unwrap_or(false)
}

/// Admin authentication middleware layer
///
/// Rejects requests without the `x-token` header (401) or with a token that
/// does not match the configured value (403).
pub async fn require_admin_token(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let headers = req.headers();

    if !headers.contains_key(ADMIN_TOKEN_HEADER) {
        return Err(ApiError::Unauthorized(
            "Missing x-token header".to_string(),
        ));
    }

    if !authorized(headers, state.admin_token()) {
        return Err(ApiError::Forbidden("Invalid admin token".to_string()));
    }

    Ok(next.run(req).await)
}
