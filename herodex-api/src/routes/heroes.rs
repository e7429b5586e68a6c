/// Hero resource endpoints
///
/// This module provides the CRUD endpoints over the heroes table.
///
/// # Endpoints
///
/// - `POST /heroes/` - Create hero
/// - `GET /heroes/` - List heroes (offset/limit)
/// - `GET /heroes/:id` - Read one hero
/// - `PATCH /heroes/:id` - Apply a partial update
/// - `DELETE /heroes/:id` - Delete hero
///
/// Every mutating endpoint returns the post-mutation state re-read from the
/// store, never an echo of the request payload.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use herodex_shared::models::hero::{CreateHero, Hero, HeroUpdate};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Pagination parameters for the list endpoint
///
/// `limit` is capped at 100; asking for more is a validation error rather
/// than a silent clamp, so callers learn about the cap.
#[derive(Debug, Deserialize, Validate)]
pub struct ListHeroesParams {
    /// Records to skip from the start of the collection
    #[serde(default)]
    #[validate(range(min = 0, message = "offset must be non-negative"))]
    pub offset: i64,

    /// Maximum records to return
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

/// Delete hero response
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteHeroResponse {
    /// Whether the hero was deleted
    pub ok: bool,
}

/// Create hero
///
/// Persists a new hero and returns it with its server-assigned id. Any id
/// in the request body is ignored.
///
/// # Endpoint
///
/// ```text
/// POST /heroes/
/// Content-Type: application/json
///
/// {
///   "name": "Deadpond",
///   "secret_name": "Dive Wilson"
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
/// - `500 Internal Server Error`: Store failure
pub async fn create_hero(
    State(state): State<AppState>,
    Json(payload): Json<CreateHero>,
) -> ApiResult<Json<Hero>> {
    payload.validate()?;

    let hero = Hero::create(&state.db, payload).await?;

    Ok(Json(hero))
}

/// List heroes
///
/// Returns a page of heroes in insertion order. `offset` defaults to 0,
/// `limit` defaults to 100.
///
/// # Endpoint
///
/// ```text
/// GET /heroes/?offset=0&limit=100
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: `offset` negative or `limit` outside 1..=100
/// - `500 Internal Server Error`: Store failure
pub async fn read_heroes(
    State(state): State<AppState>,
    Query(params): Query<ListHeroesParams>,
) -> ApiResult<Json<Vec<Hero>>> {
    params.validate()?;

    let heroes = Hero::list(&state.db, params.offset, params.limit).await?;

    Ok(Json(heroes))
}

/// Read one hero
///
/// # Endpoint
///
/// ```text
/// GET /heroes/:id
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No hero with the given id
pub async fn read_hero(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Hero>> {
    let hero = Hero::find_by_id(&state.db, id)
        .await?
        .ok_or_else(ApiError::hero_not_found)?;

    Ok(Json(hero))
}

/// Update hero
///
/// Applies a partial update: only fields present in the payload change,
/// absent fields keep their stored values. Returns the updated hero as
/// re-read from the store.
///
/// # Endpoint
///
/// ```text
/// PATCH /heroes/:id
/// Content-Type: application/json
///
/// {
///   "age": 32
/// }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No hero with the given id (no upsert)
/// - `422 Unprocessable Entity`: Validation failed
pub async fn update_hero(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<HeroUpdate>,
) -> ApiResult<Json<Hero>> {
    payload.validate()?;

    let hero = Hero::update(&state.db, id, payload)
        .await?
        .ok_or_else(ApiError::hero_not_found)?;

    Ok(Json(hero))
}

/// Delete hero
///
/// # Endpoint
///
/// ```text
/// DELETE /heroes/:id
/// ```
///
/// # Response
///
/// ```json
/// { "ok": true }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No hero with the given id
pub async fn delete_hero(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DeleteHeroResponse>> {
    let deleted = Hero::delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::hero_not_found());
    }

    Ok(Json(DeleteHeroResponse { ok: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_defaults() {
        let params: ListHeroesParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.offset, 0);
        assert_eq!(params.limit, 100);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_list_params_reject_limit_above_cap() {
        let params: ListHeroesParams = serde_json::from_str(r#"{"limit": 101}"#).unwrap();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_list_params_reject_zero_limit_and_negative_offset() {
        let params: ListHeroesParams = serde_json::from_str(r#"{"limit": 0}"#).unwrap();
        assert!(params.validate().is_err());

        let params: ListHeroesParams = serde_json::from_str(r#"{"offset": -1}"#).unwrap();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_list_params_accept_bounds() {
        let params: ListHeroesParams =
            serde_json::from_str(r#"{"offset": 0, "limit": 100}"#).unwrap();
        assert!(params.validate().is_ok());

        let params: ListHeroesParams = serde_json::from_str(r#"{"limit": 1}"#).unwrap();
        assert!(params.validate().is_ok());
    }
}
