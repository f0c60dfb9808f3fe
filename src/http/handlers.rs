use std::sync::Arc;

use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::request::Parts;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::models::location::{LocationPing, LocationUpdate};
use crate::processor::ingest;

/// Caller identity resolved by the upstream gateway and forwarded in the
/// `x-user-id` header. Session handling itself is not this service's concern.
pub struct AuthenticatedUser(pub Uuid);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::MissingIdentity)?;
        let user_id = Uuid::parse_str(value).map_err(|_| ApiError::MissingIdentity)?;
        Ok(Self(user_id))
    }
}

#[derive(Serialize)]
pub struct StatusBody {
    pub success: bool,
    pub message: &'static str,
}

pub async fn update_location(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Json(update): Json<LocationUpdate>,
) -> ApiResult<Json<StatusBody>> {
    update.validate().map_err(ApiError::Validation)?;

    ingest::process_update(&state.pool, user_id, &update, &state.policy).await?;

    Ok(Json(StatusBody {
        success: true,
        message: "Location updated",
    }))
}

pub async fn latest_location(
    State(state): State<Arc<AppState>>,
    _user: AuthenticatedUser,
    Path(vehicle_id): Path<Uuid>,
) -> ApiResult<Json<LocationPing>> {
    let ping = ingest::latest_ping(&state.pool, vehicle_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No location found".to_string()))?;
    Ok(Json(ping))
}

#[derive(Debug, Deserialize)]
pub struct HistoryRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

pub async fn location_history(
    State(state): State<Arc<AppState>>,
    _user: AuthenticatedUser,
    Path(vehicle_id): Path<Uuid>,
    Query(range): Query<HistoryRange>,
) -> ApiResult<Json<Vec<LocationPing>>> {
    let pings = ingest::ping_history(&state.pool, vehicle_id, range.from, range.to).await?;
    Ok(Json(pings))
}

#[derive(Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

pub async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_range_parses_rfc3339_bounds() {
        let range: HistoryRange =
            serde_json::from_str(r#"{"from":"2026-08-27T10:00:00Z","to":null}"#).unwrap();
        assert!(range.from.is_some());
        assert!(range.to.is_none());
    }
}
