//! City submission handlers: `GET /` health and `POST /api/city/submit`.

use super::error::ApiError;
use super::AppState;
use crate::config::SERVICE_NAME;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Request body for a city submission.
#[derive(Debug, Deserialize)]
pub struct CityRequest {
    /// Name of the city provided by the user.
    pub city: String,
}

/// Query parameters accepted by the submit endpoint.
#[derive(Debug, Deserialize)]
pub struct SubmitQuery {
    /// Free-form origin tag (e.g. 'web', 'mobile'); relayed untouched.
    pub source: Option<String>,
}

/// Response returned to the client after forwarding.
#[derive(Debug, Serialize)]
pub struct CityResponse {
    /// Original city as provided by the user (trimmed).
    pub city: String,
    pub normalized_city: String,
    pub backend_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, Value>>,
}

/// GET / — health check. Answers regardless of backend availability.
pub async fn handle_health() -> Json<Value> {
    Json(json!({ "status": "ok", "service": SERVICE_NAME }))
}

/// POST /api/city/submit — validate the submitted city and relay it to the
/// backend through the injected forwarder.
pub async fn handle_submit_city(
    State(state): State<AppState>,
    Query(query): Query<SubmitQuery>,
    Json(payload): Json<CityRequest>,
) -> Result<Json<CityResponse>, ApiError> {
    let city = payload.city.trim();
    if city.is_empty() {
        return Err(ApiError::InvalidCity);
    }

    tracing::info!(city, source = query.source.as_deref(), "Forwarding city submission");

    let result = state
        .upstream
        .forward(city, query.source.as_deref())
        .await
        .map_err(|e| ApiError::UpstreamFailed(e.to_string()))?;

    Ok(Json(CityResponse {
        city: city.to_string(),
        normalized_city: result.normalized_city,
        backend_status: result.status,
        metadata: result.metadata,
    }))
}
