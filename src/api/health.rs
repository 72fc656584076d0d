//! Health endpoint.

use axum::{extract::State, Json};

use crate::models::HealthStatus;
use crate::AppState;

/// GET /api/health - Liveness with the current course count.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus::healthy(state.repo.count().await))
}
