//! Liveness endpoint

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::backend::server::state::AppState;

/// Body of `GET /api/health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthCheckResponse {
    pub status: u16,
    pub message: String,
    pub uptime_seconds: i64,
}

/// Report that the server is up, and for how long
pub async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: 200,
        message: "Service is running smoothly.".to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}
