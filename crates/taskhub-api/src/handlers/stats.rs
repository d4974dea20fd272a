//! Live engine statistics handler.

use axum::Json;
use axum::extract::State;

use crate::dto::{ApiResponse, StatsResponse};
use crate::state::AppState;

/// GET /api/stats
pub async fn stats(State(state): State<AppState>) -> Json<ApiResponse<StatsResponse>> {
    Json(ApiResponse::ok(StatsResponse {
        connections: state.realtime.connections.connection_count(),
        channels: state.realtime.channels.room_count(),
        metrics: state.realtime.metrics.snapshot(),
    }))
}
