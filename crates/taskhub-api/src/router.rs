//! Route table for the HTTP surface.

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::handlers::{health, stats, ws};
use crate::middleware::cors;
use crate::state::AppState;

/// Assembles every route plus the trace and CORS layers.
///
/// `/ws` upgrades to the real-time protocol; the JSON routes sit under
/// `/api`.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health::health))
        .route("/stats", get(stats::stats));

    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(&state.config.server.cors))
        .with_state(state)
}
