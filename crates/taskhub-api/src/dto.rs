//! Response bodies for the JSON routes.

use serde::{Deserialize, Serialize};

use taskhub_realtime::metrics::MetricsSnapshot;

/// Envelope every JSON route answers with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Body of `GET /api/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Open WebSocket connections.
    pub connections: usize,
    /// Workspace rooms with at least one member.
    pub channels: usize,
    /// Counters accumulated since startup.
    pub metrics: MetricsSnapshot,
}
