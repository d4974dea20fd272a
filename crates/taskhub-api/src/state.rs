//! Shared handler state.

use std::sync::Arc;

use taskhub_core::config::AppConfig;
use taskhub_realtime::engine::RealtimeEngine;

/// Everything the handlers need, cloned per request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub realtime: Arc<RealtimeEngine>,
}
