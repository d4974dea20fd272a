//! Settings for the real-time engine.

use serde::{Deserialize, Serialize};

/// Tunables for the WebSocket fan-out engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RealtimeConfig {
    /// Outbound frames queued per connection before drops kick in.
    pub channel_buffer_size: usize,
    /// Seconds between keepalive pings.
    pub ping_interval_seconds: u64,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: 256,
            ping_interval_seconds: 30,
        }
    }
}
