//! Real-time WebSocket engine configuration.

use serde::{Deserialize, Serialize};

/// Real-time (WebSocket) engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Capacity of each connection's outbound queue.
    #[serde(default = "default_outbound_buffer")]
    pub outbound_buffer_size: usize,
    /// WebSocket ping interval in seconds.
    #[serde(default = "default_ping_interval")]
    pub ping_interval_seconds: u64,
    /// Largest inbound text frame accepted, in bytes.
    #[serde(default = "default_max_message_bytes")]
    pub max_message_bytes: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            outbound_buffer_size: default_outbound_buffer(),
            ping_interval_seconds: default_ping_interval(),
            max_message_bytes: default_max_message_bytes(),
        }
    }
}

fn default_outbound_buffer() -> usize {
    256
}

fn default_ping_interval() -> u64 {
    30
}

fn default_max_message_bytes() -> usize {
    64 * 1024
}
