//! Messages originated by the server.
//!
//! Client frames are relayed verbatim and have no fixed schema beyond a
//! string `type` field; only server events are typed here.

use serde::{Deserialize, Serialize};

use proctor_entity::alert::Alert;

/// Events the server itself pushes to connections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// An alert was recorded through the REST API.
    AlertRaised {
        /// The persisted alert.
        alert: Alert,
    },
    /// An inbound frame was rejected; sent only to its sender.
    Error {
        /// Machine-readable code.
        code: String,
        /// Human-readable description.
        message: String,
    },
}

impl ServerEvent {
    /// Serialize to the JSON text sent over the wire.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"type":"error","code":"INTERNAL","message":"serialization failed"}"#.to_string()
        })
    }
}
