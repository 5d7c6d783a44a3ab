//! Transport-agnostic session gateway.
//!
//! The WebSocket handler owns the socket; everything it does with the hub
//! goes through here: connect, relay an inbound frame, disconnect.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use proctor_core::config::RealtimeConfig;
use proctor_core::types::ExamSessionId;

use crate::connection::handle::ConnectionHandle;
use crate::hub::{BroadcastHub, BroadcastReport};
use crate::message::{ServerEvent, validate_inbound};

/// Bridges live connections to the broadcast hub.
#[derive(Debug, Clone)]
pub struct SessionGateway {
    hub: Arc<BroadcastHub>,
    config: RealtimeConfig,
}

impl SessionGateway {
    /// Creates a gateway over `hub`.
    pub fn new(hub: Arc<BroadcastHub>, config: RealtimeConfig) -> Self {
        Self { hub, config }
    }

    /// The hub this gateway feeds.
    pub fn hub(&self) -> &Arc<BroadcastHub> {
        &self.hub
    }

    /// Realtime settings.
    pub fn config(&self) -> &RealtimeConfig {
        &self.config
    }

    /// Opens a connection for `subject` and registers it under `session_id`.
    ///
    /// Returns the handle and the outbound queue the writer task drains.
    pub fn on_connect(
        &self,
        session_id: ExamSessionId,
        subject: &str,
    ) -> (Arc<ConnectionHandle>, mpsc::Receiver<Arc<str>>) {
        let (handle, rx) = ConnectionHandle::new(subject, self.config.outbound_buffer_size);
        self.hub.register(session_id, handle.clone());
        info!(
            session_id = %session_id,
            conn_id = %handle.id,
            subject,
            "Gateway connection opened"
        );
        (handle, rx)
    }

    /// Validates an inbound text frame and relays it verbatim to the session.
    ///
    /// Invalid frames are answered with an `error` event to the sender only
    /// and return `None`.
    pub fn on_message(
        &self,
        session_id: ExamSessionId,
        handle: &ConnectionHandle,
        payload: &str,
    ) -> Option<BroadcastReport> {
        match validate_inbound(payload, self.config.max_message_bytes) {
            Ok(frame) => {
                debug!(
                    session_id = %session_id,
                    conn_id = %handle.id,
                    kind = %frame.kind,
                    "Relaying inbound message"
                );
                Some(self.hub.broadcast(session_id, frame.raw))
            }
            Err(rejection) => {
                debug!(
                    session_id = %session_id,
                    conn_id = %handle.id,
                    reason = %rejection,
                    "Rejected inbound message"
                );
                self.hub.record_rejected();
                let reply: Arc<str> = ServerEvent::Error {
                    code: rejection.code().to_string(),
                    message: rejection.to_string(),
                }
                .to_json()
                .into();
                let _ = handle.try_deliver(&reply);
                None
            }
        }
    }

    /// Removes the connection from its session.
    pub fn on_disconnect(&self, session_id: ExamSessionId, handle: &ConnectionHandle) {
        self.hub.unregister(session_id, handle.id);
        info!(session_id = %session_id, conn_id = %handle.id, "Gateway connection closed");
    }

    /// Pushes a server event to every connection of the session.
    pub fn publish(&self, session_id: ExamSessionId, event: &ServerEvent) -> BroadcastReport {
        self.hub.broadcast(session_id, event.to_json())
    }
}
