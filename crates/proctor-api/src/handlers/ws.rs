//! WebSocket upgrade handler for exam sessions.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, Query, State, WebSocketUpgrade};
use axum::response::Response;
use chrono::Utc;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use proctor_core::error::AppError;
use proctor_core::types::ExamSessionId;

use crate::state::AppState;

/// Query parameter for WebSocket authentication.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    /// Access token.
    pub token: Option<String>,
}

/// GET /ws/exam/{session_id}?token={access}
///
/// The token is checked before the upgrade; a bad token never gets a socket.
pub async fn ws_handler(
    State(state): State<AppState>,
    Path(session_id): Path<ExamSessionId>,
    Query(query): Query<WsQuery>,
    ws: WebSocketUpgrade,
) -> Result<Response, AppError> {
    let token = query
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::authentication("Missing access token"))?;
    let claims = state.credentials.authenticate_access(&token)?;

    let max_bytes = state.gateway.config().max_message_bytes;
    Ok(ws
        .max_message_size(max_bytes.saturating_mul(2))
        .on_upgrade(move |socket| handle_ws_connection(state, session_id, claims.sub, socket)))
}

/// Drives one established connection until either side goes away.
async fn handle_ws_connection(
    state: AppState,
    session_id: ExamSessionId,
    subject: String,
    socket: WebSocket,
) {
    let gateway = state.gateway.clone();
    let (handle, outbound_rx) = gateway.on_connect(session_id, &subject);
    let conn_id = handle.id;

    let (ws_tx, mut ws_rx) = socket.split();
    let ping_every = Duration::from_secs(gateway.config().ping_interval_seconds.max(1));
    let mut writer = tokio::spawn(write_loop(ws_tx, outbound_rx, handle.closed_token(), ping_every));

    loop {
        tokio::select! {
            frame = ws_rx.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    gateway.on_message(session_id, &handle, text.as_str());
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(Message::Binary(_))) => {
                    debug!(conn_id = %conn_id, "Ignoring binary frame");
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                    break;
                }
            },
            // Writer ends on eviction or a failed write.
            _ = &mut writer => break,
        }
    }

    gateway.on_disconnect(session_id, &handle);
    writer.abort();

    let connected_for = Utc::now() - handle.connected_at;
    info!(
        session_id = %session_id,
        conn_id = %conn_id,
        subject = %handle.subject,
        connected_secs = connected_for.num_seconds(),
        "WebSocket connection closed"
    );
}

/// Drains the outbound queue into the socket and keeps the link alive.
async fn write_loop(
    mut ws_tx: futures::stream::SplitSink<WebSocket, Message>,
    mut outbound_rx: mpsc::Receiver<Arc<str>>,
    closed: CancellationToken,
    ping_every: Duration,
) {
    let mut ping = tokio::time::interval(ping_every);
    ping.tick().await;

    loop {
        tokio::select! {
            biased;
            msg = outbound_rx.recv() => match msg {
                Some(text) => {
                    if ws_tx.send(Message::Text(text.as_ref().into())).await.is_err() {
                        break;
                    }
                }
                None => break,
            },
            _ = closed.cancelled() => {
                let _ = ws_tx.send(Message::Close(None)).await;
                break;
            }
            _ = ping.tick() => {
                if ws_tx.send(Message::Ping(Default::default())).await.is_err() {
                    break;
                }
            }
        }
    }
}
