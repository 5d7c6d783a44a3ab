//! Individual WebSocket connection handle.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use proctor_core::types::ConnectionId;

/// Why a message could not be queued for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryFailure {
    /// The outbound queue is at capacity; the peer is too slow.
    Full,
    /// The connection was closed by either side.
    Closed,
}

/// A handle to a single live connection.
///
/// Shared between the transport task (which drains the outbound queue and
/// may close the handle) and the hub (which enqueues and may evict). Once
/// closed from either side, further deliveries report
/// [`DeliveryFailure::Closed`] and further closes do nothing.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID.
    pub id: ConnectionId,
    /// Authenticated subject (user ID) that opened the connection.
    pub subject: String,
    /// When the connection was established.
    pub connected_at: DateTime<Utc>,
    sender: mpsc::Sender<Arc<str>>,
    cancel: CancellationToken,
    alive: AtomicBool,
}

impl ConnectionHandle {
    /// Creates a handle with an outbound queue of `buffer` messages.
    ///
    /// Returns the handle and the receiving half for the writer task.
    pub fn new(subject: impl Into<String>, buffer: usize) -> (Arc<Self>, mpsc::Receiver<Arc<str>>) {
        let (sender, receiver) = mpsc::channel(buffer.max(1));
        let handle = Arc::new(Self {
            id: ConnectionId::new(),
            subject: subject.into(),
            connected_at: Utc::now(),
            sender,
            cancel: CancellationToken::new(),
            alive: AtomicBool::new(true),
        });
        (handle, receiver)
    }

    /// Enqueues a message without waiting.
    pub fn try_deliver(&self, msg: &Arc<str>) -> Result<(), DeliveryFailure> {
        if !self.is_alive() {
            return Err(DeliveryFailure::Closed);
        }
        match self.sender.try_send(Arc::clone(msg)) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => Err(DeliveryFailure::Full),
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.alive.store(false, Ordering::SeqCst);
                Err(DeliveryFailure::Closed)
            }
        }
    }

    /// Check if the connection is alive.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst) && !self.cancel.is_cancelled()
    }

    /// Closes the connection. Idempotent.
    pub fn close(&self) {
        if self.alive.swap(false, Ordering::SeqCst) {
            debug!(conn_id = %self.id, "Connection handle closed");
        }
        self.cancel.cancel();
    }

    /// Token cancelled when the handle is closed; the writer task watches it.
    pub fn closed_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_deliver_then_receive() {
        let (handle, mut rx) = ConnectionHandle::new("alice", 4);
        let msg: Arc<str> = Arc::from("{\"type\":\"ping\"}");
        handle.try_deliver(&msg).unwrap();
        assert_eq!(rx.recv().await.as_deref(), Some("{\"type\":\"ping\"}"));
    }

    #[tokio::test]
    async fn test_full_queue_reports_full() {
        let (handle, _rx) = ConnectionHandle::new("alice", 1);
        let msg: Arc<str> = Arc::from("m");
        handle.try_deliver(&msg).unwrap();
        assert_eq!(handle.try_deliver(&msg), Err(DeliveryFailure::Full));
        assert!(handle.is_alive());
    }

    #[tokio::test]
    async fn test_dropped_receiver_reports_closed() {
        let (handle, rx) = ConnectionHandle::new("alice", 4);
        drop(rx);
        let msg: Arc<str> = Arc::from("m");
        assert_eq!(handle.try_deliver(&msg), Err(DeliveryFailure::Closed));
        assert!(!handle.is_alive());
    }

    #[tokio::test]
    async fn test_close_is_idempotent_and_cancels() {
        let (handle, _rx) = ConnectionHandle::new("alice", 4);
        let token = handle.closed_token();
        handle.close();
        handle.close();
        assert!(token.is_cancelled());
        let msg: Arc<str> = Arc::from("m");
        assert_eq!(handle.try_deliver(&msg), Err(DeliveryFailure::Closed));
    }
}
