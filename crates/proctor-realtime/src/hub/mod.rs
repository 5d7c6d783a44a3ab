//! Session-scoped broadcast hub.
//!
//! The hub exclusively owns the map from exam session to live connections.
//! Channels are created lazily on first registration and dropped as soon as
//! their last connection leaves. A connection belongs to at most one
//! session at a time; the `membership` reverse index enforces this.
//!
//! Broadcasts for one session hold that session's entry exclusively for the
//! whole fan-out, so messages to a session are enqueued in the order the
//! broadcasts were made. Enqueueing never waits: a full or closed queue is
//! a delivery failure, and the failing connection is evicted.

mod channel;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, info, warn};

use proctor_core::types::{ConnectionId, ExamSessionId};

use crate::connection::handle::{ConnectionHandle, DeliveryFailure};
use crate::metrics::{HubMetrics, MetricsSnapshot};

pub use channel::ChannelInfo;
use channel::SessionChannel;

/// Outcome of a single broadcast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Connections the message was queued for.
    pub delivered: usize,
    /// Connections evicted because delivery failed.
    pub evicted: usize,
}

/// Fans messages out to every live connection of an exam session.
#[derive(Debug, Default)]
pub struct BroadcastHub {
    channels: DashMap<ExamSessionId, SessionChannel>,
    membership: DashMap<ConnectionId, ExamSessionId>,
    next_epoch: AtomicU64,
    metrics: HubMetrics,
}

impl BroadcastHub {
    /// Creates an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `handle` to `session_id`'s channel, creating the channel if needed.
    ///
    /// Idempotent. A connection registered under another session is moved.
    /// Closed handles are ignored; returns whether the handle is registered
    /// afterwards.
    pub fn register(&self, session_id: ExamSessionId, handle: Arc<ConnectionHandle>) -> bool {
        if !handle.is_alive() {
            debug!(conn_id = %handle.id, "Ignoring registration of closed connection");
            return false;
        }

        let conn_id = handle.id;

        // The membership entry stays locked until the handle sits in exactly
        // one channel. Lock order is always membership, then channels.
        let previous = match self.membership.entry(conn_id) {
            Entry::Vacant(slot) => {
                self.attach(session_id, handle);
                slot.insert(session_id);
                None
            }
            Entry::Occupied(mut slot) => {
                let old = slot.insert(session_id);
                self.attach(session_id, handle);
                if old != session_id {
                    self.detach(old, &conn_id);
                }
                Some(old)
            }
        };

        match previous {
            None => {
                self.metrics.connection_opened();
                info!(session_id = %session_id, conn_id = %conn_id, "Connection registered");
            }
            Some(old) if old != session_id => {
                info!(
                    from = %old,
                    to = %session_id,
                    conn_id = %conn_id,
                    "Connection moved between sessions"
                );
            }
            Some(_) => {}
        }

        true
    }

    /// Removes a connection from a session. Idempotent; unknown connections
    /// and sessions are a no-op. Returns whether anything was removed.
    pub fn unregister(&self, session_id: ExamSessionId, conn_id: ConnectionId) -> bool {
        let Some(handle) = self.detach(session_id, &conn_id) else {
            return false;
        };
        handle.close();

        if self
            .membership
            .remove_if(&conn_id, |_, sid| *sid == session_id)
            .is_some()
        {
            self.metrics.connection_closed();
        }

        info!(session_id = %session_id, conn_id = %conn_id, "Connection unregistered");
        true
    }

    /// Queues `message` for every connection of `session_id`.
    ///
    /// A failure for one connection never affects the others; failing
    /// connections are closed and removed.
    pub fn broadcast(&self, session_id: ExamSessionId, message: impl Into<Arc<str>>) -> BroadcastReport {
        let message: Arc<str> = message.into();
        self.metrics.message_received();

        let (delivered, evicted) = {
            let Some(mut channel) = self.channels.get_mut(&session_id) else {
                debug!(session_id = %session_id, "Broadcast to session with no connections");
                return BroadcastReport::default();
            };

            let failed: Vec<(ConnectionId, DeliveryFailure)> = channel
                .connections()
                .filter_map(|conn| conn.try_deliver(&message).err().map(|f| (conn.id, f)))
                .collect();

            for (conn_id, _) in &failed {
                if let Some(handle) = channel.remove(conn_id) {
                    handle.close();
                }
            }

            (channel.len(), failed)
        };

        self.metrics.fan_out(delivered as u64, evicted.len() as u64);

        if !evicted.is_empty() {
            for (conn_id, reason) in &evicted {
                warn!(
                    session_id = %session_id,
                    conn_id = %conn_id,
                    reason = ?reason,
                    "Evicting connection after failed delivery"
                );
                self.metrics.connection_evicted();
                if self
                    .membership
                    .remove_if(conn_id, |_, sid| *sid == session_id)
                    .is_some()
                {
                    self.metrics.connection_closed();
                }
            }
            self.collect_if_empty(session_id);
        }

        BroadcastReport {
            delivered,
            evicted: evicted.len(),
        }
    }

    /// Snapshot of a session's channel, if it exists.
    pub fn channel_info(&self, session_id: ExamSessionId) -> Option<ChannelInfo> {
        self.channels.get(&session_id).map(|ch| ch.info())
    }

    /// Whether `conn_id` is currently registered under `session_id`.
    pub fn is_registered(&self, session_id: ExamSessionId, conn_id: ConnectionId) -> bool {
        self.channels
            .get(&session_id)
            .is_some_and(|ch| ch.contains(&conn_id))
    }

    /// The session a connection is registered under.
    pub fn session_of(&self, conn_id: ConnectionId) -> Option<ExamSessionId> {
        self.membership.get(&conn_id).map(|sid| *sid)
    }

    /// Number of sessions with at least one connection.
    pub fn session_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of registered connections across all sessions.
    pub fn connection_count(&self) -> usize {
        self.membership.len()
    }

    /// Snapshot of the hub counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Records an inbound frame that was rejected before reaching the hub.
    pub fn record_rejected(&self) {
        self.metrics.message_rejected();
    }

    fn attach(&self, session_id: ExamSessionId, handle: Arc<ConnectionHandle>) {
        let mut entry = self.channels.entry(session_id).or_insert_with(|| {
            self.metrics.channel_opened();
            let epoch = self.next_epoch.fetch_add(1, Ordering::Relaxed);
            debug!(session_id = %session_id, epoch, "Session channel opened");
            SessionChannel::new(session_id, epoch)
        });
        entry.insert(handle);
    }

    /// Removes `conn_id` from one session's channel and drops the channel if
    /// that left it empty.
    fn detach(&self, session_id: ExamSessionId, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        let removed = self
            .channels
            .get_mut(&session_id)
            .and_then(|mut ch| ch.remove(conn_id));
        self.collect_if_empty(session_id);
        removed
    }

    fn collect_if_empty(&self, session_id: ExamSessionId) {
        if self
            .channels
            .remove_if(&session_id, |_, ch| ch.is_empty())
            .is_some()
        {
            self.metrics.channel_closed();
            debug!(session_id = %session_id, "Session channel closed");
        }
    }
}
