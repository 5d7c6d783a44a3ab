//! Broadcast hub metrics.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Hub-level counters.
#[derive(Debug, Default)]
pub struct HubMetrics {
    connections_opened: AtomicU64,
    connections_active: AtomicU64,
    messages_received: AtomicU64,
    messages_rejected: AtomicU64,
    deliveries: AtomicU64,
    failed_deliveries: AtomicU64,
    evictions: AtomicU64,
    channels_opened: AtomicU64,
    channels_closed: AtomicU64,
}

impl HubMetrics {
    /// Create new zeroed metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new connection.
    pub fn connection_opened(&self) {
        self.connections_opened.fetch_add(1, Ordering::Relaxed);
        self.connections_active.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a connection leaving the hub.
    pub fn connection_closed(&self) {
        let _ = self
            .connections_active
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1));
    }

    /// Record one broadcast request.
    pub fn message_received(&self) {
        self.messages_received.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an inbound frame that failed validation.
    pub fn message_rejected(&self) {
        self.messages_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of a fan-out.
    pub fn fan_out(&self, delivered: u64, failed: u64) {
        self.deliveries.fetch_add(delivered, Ordering::Relaxed);
        self.failed_deliveries.fetch_add(failed, Ordering::Relaxed);
    }

    /// Record an eviction.
    pub fn connection_evicted(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a session channel being created.
    pub fn channel_opened(&self) {
        self.channels_opened.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a session channel being dropped.
    pub fn channel_closed(&self) {
        self.channels_closed.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            connections_opened: self.connections_opened.load(Ordering::Relaxed),
            connections_active: self.connections_active.load(Ordering::Relaxed),
            messages_received: self.messages_received.load(Ordering::Relaxed),
            messages_rejected: self.messages_rejected.load(Ordering::Relaxed),
            deliveries: self.deliveries.load(Ordering::Relaxed),
            failed_deliveries: self.failed_deliveries.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            channels_opened: self.channels_opened.load(Ordering::Relaxed),
            channels_closed: self.channels_closed.load(Ordering::Relaxed),
        }
    }
}

/// Serializable metrics snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Connections ever registered.
    pub connections_opened: u64,
    /// Connections currently registered.
    pub connections_active: u64,
    /// Broadcast requests.
    pub messages_received: u64,
    /// Inbound frames rejected by validation.
    pub messages_rejected: u64,
    /// Successful enqueues across all fan-outs.
    pub deliveries: u64,
    /// Failed enqueues across all fan-outs.
    pub failed_deliveries: u64,
    /// Connections evicted after a failed delivery.
    pub evictions: u64,
    /// Session channels created.
    pub channels_opened: u64,
    /// Session channels removed once empty.
    pub channels_closed: u64,
}
