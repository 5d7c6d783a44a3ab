//! Per-session connection set.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use proctor_core::types::{ConnectionId, ExamSessionId};

use crate::connection::handle::ConnectionHandle;

/// The live connections watching one exam session.
///
/// Only the hub holds these; callers see [`ChannelInfo`] snapshots.
#[derive(Debug)]
pub(crate) struct SessionChannel {
    session_id: ExamSessionId,
    epoch: u64,
    opened_at: DateTime<Utc>,
    connections: HashMap<ConnectionId, Arc<ConnectionHandle>>,
}

impl SessionChannel {
    pub(crate) fn new(session_id: ExamSessionId, epoch: u64) -> Self {
        Self {
            session_id,
            epoch,
            opened_at: Utc::now(),
            connections: HashMap::new(),
        }
    }

    /// Adds or replaces a connection. Returns `true` if it was not present.
    pub(crate) fn insert(&mut self, handle: Arc<ConnectionHandle>) -> bool {
        self.connections.insert(handle.id, handle).is_none()
    }

    pub(crate) fn remove(&mut self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.connections.remove(conn_id)
    }

    pub(crate) fn contains(&self, conn_id: &ConnectionId) -> bool {
        self.connections.contains_key(conn_id)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.connections.len()
    }

    pub(crate) fn connections(&self) -> impl Iterator<Item = &Arc<ConnectionHandle>> {
        self.connections.values()
    }

    /// Distinct subjects with at least one live connection, sorted.
    fn subjects(&self) -> Vec<String> {
        let mut subjects: Vec<String> = self
            .connections
            .values()
            .map(|c| c.subject.clone())
            .collect();
        subjects.sort();
        subjects.dedup();
        subjects
    }

    pub(crate) fn info(&self) -> ChannelInfo {
        ChannelInfo {
            session_id: self.session_id,
            epoch: self.epoch,
            opened_at: self.opened_at,
            connections: self.connections.len(),
            subjects: self.subjects(),
            oldest_connected_at: self.connections.values().map(|c| c.connected_at).min(),
        }
    }
}

/// Read-only snapshot of a session channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    /// The exam session.
    pub session_id: ExamSessionId,
    /// Creation sequence number; a recreated channel gets a new epoch.
    pub epoch: u64,
    /// When this channel instance was created.
    pub opened_at: DateTime<Utc>,
    /// Number of registered connections.
    pub connections: usize,
    /// Distinct subjects connected, sorted.
    pub subjects: Vec<String>,
    /// Earliest `connected_at` among the registered connections.
    pub oldest_connected_at: Option<DateTime<Utc>>,
}
