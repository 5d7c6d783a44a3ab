//! # proctor-realtime
//!
//! Real-time fan-out for exam sessions. Provides:
//!
//! - A broadcast hub that owns the connections-per-session map
//! - Connection handles with bounded, non-blocking outbound queues
//! - A transport-agnostic gateway (connect / message / disconnect)
//! - Inbound frame validation and server-originated event types
//! - Hub metrics

pub mod connection;
pub mod gateway;
pub mod hub;
pub mod message;
pub mod metrics;

pub use connection::handle::ConnectionHandle;
pub use gateway::SessionGateway;
pub use hub::BroadcastHub;
pub use metrics::{HubMetrics, MetricsSnapshot};
