//! Live connection handles.

pub mod handle;

pub use handle::{ConnectionHandle, DeliveryFailure};
