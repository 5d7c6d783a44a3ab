//! Proctoring alert entities.

pub mod model;
pub mod severity;

pub use model::{Alert, CreateAlert};
pub use severity::AlertSeverity;
