//! Wire messages: inbound frame validation and server-originated events.

pub mod types;
pub mod validator;

pub use types::ServerEvent;
pub use validator::{FrameRejection, InboundFrame, validate_inbound};
