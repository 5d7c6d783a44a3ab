//! Inbound frame validation.

use serde_json::Value;
use thiserror::Error;

/// Why an inbound frame was not relayed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameRejection {
    /// Larger than the configured limit.
    #[error("Message exceeds maximum size of {limit} bytes")]
    TooLarge {
        /// Configured limit in bytes.
        limit: usize,
    },
    /// Empty or whitespace only.
    #[error("Empty message")]
    Empty,
    /// Not valid JSON.
    #[error("Message is not valid JSON")]
    NotJson,
    /// Valid JSON but not an object.
    #[error("Message must be a JSON object")]
    NotObject,
    /// No non-empty string `type` field.
    #[error("Message must have a string \"type\" field")]
    MissingType,
}

impl FrameRejection {
    /// Code sent back in the `error` event.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TooLarge { .. } => "MESSAGE_TOO_LARGE",
            _ => "INVALID_MESSAGE",
        }
    }
}

/// An accepted frame: the original text and its `type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundFrame<'a> {
    /// Exactly the text the client sent.
    pub raw: &'a str,
    /// Value of the `type` field.
    pub kind: String,
}

/// Checks that `raw` is one complete JSON object with a string `type`.
pub fn validate_inbound(raw: &str, max_bytes: usize) -> Result<InboundFrame<'_>, FrameRejection> {
    if raw.len() > max_bytes {
        return Err(FrameRejection::TooLarge { limit: max_bytes });
    }

    if raw.trim().is_empty() {
        return Err(FrameRejection::Empty);
    }

    let value: Value = serde_json::from_str(raw).map_err(|_| FrameRejection::NotJson)?;
    let Value::Object(map) = value else {
        return Err(FrameRejection::NotObject);
    };

    match map.get("type") {
        Some(Value::String(kind)) if !kind.is_empty() => Ok(InboundFrame {
            raw,
            kind: kind.clone(),
        }),
        _ => Err(FrameRejection::MissingType),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_object_with_type() {
        let raw = r#"{"type":"tab_switch","severity":"HIGH"}"#;
        let frame = validate_inbound(raw, 1024).unwrap();
        assert_eq!(frame.raw, raw);
        assert_eq!(frame.kind, "tab_switch");
    }

    #[test]
    fn test_rejections() {
        assert_eq!(validate_inbound("   ", 1024), Err(FrameRejection::Empty));
        assert_eq!(validate_inbound("{oops", 1024), Err(FrameRejection::NotJson));
        assert_eq!(validate_inbound("[1,2]", 1024), Err(FrameRejection::NotObject));
        assert_eq!(validate_inbound(r#"{"kind":"x"}"#, 1024), Err(FrameRejection::MissingType));
        assert_eq!(validate_inbound(r#"{"type":7}"#, 1024), Err(FrameRejection::MissingType));
        assert_eq!(validate_inbound(r#"{"type":""}"#, 1024), Err(FrameRejection::MissingType));
    }

    #[test]
    fn test_size_limit() {
        let raw = format!(r#"{{"type":"x","pad":"{}"}}"#, "a".repeat(100));
        assert_eq!(
            validate_inbound(&raw, 64),
            Err(FrameRejection::TooLarge { limit: 64 })
        );
        assert_eq!(FrameRejection::TooLarge { limit: 64 }.code(), "MESSAGE_TOO_LARGE");
    }
}
