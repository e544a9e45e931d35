//! Inbound text message parsing.
//!
//! The venue multiplexes non-tick traffic over the text channel as JSON
//! envelopes with a `type` discriminator. Order postbacks and server
//! errors are the interesting ones; anything else is surfaced as
//! [`Postback::Other`] so callers can log and drop it.

use crate::error::{Result, WireError};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Value,
}

/// A parsed text-channel message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Postback {
    /// An order lifecycle update, payload passed through untyped.
    Order(Value),
    /// A server-reported error message.
    Error(String),
    /// Any other envelope kind, kept for diagnostics.
    Other {
        /// The envelope's `type` discriminator.
        kind: String,
        /// The envelope's payload, if any.
        data: Value,
    },
}

impl Postback {
    /// Parses a text-channel message into its envelope kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON envelope with a `type`
    /// field.
    pub fn parse(text: &str) -> Result<Self> {
        let envelope: Envelope =
            serde_json::from_str(text).map_err(|e| WireError::Postback(e.to_string()))?;
        Ok(match envelope.kind.as_str() {
            "order" => Self::Order(envelope.data),
            "error" => match envelope.data {
                Value::String(message) => Self::Error(message),
                other => Self::Error(other.to_string()),
            },
            _ => Self::Other {
                kind: envelope.kind,
                data: envelope.data,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_order_postback() {
        let text = r#"{"type":"order","data":{"order_id":"151220000000000","status":"COMPLETE"}}"#;
        match Postback::parse(text).unwrap() {
            Postback::Order(data) => {
                assert_eq!(data["order_id"], "151220000000000");
                assert_eq!(data["status"], "COMPLETE");
            }
            other => panic!("unexpected postback: {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_postback() {
        let text = r#"{"type":"error","data":"Invalid session"}"#;
        assert_eq!(
            Postback::parse(text).unwrap(),
            Postback::Error("Invalid session".to_string())
        );
    }

    #[test]
    fn test_parse_error_postback_with_object_data() {
        let text = r#"{"type":"error","data":{"reason":"throttled"}}"#;
        match Postback::parse(text).unwrap() {
            Postback::Error(message) => assert!(message.contains("throttled")),
            other => panic!("unexpected postback: {other:?}"),
        }
    }

    #[test]
    fn test_parse_unknown_kind() {
        let text = r#"{"type":"instruments_meta","data":{"count":99}}"#;
        assert_eq!(
            Postback::parse(text).unwrap(),
            Postback::Other {
                kind: "instruments_meta".to_string(),
                data: json!({"count": 99}),
            }
        );
    }

    #[test]
    fn test_parse_missing_data_defaults_to_null() {
        let text = r#"{"type":"ping"}"#;
        assert_eq!(
            Postback::parse(text).unwrap(),
            Postback::Other {
                kind: "ping".to_string(),
                data: Value::Null,
            }
        );
    }

    #[test]
    fn test_parse_rejects_non_envelope_json() {
        assert!(Postback::parse("[1,2,3]").is_err());
        assert!(Postback::parse("not json at all").is_err());
        assert!(Postback::parse(r#"{"data":"no type field"}"#).is_err());
    }
}
