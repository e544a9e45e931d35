//! Outbound wire commands.
//!
//! Everything the client sends upstream is a small JSON text message with
//! an action key `"a"` and a value key `"v"`. Mode changes carry the mode
//! name and token list as a two-element array.

use crate::error::Result;
use crate::types::TickMode;
use serde_json::json;

/// A control message sent to the venue over the text channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireCommand {
    /// Subscribe the given instrument tokens.
    Subscribe(Vec<u32>),
    /// Unsubscribe the given instrument tokens.
    Unsubscribe(Vec<u32>),
    /// Switch the streaming mode for the given instrument tokens.
    Mode(TickMode, Vec<u32>),
}

impl WireCommand {
    /// Serializes the command to its wire JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let value = match self {
            Self::Subscribe(tokens) => json!({ "a": "subscribe", "v": tokens }),
            Self::Unsubscribe(tokens) => json!({ "a": "unsubscribe", "v": tokens }),
            Self::Mode(mode, tokens) => json!({ "a": "mode", "v": [mode.as_str(), tokens] }),
        };
        Ok(serde_json::to_string(&value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_json() {
        let cmd = WireCommand::Subscribe(vec![738_561]);
        assert_eq!(cmd.to_json().unwrap(), r#"{"a":"subscribe","v":[738561]}"#);
    }

    #[test]
    fn test_unsubscribe_json() {
        let cmd = WireCommand::Unsubscribe(vec![738_561, 408_065]);
        assert_eq!(
            cmd.to_json().unwrap(),
            r#"{"a":"unsubscribe","v":[738561,408065]}"#
        );
    }

    #[test]
    fn test_mode_json() {
        let cmd = WireCommand::Mode(TickMode::Quote, vec![738_561]);
        assert_eq!(
            cmd.to_json().unwrap(),
            r#"{"a":"mode","v":["quote",[738561]]}"#
        );
    }

    #[test]
    fn test_mode_json_full() {
        let cmd = WireCommand::Mode(TickMode::Full, vec![1, 2, 3]);
        assert_eq!(cmd.to_json().unwrap(), r#"{"a":"mode","v":["full",[1,2,3]]}"#);
    }

    #[test]
    fn test_empty_token_list() {
        let cmd = WireCommand::Subscribe(Vec::new());
        assert_eq!(cmd.to_json().unwrap(), r#"{"a":"subscribe","v":[]}"#);
    }
}
