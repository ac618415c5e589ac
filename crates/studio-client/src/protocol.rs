//! Wire messages exchanged with the collaboration server.
//!
//! JSON over a duplex channel, discriminated by a `type` field. The
//! transport itself is not this crate's concern; these are just the
//! shapes. Optional fields default rather than fail so an older or newer
//! peer never breaks decoding.

use serde::{Deserialize, Serialize};
use studio_cursor::RemoteCursor;

use crate::error::StudioResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireMessage {
    /// The authoritative set of every remote caret in the room. Replaces
    /// whatever the receiver currently shows, wholesale.
    CursorUpdate {
        #[serde(default)]
        cursors: Vec<RemoteCursor>,
    },
    /// Full-content document sync. `client_uuid` identifies the sender's
    /// connection so receivers can drop their own echo.
    DocUpdate {
        #[serde(default)]
        content: String,
        #[serde(default)]
        sender: String,
        #[serde(rename = "clientUUID", default)]
        client_uuid: String,
    },
    Chat {
        #[serde(default)]
        sender: String,
        #[serde(default)]
        message: String,
    },
    /// Backlog sent on join, oldest first.
    ChatHistory {
        #[serde(default)]
        history: Vec<ChatRecord>,
    },
    UserList {
        #[serde(default)]
        users: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRecord {
    #[serde(default)]
    pub room_id: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub content: String,
}

impl WireMessage {
    pub fn decode(raw: &str) -> StudioResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn encode(&self) -> String {
        // These shapes serialize infallibly (string keys throughout).
        serde_json::to_string(self).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cursor_update_decodes_into_the_snapshot_payload() {
        let raw = r##"{
            "type": "cursor_update",
            "cursors": [
                {"id": "u-1", "pos": 5, "color": "#f00", "name": "Bob"},
                {"id": "u-2", "pos": null, "color": "#0f0", "name": "Eve"}
            ]
        }"##;
        let WireMessage::CursorUpdate { cursors } = WireMessage::decode(raw).unwrap() else {
            panic!("wrong tag");
        };
        assert_eq!(cursors.len(), 2);
        assert_eq!(cursors[0].position, Some(5));
        assert_eq!(cursors[1].position, None);
        assert_eq!(cursors[1].name, "Eve");
    }

    #[test]
    fn cursor_entry_with_missing_position_field_decodes() {
        let raw = r#"{"type":"cursor_update","cursors":[{"id":"u-1","color":"","name":""}]}"#;
        let WireMessage::CursorUpdate { cursors } = WireMessage::decode(raw).unwrap() else {
            panic!("wrong tag");
        };
        assert_eq!(cursors[0].position, None);
    }

    #[test]
    fn doc_update_keeps_the_sender_uuid_for_echo_filtering() {
        let raw = r#"{"type":"doc_update","content":"hello","sender":"bob","clientUUID":"abc-123"}"#;
        assert_eq!(
            WireMessage::decode(raw).unwrap(),
            WireMessage::DocUpdate {
                content: "hello".into(),
                sender: "bob".into(),
                client_uuid: "abc-123".into(),
            }
        );
    }

    #[test]
    fn unknown_tag_is_an_error_not_a_panic() {
        assert!(WireMessage::decode(r#"{"type":"presence_v9"}"#).is_err());
        assert!(WireMessage::decode("{not json").is_err());
    }

    #[test]
    fn user_list_and_chat_round_trip() {
        let msg = WireMessage::UserList {
            users: vec!["bob".into(), "eve".into()],
        };
        assert_eq!(WireMessage::decode(&msg.encode()).unwrap(), msg);

        let chat = WireMessage::Chat {
            sender: "bob".into(),
            message: "hi".into(),
        };
        assert_eq!(WireMessage::decode(&chat.encode()).unwrap(), chat);
    }
}
