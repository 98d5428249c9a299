//! WebSocket message DTOs for the chat application.
//!
//! Both directions use one closed, internally-tagged enum each (`event`
//! tag, kebab-case), so adding an intent or an outbound event is a
//! compile-time-checked addition rather than a stringly-typed lookup.

use serde::{Deserialize, Serialize};

use crate::domain::{GroupMessage, PrivateMessage};
use idobata_shared::time::timestamp_to_jst_rfc3339;

/// Inbound client intents.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ClientEvent {
    RegisterUser {
        username: String,
    },
    JoinRoom {
        username: String,
        room: String,
    },
    LeaveRoom {
        username: Option<String>,
        room: String,
    },
    SendRoomMessage {
        from_user: String,
        room: String,
        message: String,
    },
    TypingRoom {
        username: String,
        room: String,
        #[serde(rename = "isTyping")]
        is_typing: bool,
    },
    SendPrivateMessage {
        from_user: String,
        to_user: String,
        message: String,
    },
    TypingPrivate {
        from_user: String,
        to_user: String,
        #[serde(rename = "isTyping")]
        is_typing: bool,
    },
}

/// Outbound server events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ServerEvent {
    OnlineUsers {
        users: Vec<String>,
    },
    RoomSystemMessage {
        room: String,
        message: String,
        date_sent: String,
    },
    RoomMessage {
        id: String,
        from_user: String,
        room: String,
        message: String,
        date_sent: String,
    },
    PrivateMessage {
        id: String,
        from_user: String,
        to_user: String,
        message: String,
        date_sent: String,
    },
    TypingRoom {
        username: String,
        room: String,
        #[serde(rename = "isTyping")]
        is_typing: bool,
    },
    TypingPrivate {
        from_user: String,
        to_user: String,
        #[serde(rename = "isTyping")]
        is_typing: bool,
    },
}

impl ServerEvent {
    /// Build a `room-message` event from a persisted record.
    pub fn from_group_message(record: &GroupMessage) -> Self {
        ServerEvent::RoomMessage {
            id: record.id.to_string(),
            from_user: record.from_user.as_str().to_string(),
            room: record.room.as_str().to_string(),
            message: record.body.as_str().to_string(),
            date_sent: timestamp_to_jst_rfc3339(record.date_sent.value()),
        }
    }

    /// Build a `private-message` event from a persisted record.
    pub fn from_private_message(record: &PrivateMessage) -> Self {
        ServerEvent::PrivateMessage {
            id: record.id.to_string(),
            from_user: record.from_user.as_str().to_string(),
            to_user: record.to_user.as_str().to_string(),
            message: record.body.as_str().to_string(),
            date_sent: timestamp_to_jst_rfc3339(record.date_sent.value()),
        }
    }

    /// Build a `room-system-message` notice (join/leave/disconnect).
    pub fn system_notice(room: &str, message: String, now_millis: i64) -> Self {
        ServerEvent::RoomSystemMessage {
            room: room.to_string(),
            message,
            date_sent: timestamp_to_jst_rfc3339(now_millis),
        }
    }
}
