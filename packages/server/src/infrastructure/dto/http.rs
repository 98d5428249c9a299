//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::{GroupMessage, PrivateMessage, UserRecord};
use idobata_shared::time::timestamp_to_jst_rfc3339;

/// Signup request body.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Public view of an account record (never exposes the password).
#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub createon: String,
}

impl UserDto {
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            username: record.username.clone(),
            firstname: record.firstname.clone(),
            lastname: record.lastname.clone(),
            createon: timestamp_to_jst_rfc3339(record.created_on.value()),
        }
    }
}

/// Account summary used in the users list.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummaryDto {
    pub username: String,
    pub firstname: String,
    pub lastname: String,
}

impl UserSummaryDto {
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            username: record.username.clone(),
            firstname: record.firstname.clone(),
            lastname: record.lastname.clone(),
        }
    }
}

/// Response body for signup/login.
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub message: String,
    pub user: UserDto,
}

/// `{"message": "..."}` error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// `GET /api/rooms` response.
#[derive(Debug, Clone, Serialize)]
pub struct RoomsResponse {
    pub rooms: Vec<String>,
}

/// `GET /api/users` response.
#[derive(Debug, Clone, Serialize)]
pub struct UsersResponse {
    pub users: Vec<UserSummaryDto>,
}

/// One persisted room message in a history response.
#[derive(Debug, Clone, Serialize)]
pub struct RoomMessageDto {
    pub id: String,
    pub from_user: String,
    pub room: String,
    pub message: String,
    pub date_sent: String,
}

impl RoomMessageDto {
    pub fn from_record(record: &GroupMessage) -> Self {
        Self {
            id: record.id.to_string(),
            from_user: record.from_user.as_str().to_string(),
            room: record.room.as_str().to_string(),
            message: record.body.as_str().to_string(),
            date_sent: timestamp_to_jst_rfc3339(record.date_sent.value()),
        }
    }
}

/// One persisted private message in a history response.
#[derive(Debug, Clone, Serialize)]
pub struct PrivateMessageDto {
    pub id: String,
    pub from_user: String,
    pub to_user: String,
    pub message: String,
    pub date_sent: String,
}

impl PrivateMessageDto {
    pub fn from_record(record: &PrivateMessage) -> Self {
        Self {
            id: record.id.to_string(),
            from_user: record.from_user.as_str().to_string(),
            to_user: record.to_user.as_str().to_string(),
            message: record.body.as_str().to_string(),
            date_sent: timestamp_to_jst_rfc3339(record.date_sent.value()),
        }
    }
}

/// `GET /api/messages/room/{room}` response.
#[derive(Debug, Clone, Serialize)]
pub struct RoomMessagesResponse {
    pub messages: Vec<RoomMessageDto>,
}

/// `GET /api/messages/private/{other_user}` response.
#[derive(Debug, Clone, Serialize)]
pub struct PrivateMessagesResponse {
    pub messages: Vec<PrivateMessageDto>,
}
