//! チャットアプリケーションの中核ドメインモデル

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::value_object::{MessageBody, RoomName, Timestamp, Username};

/// メッセージ識別子。MessageLog が追記時に採番します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    /// 新しいメッセージ識別子を生成
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ユーザーディレクトリが保持するアカウントレコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub password: String,
    /// アカウント作成時のタイムスタンプ
    pub created_on: Timestamp,
}

/// アカウント作成の入力。全フィールド必須（非空）で、ユーザー名の
/// 一意性はディレクトリ側が強制します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub password: String,
}

impl NewUser {
    /// 必須フィールドが全て揃っているか
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty()
            && !self.firstname.is_empty()
            && !self.lastname.is_empty()
            && !self.password.is_empty()
    }
}

/// 永続化されたルームメッセージ。不変・追記専用。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMessage {
    pub id: MessageId,
    pub from_user: Username,
    pub room: RoomName,
    pub body: MessageBody,
    /// MessageLog が永続化時に採番
    pub date_sent: Timestamp,
}

/// 永続化されたプライベート（1:1）メッセージ。不変・追記専用。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateMessage {
    pub id: MessageId,
    pub from_user: Username,
    pub to_user: Username,
    pub body: MessageBody,
    /// MessageLog が永続化時に採番
    pub date_sent: Timestamp,
}

impl PrivateMessage {
    /// このメッセージが `a` と `b` の会話に属するか（方向は区別しない）
    pub fn is_between(&self, a: &Username, b: &Username) -> bool {
        (self.from_user == *a && self.to_user == *b)
            || (self.from_user == *b && self.to_user == *a)
    }
}
