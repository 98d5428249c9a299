//! ドメインモデルの Value Object
//!
//! Value Object はドメイン内の値を表す不変オブジェクトです。
//! 同一性ではなく値によって比較されます。

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

/// ユーザー名の最大長
const USERNAME_MAX_LEN: usize = 100;

/// ルーム名の最大長
const ROOM_NAME_MAX_LEN: usize = 100;

/// メッセージ本文の最大長
const MESSAGE_BODY_MAX_LEN: usize = 2000;

/// ユーザー名の Value Object
///
/// ユーザーディレクトリのアカウントと presence エントリを識別します。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// 新しい Username を作成
    ///
    /// # Errors
    ///
    /// 空文字列、または 100 文字を超える場合はエラーを返します。
    pub fn new(username: String) -> Result<Self, ValueObjectError> {
        if username.is_empty() {
            return Err(ValueObjectError::UsernameEmpty);
        }
        let len = username.chars().count();
        if len > USERNAME_MAX_LEN {
            return Err(ValueObjectError::UsernameTooLong {
                max: USERNAME_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(username))
    }

    /// 内部の文字列値を取得
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権付きの String へ変換
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ルーム名の Value Object
///
/// 静的に設定されたトピックルームの 1 つを指します。`RoomName` を構築
/// できることはルームの存在を意味しません（存在判定は RoomTracker の責務）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomName(String);

impl RoomName {
    /// 新しい RoomName を作成
    ///
    /// # Errors
    ///
    /// 空文字列、または 100 文字を超える場合はエラーを返します。
    pub fn new(room: String) -> Result<Self, ValueObjectError> {
        if room.is_empty() {
            return Err(ValueObjectError::RoomNameEmpty);
        }
        let len = room.chars().count();
        if len > ROOM_NAME_MAX_LEN {
            return Err(ValueObjectError::RoomNameTooLong {
                max: ROOM_NAME_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(room))
    }

    /// 内部の文字列値を取得
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権付きの String へ変換
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// メッセージ本文の Value Object
///
/// 構築時に前後の空白を取り除きます。trim 後の本文は非空かつ
/// 2000 文字以内でなければなりません。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody(String);

impl MessageBody {
    /// 生の入力から新しい MessageBody を作成
    ///
    /// # Errors
    ///
    /// trim 後に空、または 2000 文字を超える場合はエラーを返します。
    pub fn new(body: String) -> Result<Self, ValueObjectError> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::MessageBodyEmpty);
        }
        let len = trimmed.chars().count();
        if len > MESSAGE_BODY_MAX_LEN {
            return Err(ValueObjectError::MessageBodyTooLong {
                max: MESSAGE_BODY_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// 内部の文字列値を取得
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権付きの String へ変換
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MessageBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// タイムスタンプの Value Object
///
/// Unix タイムスタンプ（JST、ミリ秒）を表します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// 新しい Timestamp を作成
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// 内部の i64 値を取得
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
