//! ドメイン層のエラー定義

use thiserror::Error;

/// Value Object のバリデーションエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ユーザー名が空
    #[error("Username cannot be empty")]
    UsernameEmpty,

    /// ユーザー名が長すぎる
    #[error("Username cannot exceed {max} characters (got {actual})")]
    UsernameTooLong { max: usize, actual: usize },

    /// ルーム名が空
    #[error("RoomName cannot be empty")]
    RoomNameEmpty,

    /// ルーム名が長すぎる
    #[error("RoomName cannot exceed {max} characters (got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },

    /// メッセージ本文が空（trim 後）
    #[error("MessageBody cannot be empty")]
    MessageBodyEmpty,

    /// メッセージ本文が長すぎる
    #[error("MessageBody cannot exceed {max} characters (got {actual})")]
    MessageBodyTooLong { max: usize, actual: usize },
}

/// ユーザーディレクトリが返すエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// ユーザー名の一意性違反（リクエスト／レスポンス経路で呼び出し元に返る）
    #[error("Username '{0}' already exists")]
    UsernameTaken(String),

    /// 必須フィールドが空
    #[error("All fields are required")]
    MissingField,

    /// ストア障害
    #[error("Directory store error: {0}")]
    Store(String),
}

/// MessageLog が返すエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// メッセージの追記に失敗
    #[error("Failed to append message: {0}")]
    AppendFailed(String),

    /// 履歴クエリに失敗
    #[error("Failed to query messages: {0}")]
    QueryFailed(String),
}

/// コネクションへのメッセージ送信エラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessagePushError {
    /// 対象コネクションが未登録
    #[error("Connection '{0}' not found")]
    ConnectionNotFound(String),

    /// チャンネルが送信を拒否した
    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
