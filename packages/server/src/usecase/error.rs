//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{DirectoryError, RepositoryError};

/// ルームメッセージ送信経路のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendRoomMessageError {
    /// 送信者の所属ルームが対象ルームと一致しない。
    /// intent を silent drop して処理します。
    #[error("Sender is not joined to the target room")]
    NotInRoom,

    /// MessageLog への追記に失敗。ブロードキャストはスキップされ、
    /// 送信者にはエラーを返しません。ポリシーを可視化・テスト可能に
    /// するためのバリアントです。
    #[error("Failed to persist room message: {0}")]
    PersistFailed(#[from] RepositoryError),
}

/// プライベートメッセージ送信経路のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendPrivateMessageError {
    /// MessageLog への追記に失敗。ライブ配送は行いません。
    #[error("Failed to persist private message: {0}")]
    PersistFailed(#[from] RepositoryError),
}

/// アカウント作成のエラー（fire-and-forget のイベント intent と異なり、
/// リクエスト／レスポンス経路で呼び出し元に返します）
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignupError {
    /// 必須フィールドの欠落
    #[error("All fields are required")]
    MissingFields,

    /// ユーザー名が登録済み
    #[error("Username already exists")]
    UsernameTaken,

    /// ディレクトリストア障害
    #[error("Directory error: {0}")]
    Directory(DirectoryError),
}

impl From<DirectoryError> for SignupError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::UsernameTaken(_) => SignupError::UsernameTaken,
            DirectoryError::MissingField => SignupError::MissingFields,
            other => SignupError::Directory(other),
        }
    }
}
