//! Repository trait 定義
//!
//! ユーザーディレクトリと MessageLog はコーディネータから見た外部
//! コラボレータです。ドメイン層がインターフェースを定義し、具体的な
//! 実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    entity::{GroupMessage, NewUser, PrivateMessage, UserRecord},
    error::{DirectoryError, RepositoryError},
    value_object::{MessageBody, RoomName, Username},
};

/// アカウントレコードのストア
///
/// 検索・一覧・作成のクエリに応答します。資格情報の検証はこの層では
/// 単純なレコード照合です。
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// アカウントを作成。ユーザー名が登録済みの場合は
    /// `DirectoryError::UsernameTaken` で失敗します。
    async fn create(&self, user: NewUser) -> Result<UserRecord, DirectoryError>;

    /// ユーザー名とパスワードの両方に一致するアカウントを検索
    async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, DirectoryError>;

    /// `exclude` を除く全アカウントをユーザー名昇順で一覧
    async fn list_except(&self, exclude: Option<&str>) -> Result<Vec<UserRecord>, DirectoryError>;
}

/// ルームメッセージとプライベートメッセージの追記専用ストア
///
/// 追記時にメッセージの識別子と送信タイムスタンプを採番します。
/// 履歴クエリは送信タイムスタンプ昇順で返し、同値は挿入順で
/// タイブレークします。
#[async_trait]
pub trait MessageLog: Send + Sync {
    /// ルームメッセージを永続化（id とタイムスタンプを採番）
    async fn append_group(
        &self,
        from_user: Username,
        room: RoomName,
        body: MessageBody,
    ) -> Result<GroupMessage, RepositoryError>;

    /// プライベートメッセージを永続化（id とタイムスタンプを採番）
    async fn append_private(
        &self,
        from_user: Username,
        to_user: Username,
        body: MessageBody,
    ) -> Result<PrivateMessage, RepositoryError>;

    /// `room` の全メッセージを送信順で取得
    async fn room_history(&self, room: &RoomName) -> Result<Vec<GroupMessage>, RepositoryError>;

    /// `a` と `b` の間の全メッセージ（双方向）を送信順で取得
    async fn private_history(
        &self,
        a: &Username,
        b: &Username,
    ) -> Result<Vec<PrivateMessage>, RepositoryError>;
}
