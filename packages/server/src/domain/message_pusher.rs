//! MessagePusher trait 定義
//!
//! ライブなコネクションへのアウトバウンド配送の抽象化。

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use super::{error::MessagePushError, presence::ConnectionId};

/// シリアライズ済みイベントをコネクションのソケットタスクへ送るチャンネル
pub type PusherChannel = UnboundedSender<String>;

/// アウトバウンド配送の抽象化
///
/// コネクションはソケット確立と同時に（presence 登録より前に）登録される
/// ため、`register-user` を送っていないクライアントにも全体ブロードキャスト
/// （オンラインユーザー一覧）が届きます。
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 確立直後のコネクションのアウトバウンドチャンネルを登録
    async fn register_connection(&self, connection: ConnectionId, sender: PusherChannel);

    /// クローズされたコネクションのチャンネルを登録解除
    async fn unregister_connection(&self, connection: &ConnectionId);

    /// 1 つのコネクションへ配送
    async fn push_to(
        &self,
        connection: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// 各対象へ配送（対象ごとの失敗は許容）
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// ライブな全コネクションへ配送
    async fn broadcast_all(&self, content: &str) -> Result<(), MessagePushError>;
}
