//! UseCase: プライベートメッセージ送信処理（`send-private-message` intent）

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{
    ChatState, ConnectionId, MessageBody, MessageLog, PrivateMessage, Username,
};

use super::error::SendPrivateMessageError;

/// 永続化されたプライベートメッセージの配送プラン
///
/// レコードは送信者自身のコネクション（echo-to-self）と受信者の
/// コネクションへ、それぞれ登録中の場合にのみ配送されます。双方とも
/// オフラインでもレコードは永続化され、履歴クエリで取得できます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateDelivery {
    pub record: PrivateMessage,
    pub sender_connection: Option<ConnectionId>,
    pub recipient_connection: Option<ConnectionId>,
}

/// プライベートメッセージを永続化し、双方のコネクションを解決するユースケース
pub struct SendPrivateMessageUseCase {
    state: Arc<Mutex<ChatState>>,
    message_log: Arc<dyn MessageLog>,
}

impl SendPrivateMessageUseCase {
    pub fn new(state: Arc<Mutex<ChatState>>, message_log: Arc<dyn MessageLog>) -> Self {
        Self { state, message_log }
    }

    /// 送信を実行
    ///
    /// # Errors
    ///
    /// 追記に失敗した場合は `PersistFailed`。ライブ配送は行われず、
    /// 失敗は送信者に返らない。
    pub async fn execute(
        &self,
        from_user: Username,
        to_user: Username,
        body: MessageBody,
    ) -> Result<PrivateDelivery, SendPrivateMessageError> {
        let record = self
            .message_log
            .append_private(from_user.clone(), to_user.clone(), body)
            .await?;

        // presence は永続化後に解決する。この時点で登録されている側に
        // ライブコピーが届く
        let state = self.state.lock().await;
        Ok(PrivateDelivery {
            record,
            sender_connection: state.presence.lookup(&from_user),
            recipient_connection: state.presence.lookup(&to_user),
        })
    }
}
