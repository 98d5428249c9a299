//! UseCase: タイピングインジケータ通知処理（`typing-room` / `typing-private`）
//!
//! typing イベントは永続化されません。即座に fan-out されるか、
//! 棄却されるかのどちらかです。

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{ChatState, ConnectionId, RoomName, Username};

/// タイピング状態イベントの宛先を解決するユースケース
pub struct NotifyTypingUseCase {
    state: Arc<Mutex<ChatState>>,
}

impl NotifyTypingUseCase {
    pub fn new(state: Arc<Mutex<ChatState>>) -> Self {
        Self { state }
    }

    /// ルーム typing イベントの宛先: 送信者を除くルーム内の全コネクション。
    /// 送信者の追跡ルームが `room` と一致しない場合は `None`（silent drop）
    pub async fn room(
        &self,
        connection: ConnectionId,
        room: &RoomName,
    ) -> Option<Vec<ConnectionId>> {
        let state = self.state.lock().await;

        if state.rooms.room_of(&connection) != Some(room) {
            return None;
        }

        Some(
            state
                .rooms
                .members_of(room)
                .into_iter()
                .filter(|conn| *conn != connection)
                .collect(),
        )
    }

    /// プライベート typing イベントの宛先: 対象ユーザーのコネクション。
    /// オフラインの場合は棄却される
    pub async fn private(&self, to_user: &Username) -> Option<ConnectionId> {
        let state = self.state.lock().await;
        state.presence.lookup(to_user)
    }
}
