//! UseCase: ルーム退室処理（`leave-room` intent）

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{ChatState, ConnectionId, RoomName};

/// コネクションを現在参加中のルームから除去するユースケース
pub struct LeaveRoomUseCase {
    state: Arc<Mutex<ChatState>>,
}

impl LeaveRoomUseCase {
    pub fn new(state: Arc<Mutex<ChatState>>) -> Self {
        Self { state }
    }

    /// leave を実行。コネクションの追跡ルームが `room` と一致しない
    /// 場合は黙って棄却（`None`）。成功時は leave 通知のための
    /// 残メンバー一覧を返す
    pub async fn execute(
        &self,
        connection: ConnectionId,
        room: RoomName,
    ) -> Option<Vec<ConnectionId>> {
        let mut state = self.state.lock().await;

        if !state.rooms.leave(&connection, &room) {
            tracing::debug!("Rejected leave for room '{}' (not the tracked room)", room);
            return None;
        }

        Some(state.rooms.members_of(&room))
    }
}
