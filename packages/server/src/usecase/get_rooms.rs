//! UseCase: 設定済みルーム一覧処理

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{ChatState, RoomName};

/// サーバーに設定されたルームセットを設定順で返すユースケース
pub struct GetRoomsUseCase {
    state: Arc<Mutex<ChatState>>,
}

impl GetRoomsUseCase {
    pub fn new(state: Arc<Mutex<ChatState>>) -> Self {
        Self { state }
    }

    pub async fn execute(&self) -> Vec<RoomName> {
        let state = self.state.lock().await;
        state.rooms.configured_rooms().to_vec()
    }
}
