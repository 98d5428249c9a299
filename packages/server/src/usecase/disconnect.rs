//! UseCase: コネクション切断処理

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{ChatState, ConnectionId, RoomName, Username};

/// クローズされたコネクションのクリーンアップ fan-out
///
/// コネクションがユーザー名を一度も登録していなかった場合、メンバーシップの
/// 掃除以外のフィールドは全て空になり、ハンドラは何も送出しません。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisconnectOutcome {
    /// レジストリが解放したユーザー名（コネクションが登録済みだった場合）
    pub freed_username: Option<Username>,
    /// 更新後のオンライン集合（ソート済み）。ユーザー名が解放された場合のみ有効
    pub online: Vec<Username>,
    /// "disconnected." 通知のための、所属していたルームとその残メンバー
    pub room_notice: Option<(RoomName, Vec<ConnectionId>)>,
}

/// 切断するコネクションのレジストリとメンバーシップを掃除するユースケース
pub struct DisconnectUseCase {
    state: Arc<Mutex<ChatState>>,
}

impl DisconnectUseCase {
    pub fn new(state: Arc<Mutex<ChatState>>) -> Self {
        Self { state }
    }

    /// クリーンアップを実行。メンバーシップは無条件に除去し、presence の
    /// 掃除はセカンダリインデックス経由で所有ユーザー名を解決する
    pub async fn execute(&self, connection: ConnectionId) -> DisconnectOutcome {
        let mut state = self.state.lock().await;

        let former_room = state.rooms.remove(&connection);
        let freed_username = state.presence.unregister_by_connection(&connection);

        // 未登録のコネクションは、ルームに参加していても黙って去る
        if freed_username.is_none() {
            return DisconnectOutcome {
                freed_username: None,
                online: Vec::new(),
                room_notice: None,
            };
        }

        let online = state.presence.online_usernames();
        let room_notice =
            former_room.map(|room| (room.clone(), state.rooms.members_of(&room)));

        DisconnectOutcome {
            freed_username,
            online,
            room_notice,
        }
    }
}
