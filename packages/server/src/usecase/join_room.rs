//! UseCase: ルーム参加処理（`join-room` intent）

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{ChatState, ConnectionId, JoinTransition, RoomName};

/// 受理された join が生む fan-out
///
/// ルーム切り替えの場合、旧ルームの残メンバーへの leave 通知 1 回と、
/// 参加者本人を含む新ルームへの join 通知 1 回をちょうど生みます。
/// 参加中ルームへの再 join は冪等で、どちらの通知も生みません。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// ルーム切り替え時の旧ルームとその残メンバー
    pub left: Option<(RoomName, Vec<ConnectionId>)>,
    /// メンバーシップ変更時の新ルームとそのメンバー（参加者本人を含む）
    pub joined: Option<(RoomName, Vec<ConnectionId>)>,
}

/// コネクションを設定済みルームのいずれかへ移動するユースケース
pub struct JoinRoomUseCase {
    state: Arc<Mutex<ChatState>>,
}

impl JoinRoomUseCase {
    pub fn new(state: Arc<Mutex<ChatState>>) -> Self {
        Self { state }
    }

    /// join を実行。ルームが設定済みセットに含まれない場合は
    /// `None`（silent drop）を返す
    pub async fn execute(&self, connection: ConnectionId, room: RoomName) -> Option<JoinOutcome> {
        let mut state = self.state.lock().await;

        if !state.rooms.is_configured(&room) {
            tracing::debug!("Rejected join to unconfigured room '{}'", room);
            return None;
        }

        match state.rooms.join(connection, room.clone()) {
            JoinTransition::Unchanged => Some(JoinOutcome {
                left: None,
                joined: None,
            }),
            JoinTransition::Entered => Some(JoinOutcome {
                left: None,
                joined: Some((room.clone(), state.rooms.members_of(&room))),
            }),
            JoinTransition::Switched(old_room) => {
                let remaining = state.rooms.members_of(&old_room);
                Some(JoinOutcome {
                    left: Some((old_room, remaining)),
                    joined: Some((room.clone(), state.rooms.members_of(&room))),
                })
            }
        }
    }
}
