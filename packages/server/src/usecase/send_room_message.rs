//! UseCase: ルームメッセージ送信処理（`send-room-message` intent）

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{
    ChatState, ConnectionId, GroupMessage, MessageBody, MessageLog, RoomName, Username,
};

use super::error::SendRoomMessageError;

/// ルームメッセージを永続化し、ブロードキャスト対象を選定するユースケース
///
/// 送信者は自分のコネクションが現在参加しているルームにのみ投稿できます。
/// MessageLog が識別子とタイムスタンプを採番し、永続化に成功したレコード
/// だけが、送信者を含むルーム内の全コネクションへブロードキャストされます。
pub struct SendRoomMessageUseCase {
    state: Arc<Mutex<ChatState>>,
    message_log: Arc<dyn MessageLog>,
}

impl SendRoomMessageUseCase {
    pub fn new(state: Arc<Mutex<ChatState>>, message_log: Arc<dyn MessageLog>) -> Self {
        Self { state, message_log }
    }

    /// 送信を実行
    ///
    /// # Errors
    ///
    /// * `NotInRoom` - コネクションの追跡ルームが `room` と異なる。
    ///   intent は永続化もブロードキャストもせず棄却される。
    /// * `PersistFailed` - 追記に失敗。何もブロードキャストされず、
    ///   送信者にエラーは返らない。
    pub async fn execute(
        &self,
        connection: ConnectionId,
        from_user: Username,
        room: RoomName,
        body: MessageBody,
    ) -> Result<(GroupMessage, Vec<ConnectionId>), SendRoomMessageError> {
        {
            let state = self.state.lock().await;
            if state.rooms.room_of(&connection) != Some(&room) {
                return Err(SendRoomMessageError::NotInRoom);
            }
        }

        // 永続化は suspend しうるため、レジストリのロックは跨いで保持しない
        let record = self
            .message_log
            .append_group(from_user, room.clone(), body)
            .await?;

        // メンバーシップは永続化後に読み直す。ブロードキャストは配送時点の
        // ルーム状態を反映する（best-effort、トランザクショナルではない）
        let targets = {
            let state = self.state.lock().await;
            state.rooms.members_of(&room)
        };

        Ok((record, targets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RepositoryError;
    use crate::infrastructure::repository::InMemoryMessageLog;
    use crate::usecase::JoinRoomUseCase;
    use async_trait::async_trait;
    use idobata_shared::time::FixedClock;

    fn username(s: &str) -> Username {
        Username::new(s.to_string()).unwrap()
    }

    fn room(s: &str) -> RoomName {
        RoomName::new(s.to_string()).unwrap()
    }

    fn body(s: &str) -> MessageBody {
        MessageBody::new(s.to_string()).unwrap()
    }

    fn new_state() -> Arc<Mutex<ChatState>> {
        Arc::new(Mutex::new(ChatState::new(vec![
            room("devops"),
            room("sports"),
        ])))
    }

    fn new_log() -> Arc<InMemoryMessageLog> {
        Arc::new(InMemoryMessageLog::new(Arc::new(FixedClock::new(
            1_700_000_000_000,
        ))))
    }

    /// 追記が常に失敗する MessageLog スタブ
    struct FailingMessageLog;

    #[async_trait]
    impl MessageLog for FailingMessageLog {
        async fn append_group(
            &self,
            _from_user: Username,
            _room: RoomName,
            _body: MessageBody,
        ) -> Result<GroupMessage, RepositoryError> {
            Err(RepositoryError::AppendFailed("store down".to_string()))
        }

        async fn append_private(
            &self,
            _from_user: Username,
            _to_user: Username,
            _body: MessageBody,
        ) -> Result<crate::domain::PrivateMessage, RepositoryError> {
            Err(RepositoryError::AppendFailed("store down".to_string()))
        }

        async fn room_history(
            &self,
            _room: &RoomName,
        ) -> Result<Vec<GroupMessage>, RepositoryError> {
            Ok(vec![])
        }

        async fn private_history(
            &self,
            _a: &Username,
            _b: &Username,
        ) -> Result<Vec<crate::domain::PrivateMessage>, RepositoryError> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_send_persists_and_targets_whole_room() {
        // テスト項目: 送信成功時はレコードが永続化され、送信者を含む
        // ルーム全体がブロードキャスト対象になる
        // given (前提条件): alice と bob が devops に参加
        let state = new_state();
        let log = new_log();
        let join = JoinRoomUseCase::new(state.clone());
        let usecase = SendRoomMessageUseCase::new(state.clone(), log.clone());
        let alice_conn = ConnectionId::generate();
        let bob_conn = ConnectionId::generate();
        join.execute(alice_conn, room("devops")).await;
        join.execute(bob_conn, room("devops")).await;

        // when (操作):
        let (record, targets) = usecase
            .execute(alice_conn, username("alice"), room("devops"), body("hello"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(record.from_user, username("alice"));
        assert_eq!(record.room, room("devops"));
        assert_eq!(record.body.as_str(), "hello");
        assert_eq!(targets.len(), 2);
        assert!(targets.contains(&alice_conn));
        assert!(targets.contains(&bob_conn));

        let history = log.room_history(&room("devops")).await.unwrap();
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn test_send_to_room_not_joined_is_dropped() {
        // テスト項目: 参加していないルームへの送信は永続化も
        // ブロードキャストもされない
        let state = new_state();
        let log = new_log();
        let join = JoinRoomUseCase::new(state.clone());
        let usecase = SendRoomMessageUseCase::new(state.clone(), log.clone());
        let conn = ConnectionId::generate();
        join.execute(conn, room("sports")).await;

        let result = usecase
            .execute(conn, username("alice"), room("devops"), body("hello"))
            .await;

        assert_eq!(result.unwrap_err(), SendRoomMessageError::NotInRoom);
        assert!(log.room_history(&room("devops")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persist_failure_skips_broadcast() {
        // テスト項目: 永続化失敗時はブロードキャスト対象が返らない
        let state = new_state();
        let join = JoinRoomUseCase::new(state.clone());
        let usecase = SendRoomMessageUseCase::new(state.clone(), Arc::new(FailingMessageLog));
        let conn = ConnectionId::generate();
        join.execute(conn, room("devops")).await;

        let result = usecase
            .execute(conn, username("alice"), room("devops"), body("hello"))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            SendRoomMessageError::PersistFailed(_)
        ));
    }
}
