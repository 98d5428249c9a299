//! UseCase: メッセージ履歴取得処理
//!
//! どちらも MessageLog への read-through です。順序は MessageLog の契約
//! （送信タイムスタンプ昇順、同値は挿入順）に従います。

use std::sync::Arc;

use crate::domain::{
    GroupMessage, MessageLog, PrivateMessage, RepositoryError, RoomName, Username,
};

/// ルームの全メッセージを取得するユースケース
pub struct GetRoomHistoryUseCase {
    message_log: Arc<dyn MessageLog>,
}

impl GetRoomHistoryUseCase {
    pub fn new(message_log: Arc<dyn MessageLog>) -> Self {
        Self { message_log }
    }

    pub async fn execute(&self, room: &RoomName) -> Result<Vec<GroupMessage>, RepositoryError> {
        self.message_log.room_history(room).await
    }
}

/// 2 ユーザー間の会話を方向を区別せず取得するユースケース
pub struct GetPrivateHistoryUseCase {
    message_log: Arc<dyn MessageLog>,
}

impl GetPrivateHistoryUseCase {
    pub fn new(message_log: Arc<dyn MessageLog>) -> Self {
        Self { message_log }
    }

    pub async fn execute(
        &self,
        a: &Username,
        b: &Username,
    ) -> Result<Vec<PrivateMessage>, RepositoryError> {
        self.message_log.private_history(a, b).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageBody;
    use crate::infrastructure::repository::InMemoryMessageLog;
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

    #[tokio::test]
    async fn test_private_history_matches_unordered_pair() {
        // テスト項目: 履歴はユーザーの組で引け、方向は区別されない
        let log = Arc::new(InMemoryMessageLog::new(Arc::new(FixedClock::new(0))));
        log.append_private(username("alice"), username("bob"), body("one"))
            .await
            .unwrap();
        log.append_private(username("bob"), username("alice"), body("two"))
            .await
            .unwrap();
        log.append_private(username("alice"), username("carol"), body("other"))
            .await
            .unwrap();
        let usecase = GetPrivateHistoryUseCase::new(log);

        let history = usecase
            .execute(&username("bob"), &username("alice"))
            .await
            .unwrap();

        let bodies: Vec<&str> = history.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_room_history_filters_by_room() {
        // テスト項目: ルーム履歴は該当ルームのみを到着順で返す
        let log = Arc::new(InMemoryMessageLog::new(Arc::new(FixedClock::new(0))));
        log.append_group(username("alice"), room("devops"), body("first"))
            .await
            .unwrap();
        log.append_group(username("bob"), room("sports"), body("elsewhere"))
            .await
            .unwrap();
        log.append_group(username("bob"), room("devops"), body("second"))
            .await
            .unwrap();
        let usecase = GetRoomHistoryUseCase::new(log);

        let history = usecase.execute(&room("devops")).await.unwrap();

        let bodies: Vec<&str> = history.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["first", "second"]);
    }
}
