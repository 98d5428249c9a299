//! InMemory MessageLog 実装
//!
//! 追記専用の Vec をインメモリ DB として使用します。挿入順がそのまま
//! タイムスタンプ同値時のタイブレークになります。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    GroupMessage, MessageBody, MessageId, MessageLog, PrivateMessage, RepositoryError, RoomName,
    Timestamp, Username,
};
use idobata_shared::time::Clock;

/// Append-only in-memory message log.
///
/// Appends assign the id and the send timestamp from the injected clock.
/// History queries sort stably by `date_sent`, so records sharing a
/// timestamp keep their insertion order.
pub struct InMemoryMessageLog {
    group: Mutex<Vec<GroupMessage>>,
    private: Mutex<Vec<PrivateMessage>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryMessageLog {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            group: Mutex::new(Vec::new()),
            private: Mutex::new(Vec::new()),
            clock,
        }
    }
}

#[async_trait]
impl MessageLog for InMemoryMessageLog {
    async fn append_group(
        &self,
        from_user: Username,
        room: RoomName,
        body: MessageBody,
    ) -> Result<GroupMessage, RepositoryError> {
        let record = GroupMessage {
            id: MessageId::generate(),
            from_user,
            room,
            body,
            date_sent: Timestamp::new(self.clock.now_jst_millis()),
        };
        let mut group = self.group.lock().await;
        group.push(record.clone());
        Ok(record)
    }

    async fn append_private(
        &self,
        from_user: Username,
        to_user: Username,
        body: MessageBody,
    ) -> Result<PrivateMessage, RepositoryError> {
        let record = PrivateMessage {
            id: MessageId::generate(),
            from_user,
            to_user,
            body,
            date_sent: Timestamp::new(self.clock.now_jst_millis()),
        };
        let mut private = self.private.lock().await;
        private.push(record.clone());
        Ok(record)
    }

    async fn room_history(&self, room: &RoomName) -> Result<Vec<GroupMessage>, RepositoryError> {
        let group = self.group.lock().await;
        let mut messages: Vec<GroupMessage> = group
            .iter()
            .filter(|msg| msg.room == *room)
            .cloned()
            .collect();
        messages.sort_by_key(|msg| msg.date_sent);
        Ok(messages)
    }

    async fn private_history(
        &self,
        a: &Username,
        b: &Username,
    ) -> Result<Vec<PrivateMessage>, RepositoryError> {
        let private = self.private.lock().await;
        let mut messages: Vec<PrivateMessage> = private
            .iter()
            .filter(|msg| msg.is_between(a, b))
            .cloned()
            .collect();
        messages.sort_by_key(|msg| msg.date_sent);
        Ok(messages)
    }
}
