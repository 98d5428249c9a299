//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - コネクションごとの `UnboundedSender` を管理
//! - コネクションへのメッセージ送信（push_to, broadcast, broadcast_all）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に
//! 使用します。チャンネルはソケット確立と同時に登録されるため、
//! presence 未登録のコネクションにも全体ブロードキャストが届きます。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// WebSocket-backed MessagePusher keyed by connection id.
pub struct WebSocketMessagePusher {
    connections: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_connection(&self, connection: ConnectionId, sender: PusherChannel) {
        let mut connections = self.connections.lock().await;
        connections.insert(connection, sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", connection);
    }

    async fn unregister_connection(&self, connection: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        connections.remove(connection);
        tracing::debug!("Connection '{}' unregistered from MessagePusher", connection);
    }

    async fn push_to(
        &self,
        connection: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let connections = self.connections.lock().await;

        if let Some(sender) = connections.get(connection) {
            sender
                .send(content.to_string())
                .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed message to connection '{}'", connection);
            Ok(())
        } else {
            Err(MessagePushError::ConnectionNotFound(connection.to_string()))
        }
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let connections = self.connections.lock().await;

        for target in targets {
            if let Some(sender) = connections.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                if let Err(e) = sender.send(content.to_string()) {
                    tracing::warn!("Failed to push message to connection '{}': {}", target, e);
                } else {
                    tracing::debug!("Broadcasted message to connection '{}'", target);
                }
            } else {
                tracing::warn!("Connection '{}' not found during broadcast, skipping", target);
            }
        }

        Ok(())
    }

    async fn broadcast_all(&self, content: &str) -> Result<(), MessagePushError> {
        let connections = self.connections.lock().await;

        for (connection, sender) in connections.iter() {
            if let Err(e) = sender.send(content.to_string()) {
                tracing::warn!(
                    "Failed to push message to connection '{}': {}",
                    connection,
                    e
                );
            }
        }

        Ok(())
    }
}
