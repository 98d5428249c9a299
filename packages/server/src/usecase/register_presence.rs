//! UseCase: presence 登録処理（`register-user` intent）

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{ChatState, ConnectionId, Username};

/// ユーザー名をライブなコネクションに登録するユースケース
///
/// 重複登録は正当な操作です。同一ユーザー名の後からの登録はマッピングを
/// 黙って付け替えます（last-registered-wins）。返されるオンライン集合を
/// ハンドラが全コネクションへブロードキャストします。
pub struct RegisterPresenceUseCase {
    state: Arc<Mutex<ChatState>>,
}

impl RegisterPresenceUseCase {
    pub fn new(state: Arc<Mutex<ChatState>>) -> Self {
        Self { state }
    }

    /// `username` を `connection` に登録し、現在のオンラインユーザー名の
    /// 全集合を昇順ソートで返す
    pub async fn execute(&self, username: Username, connection: ConnectionId) -> Vec<Username> {
        let mut state = self.state.lock().await;
        state.presence.register(username.clone(), connection);
        tracing::debug!("Registered presence for '{}'", username);
        state.presence.online_usernames()
    }
}
