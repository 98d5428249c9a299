//! サーバー実行ロジック

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        get_private_messages, get_room_messages, get_rooms, get_users, health_check, login,
        signup, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// 共有状態の上にアプリケーションルーターを構築
///
/// 統合テストが同じルーティングを ephemeral ポートで起動できるよう、
/// [`Server`] とは別に公開しています。
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/api/health", get(health_check))
        .route("/api/rooms", get(get_rooms))
        .route("/api/signup", post(signup))
        .route("/api/login", post(login))
        .route("/api/users", get(get_users))
        .route("/api/messages/room/{room}", get(get_room_messages))
        .route("/api/messages/private/{other_user}", get(get_private_messages))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// トピックルーム型チャットサーバー
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// シャットダウンまでチャットサーバーを実行
    ///
    /// # Errors
    ///
    /// 指定アドレスへのバインドに失敗した場合、またはサーバー実行中に
    /// エラーが発生した場合にエラーを返します。
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = app(self.state);

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
