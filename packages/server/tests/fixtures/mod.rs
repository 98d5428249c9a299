//! Shared fixtures for integration tests: an in-process server on an
//! ephemeral port and a small WebSocket client wrapper.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::{
    connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream,
};

use idobata_server::{
    domain::{ChatState, RoomName},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryMessageLog, InMemoryUserDirectory},
    },
    ui::{app, AppState},
};
use idobata_shared::time::SystemClock;

/// In-process server bound to an ephemeral port.
pub struct TestServer {
    addr: SocketAddr,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a server with the default room set.
    pub async fn start() -> Self {
        Self::start_with_rooms(&["devops", "cloud computing", "covid19", "sports", "nodeJS"])
            .await
    }

    /// Start a server with a custom room set.
    pub async fn start_with_rooms(rooms: &[&str]) -> Self {
        let rooms: Vec<RoomName> = rooms
            .iter()
            .map(|room| RoomName::new(room.to_string()).expect("valid room name"))
            .collect();

        let clock = Arc::new(SystemClock);
        let directory = Arc::new(InMemoryUserDirectory::new(clock.clone()));
        let message_log = Arc::new(InMemoryMessageLog::new(clock));
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let chat_state = Arc::new(Mutex::new(ChatState::new(rooms)));

        let state = Arc::new(AppState::new(
            chat_state,
            directory,
            message_log,
            message_pusher,
        ));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        let router = app(state);
        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Test server error");
        });

        TestServer { addr, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Thin WebSocket client over tokio-tungstenite.
pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    pub async fn connect(url: &str) -> Self {
        let (stream, _) = connect_async(url).await.expect("Failed to connect");
        WsClient { stream }
    }

    /// Send one intent as a JSON text frame.
    pub async fn send_json(&mut self, value: serde_json::Value) {
        self.stream
            .send(Message::Text(value.to_string().into()))
            .await
            .expect("Failed to send frame");
    }

    /// Receive the next text frame as JSON, failing after a short timeout.
    pub async fn recv_json(&mut self) -> serde_json::Value {
        let deadline = Duration::from_secs(2);
        loop {
            let msg = tokio::time::timeout(deadline, self.stream.next())
                .await
                .expect("Timed out waiting for a frame")
                .expect("Stream closed")
                .expect("WebSocket error");
            if let Message::Text(text) = msg {
                return serde_json::from_str(&text).expect("Frame is not valid JSON");
            }
        }
    }

    /// Receive the next event and assert its `event` tag.
    pub async fn expect_event(&mut self, event: &str) -> serde_json::Value {
        let value = self.recv_json().await;
        assert_eq!(value["event"], event, "unexpected event: {value}");
        value
    }

    /// Assert that no frame arrives within a short window.
    pub async fn expect_silence(&mut self) {
        let result =
            tokio::time::timeout(Duration::from_millis(300), self.stream.next()).await;
        assert!(result.is_err(), "expected no frame, got {:?}", result);
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}
