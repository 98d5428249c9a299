//! Topic-room chat server over HTTP + WebSocket.
//!
//! Clients sign up and log in over the HTTP API, then exchange room and
//! private messages over `/ws` with live presence and typing indicators.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin idobata-server
//! cargo run --bin idobata-server -- --host 0.0.0.0 --port 3000
//! cargo run --bin idobata-server -- --rooms "general,random"
//! ```

use std::sync::Arc;

use clap::Parser;
use tokio::sync::Mutex;

use idobata_server::{
    domain::{ChatState, RoomName, DEFAULT_ROOMS},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryMessageLog, InMemoryUserDirectory},
    },
    ui::{AppState, Server},
};
use idobata_shared::{
    logger::setup_logger,
    time::SystemClock,
};

#[derive(Parser, Debug)]
#[command(name = "idobata-server")]
#[command(about = "Topic-room chat server with presence and typing indicators", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Comma-separated list of topic rooms to serve
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_ROOMS.iter().map(|r| r.to_string()))]
    rooms: Vec<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let rooms: Vec<RoomName> = args
        .rooms
        .into_iter()
        .filter_map(|room| RoomName::new(room).ok())
        .collect();
    if rooms.is_empty() {
        tracing::error!("No valid rooms configured");
        std::process::exit(1);
    }
    tracing::info!(
        "Serving rooms: {}",
        rooms
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    // Initialize dependencies in order:
    // 1. Clock
    // 2. Collaborators (directory, message log, pusher)
    // 3. Coordinator state
    // 4. AppState (use cases)
    // 5. Server
    let clock = Arc::new(SystemClock);
    let directory = Arc::new(InMemoryUserDirectory::new(clock.clone()));
    let message_log = Arc::new(InMemoryMessageLog::new(clock));
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let chat_state = Arc::new(Mutex::new(ChatState::new(rooms)));

    let app_state = Arc::new(AppState::new(
        chat_state,
        directory,
        message_log,
        message_pusher,
    ));

    let server = Server::new(app_state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
