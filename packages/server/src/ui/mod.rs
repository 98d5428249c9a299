//! UI 層: Axum による HTTP / WebSocket サーフェス

pub mod handler;
pub mod server;
pub mod signal;
pub mod state;

pub use server::{app, Server};
pub use state::AppState;
