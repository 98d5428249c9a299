//! HTTP and WebSocket handlers.

pub mod http;
pub mod websocket;

pub use http::{
    get_private_messages, get_room_messages, get_rooms, get_users, health_check, login, signup,
};
pub use websocket::websocket_handler;
