//! WebSocket connection handlers.
//!
//! One socket per client. A `ConnectionId` is minted at upgrade time and the
//! outbound channel is registered with the pusher immediately, so the
//! connection receives global broadcasts before (and without) any
//! `register-user` intent. Inbound frames are parsed into the closed
//! [`ClientEvent`] enum and dispatched exhaustively; invalid or unparseable
//! intents are dropped with a log line, never answered with an error event.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, MessageBody, RoomName, Username},
    infrastructure::dto::websocket::{ClientEvent, ServerEvent},
    ui::state::AppState,
};
use idobata_shared::time::get_jst_timestamp;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them
/// to the WebSocket sender.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection = ConnectionId::generate();
    let (sender, mut receiver) = socket.split();

    // Register the outbound channel before any intent is processed.
    let (tx, rx) = mpsc::unbounded_channel();
    state
        .message_pusher
        .register_connection(connection, tx)
        .await;
    tracing::info!("Connection '{}' established", connection);

    let mut send_task = pusher_loop(rx, sender);

    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", connection, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let event = match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!("Dropping unparseable frame: {}", e);
                            continue;
                        }
                    };
                    dispatch(&state_clone, connection, event).await;
                }
                Message::Ping(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                    tracing::debug!("Received ping");
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    handle_disconnect(&state, connection).await;
}

/// Route one parsed intent to its use case and perform the fan-out.
async fn dispatch(state: &Arc<AppState>, connection: ConnectionId, event: ClientEvent) {
    match event {
        ClientEvent::RegisterUser { username } => {
            let Ok(username) = Username::new(username) else {
                tracing::debug!("Dropping register-user with invalid username");
                return;
            };

            let online = state
                .register_presence_usecase
                .execute(username, connection)
                .await;
            broadcast_online_users(state, online).await;
        }

        ClientEvent::JoinRoom { username, room } => {
            let (Ok(username), Ok(room)) = (Username::new(username), RoomName::new(room)) else {
                tracing::debug!("Dropping join-room with invalid fields");
                return;
            };

            let Some(outcome) = state.join_room_usecase.execute(connection, room).await else {
                return;
            };

            if let Some((old_room, remaining)) = outcome.left {
                send_system_notice(
                    state,
                    &old_room,
                    format!("{} left the room.", username),
                    remaining,
                )
                .await;
            }
            if let Some((new_room, members)) = outcome.joined {
                send_system_notice(
                    state,
                    &new_room,
                    format!("{} joined the room.", username),
                    members,
                )
                .await;
            }
        }

        ClientEvent::LeaveRoom { username, room } => {
            let Ok(room) = RoomName::new(room) else {
                tracing::debug!("Dropping leave-room with invalid room");
                return;
            };

            let Some(remaining) = state
                .leave_room_usecase
                .execute(connection, room.clone())
                .await
            else {
                return;
            };

            let label = username
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "A user".to_string());
            send_system_notice(state, &room, format!("{} left the room.", label), remaining)
                .await;
        }

        ClientEvent::SendRoomMessage {
            from_user,
            room,
            message,
        } => {
            let (Ok(from_user), Ok(room), Ok(body)) = (
                Username::new(from_user),
                RoomName::new(room),
                MessageBody::new(message),
            ) else {
                tracing::debug!("Dropping send-room-message with invalid fields");
                return;
            };

            match state
                .send_room_message_usecase
                .execute(connection, from_user, room, body)
                .await
            {
                Ok((record, targets)) => {
                    broadcast_event(state, targets, &ServerEvent::from_group_message(&record))
                        .await;
                }
                Err(crate::usecase::SendRoomMessageError::NotInRoom) => {
                    tracing::debug!("Dropping room message from a non-member");
                }
                Err(crate::usecase::SendRoomMessageError::PersistFailed(e)) => {
                    // Fire-and-forget: the sender is not told. The broadcast
                    // is skipped so no unpersisted message is ever delivered.
                    tracing::warn!("Room message persistence failed, dropping: {}", e);
                }
            }
        }

        ClientEvent::TypingRoom {
            username,
            room,
            is_typing,
        } => {
            if username.is_empty() {
                return;
            }
            let Ok(room) = RoomName::new(room) else {
                return;
            };

            let Some(targets) = state.notify_typing_usecase.room(connection, &room).await
            else {
                return;
            };

            let event = ServerEvent::TypingRoom {
                username,
                room: room.into_string(),
                is_typing,
            };
            broadcast_event(state, targets, &event).await;
        }

        ClientEvent::SendPrivateMessage {
            from_user,
            to_user,
            message,
        } => {
            let (Ok(from_user), Ok(to_user), Ok(body)) = (
                Username::new(from_user),
                Username::new(to_user),
                MessageBody::new(message),
            ) else {
                tracing::debug!("Dropping send-private-message with invalid fields");
                return;
            };

            match state
                .send_private_message_usecase
                .execute(from_user, to_user, body)
                .await
            {
                Ok(delivery) => {
                    let event = ServerEvent::from_private_message(&delivery.record);
                    // Echo-to-self plus recipient, each only if registered.
                    if let Some(conn) = delivery.sender_connection {
                        push_event(state, &conn, &event).await;
                    }
                    if let Some(conn) = delivery.recipient_connection {
                        push_event(state, &conn, &event).await;
                    }
                }
                Err(e) => {
                    tracing::warn!("Private message persistence failed, dropping: {}", e);
                }
            }
        }

        ClientEvent::TypingPrivate {
            from_user,
            to_user,
            is_typing,
        } => {
            if from_user.is_empty() {
                return;
            }
            let Ok(to_username) = Username::new(to_user.clone()) else {
                return;
            };

            let Some(target) = state.notify_typing_usecase.private(&to_username).await else {
                return;
            };

            let event = ServerEvent::TypingPrivate {
                from_user,
                to_user,
                is_typing,
            };
            push_event(state, &target, &event).await;
        }
    }
}

/// Registry cleanup and best-effort notices for a closed connection.
async fn handle_disconnect(state: &Arc<AppState>, connection: ConnectionId) {
    let outcome = state.disconnect_usecase.execute(connection).await;
    state.message_pusher.unregister_connection(&connection).await;

    let Some(username) = outcome.freed_username else {
        tracing::info!("Connection '{}' closed (never registered)", connection);
        return;
    };
    tracing::info!("Connection '{}' closed, freed '{}'", connection, username);

    broadcast_online_users(state, outcome.online).await;

    if let Some((room, remaining)) = outcome.room_notice {
        send_system_notice(
            state,
            &room,
            format!("{} disconnected.", username),
            remaining,
        )
        .await;
    }
}

fn encode(event: &ServerEvent) -> String {
    serde_json::to_string(event).expect("ServerEvent serialization cannot fail")
}

async fn broadcast_online_users(state: &Arc<AppState>, online: Vec<Username>) {
    let event = ServerEvent::OnlineUsers {
        users: online.into_iter().map(Username::into_string).collect(),
    };
    if let Err(e) = state.message_pusher.broadcast_all(&encode(&event)).await {
        tracing::warn!("Failed to broadcast online-users: {}", e);
    }
}

async fn send_system_notice(
    state: &Arc<AppState>,
    room: &RoomName,
    message: String,
    targets: Vec<ConnectionId>,
) {
    let event = ServerEvent::system_notice(room.as_str(), message, get_jst_timestamp());
    broadcast_event(state, targets, &event).await;
}

async fn broadcast_event(state: &Arc<AppState>, targets: Vec<ConnectionId>, event: &ServerEvent) {
    if let Err(e) = state.message_pusher.broadcast(targets, &encode(event)).await {
        tracing::warn!("Failed to broadcast event: {}", e);
    }
}

async fn push_event(state: &Arc<AppState>, connection: &ConnectionId, event: &ServerEvent) {
    if let Err(e) = state.message_pusher.push_to(connection, &encode(event)).await {
        tracing::warn!("Failed to push event to '{}': {}", connection, e);
    }
}
