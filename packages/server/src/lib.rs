//! Idobata chat server library.
//!
//! A topic-room chat server: clients authenticate over HTTP, then exchange
//! room and private messages over a WebSocket connection with live presence
//! and typing indicators. Layered architecture: `domain` holds the presence
//! and room-membership core plus collaborator traits, `usecase` implements
//! the event routing, `infrastructure` provides in-memory collaborators and
//! wire DTOs, `ui` exposes the Axum surface.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
