//! Shared utilities for the idobata chat application.
//!
//! Cross-cutting concerns used by the server and by integration tests:
//! time handling (millisecond timestamps, RFC 3339 rendering, clock
//! abstraction) and logger setup.

pub mod logger;
pub mod time;
