//! InMemory repository 実装
//!
//! tokio の Mutex で保護した `HashMap`／`Vec` を背後に持ちます。

pub mod message_log;
pub mod user;

pub use message_log::InMemoryMessageLog;
pub use user::InMemoryUserDirectory;
