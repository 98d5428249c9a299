//! ドメイン層
//!
//! Value Object・エンティティ・presence / ルームメンバーシップの中核と、
//! UseCase 層が依存するインターフェース（trait）を定義します。

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod presence;
pub mod repository;
pub mod value_object;

pub use entity::{GroupMessage, MessageId, NewUser, PrivateMessage, UserRecord};
pub use error::{DirectoryError, MessagePushError, RepositoryError, ValueObjectError};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use presence::{
    ChatState, ConnectionId, JoinTransition, PresenceRegistry, RoomTracker, DEFAULT_ROOMS,
};
pub use repository::{MessageLog, UserDirectory};
pub use value_object::{MessageBody, RoomName, Timestamp, Username};
