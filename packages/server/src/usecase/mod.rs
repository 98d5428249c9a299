//! UseCase 層: インバウンド intent ごとに 1 つのハンドラ
//!
//! 各 UseCase は共有の [`crate::domain::ChatState`] を単一ロック下で更新し、
//! 必要なコラボレータと連携した上で、UI 層が行うべき fan-out を表す型付き
//! の結果を返します。silent-drop のセマンティクスは、WebSocket ハンドラが
//! 網羅的に match する `Option`／エラーバリアントとして表現します。

pub mod disconnect;
pub mod error;
pub mod get_rooms;
pub mod history;
pub mod join_room;
pub mod leave_room;
pub mod list_users;
pub mod login;
pub mod register_presence;
pub mod send_private_message;
pub mod send_room_message;
pub mod signup;
pub mod typing;

pub use disconnect::{DisconnectOutcome, DisconnectUseCase};
pub use error::{SendPrivateMessageError, SendRoomMessageError, SignupError};
pub use get_rooms::GetRoomsUseCase;
pub use history::{GetPrivateHistoryUseCase, GetRoomHistoryUseCase};
pub use join_room::{JoinOutcome, JoinRoomUseCase};
pub use leave_room::LeaveRoomUseCase;
pub use list_users::ListUsersUseCase;
pub use login::LoginUseCase;
pub use register_presence::RegisterPresenceUseCase;
pub use send_private_message::{PrivateDelivery, SendPrivateMessageUseCase};
pub use send_room_message::SendRoomMessageUseCase;
pub use signup::SignupUseCase;
pub use typing::NotifyTypingUseCase;
