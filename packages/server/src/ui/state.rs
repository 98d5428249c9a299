//! サーバー状態と依存関係の配線

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    domain::{ChatState, MessageLog, MessagePusher, UserDirectory},
    usecase::{
        DisconnectUseCase, GetPrivateHistoryUseCase, GetRoomHistoryUseCase, GetRoomsUseCase,
        JoinRoomUseCase, LeaveRoomUseCase, ListUsersUseCase, LoginUseCase, NotifyTypingUseCase,
        RegisterPresenceUseCase, SendPrivateMessageUseCase, SendRoomMessageUseCase, SignupUseCase,
    },
};

/// 共有アプリケーション状態。intent ごとの UseCase と、ハンドラが
/// イベントを fan-out する pusher を保持します。
pub struct AppState {
    pub register_presence_usecase: RegisterPresenceUseCase,
    pub join_room_usecase: JoinRoomUseCase,
    pub leave_room_usecase: LeaveRoomUseCase,
    pub send_room_message_usecase: SendRoomMessageUseCase,
    pub send_private_message_usecase: SendPrivateMessageUseCase,
    pub notify_typing_usecase: NotifyTypingUseCase,
    pub disconnect_usecase: DisconnectUseCase,
    pub signup_usecase: SignupUseCase,
    pub login_usecase: LoginUseCase,
    pub list_users_usecase: ListUsersUseCase,
    pub get_rooms_usecase: GetRoomsUseCase,
    pub get_room_history_usecase: GetRoomHistoryUseCase,
    pub get_private_history_usecase: GetPrivateHistoryUseCase,
    pub message_pusher: Arc<dyn MessagePusher>,
}

impl AppState {
    /// 共有コーディネータ状態とコラボレータの上に全 UseCase を配線
    pub fn new(
        chat_state: Arc<Mutex<ChatState>>,
        directory: Arc<dyn UserDirectory>,
        message_log: Arc<dyn MessageLog>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            register_presence_usecase: RegisterPresenceUseCase::new(chat_state.clone()),
            join_room_usecase: JoinRoomUseCase::new(chat_state.clone()),
            leave_room_usecase: LeaveRoomUseCase::new(chat_state.clone()),
            send_room_message_usecase: SendRoomMessageUseCase::new(
                chat_state.clone(),
                message_log.clone(),
            ),
            send_private_message_usecase: SendPrivateMessageUseCase::new(
                chat_state.clone(),
                message_log.clone(),
            ),
            notify_typing_usecase: NotifyTypingUseCase::new(chat_state.clone()),
            disconnect_usecase: DisconnectUseCase::new(chat_state.clone()),
            signup_usecase: SignupUseCase::new(directory.clone()),
            login_usecase: LoginUseCase::new(directory.clone()),
            list_users_usecase: ListUsersUseCase::new(directory),
            get_rooms_usecase: GetRoomsUseCase::new(chat_state),
            get_room_history_usecase: GetRoomHistoryUseCase::new(message_log.clone()),
            get_private_history_usecase: GetPrivateHistoryUseCase::new(message_log),
            message_pusher,
        }
    }
}
