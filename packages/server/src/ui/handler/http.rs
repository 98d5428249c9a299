//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    domain::{NewUser, RoomName, Username},
    infrastructure::dto::http::{
        AccountResponse, ErrorResponse, LoginRequest, PrivateMessageDto, PrivateMessagesResponse,
        RoomMessageDto, RoomMessagesResponse, RoomsResponse, SignupRequest, UserDto,
        UserSummaryDto, UsersResponse,
    },
    ui::state::AppState,
    usecase::SignupError,
};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            message: message.to_string(),
        }),
    )
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get the configured room list
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<RoomsResponse> {
    let rooms = state.get_rooms_usecase.execute().await;
    Json(RoomsResponse {
        rooms: rooms.into_iter().map(|room| room.into_string()).collect(),
    })
}

/// Create an account
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    let new_user = NewUser {
        username: request.username,
        firstname: request.firstname,
        lastname: request.lastname,
        password: request.password,
    };

    match state.signup_usecase.execute(new_user).await {
        Ok(record) => Ok((
            StatusCode::CREATED,
            Json(AccountResponse {
                message: "Signup successful.".to_string(),
                user: UserDto::from_record(&record),
            }),
        )),
        Err(SignupError::MissingFields) => Err(api_error(
            StatusCode::BAD_REQUEST,
            "All fields are required.",
        )),
        Err(SignupError::UsernameTaken) => {
            Err(api_error(StatusCode::CONFLICT, "Username already exists."))
        }
        Err(SignupError::Directory(e)) => {
            tracing::error!("Signup failed: {}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "Signup failed."))
        }
    }
}

/// Verify credentials
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    if request.username.is_empty() || request.password.is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Username and password are required.",
        ));
    }

    match state
        .login_usecase
        .execute(&request.username, &request.password)
        .await
    {
        Ok(Some(record)) => Ok(Json(AccountResponse {
            message: "Login successful.".to_string(),
            user: UserDto::from_record(&record),
        })),
        Ok(None) => Err(api_error(StatusCode::UNAUTHORIZED, "Invalid credentials.")),
        Err(e) => {
            tracing::error!("Login failed: {}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "Login failed."))
        }
    }
}

/// Query parameters naming the calling user
#[derive(Debug, Deserialize)]
pub struct CallerQuery {
    pub username: Option<String>,
}

/// List every other account, sorted by username
pub async fn get_users(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CallerQuery>,
) -> Result<Json<UsersResponse>, ApiError> {
    match state
        .list_users_usecase
        .execute(query.username.as_deref())
        .await
    {
        Ok(records) => Ok(Json(UsersResponse {
            users: records.iter().map(UserSummaryDto::from_record).collect(),
        })),
        Err(e) => {
            tracing::error!("Failed to list users: {}", e);
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unable to fetch users.",
            ))
        }
    }
}

/// Fetch a room's message history
pub async fn get_room_messages(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<Json<RoomMessagesResponse>, ApiError> {
    let room = RoomName::new(room)
        .map_err(|_| api_error(StatusCode::BAD_REQUEST, "A room name is required."))?;

    match state.get_room_history_usecase.execute(&room).await {
        Ok(records) => Ok(Json(RoomMessagesResponse {
            messages: records.iter().map(RoomMessageDto::from_record).collect(),
        })),
        Err(e) => {
            tracing::error!("Failed to fetch room messages: {}", e);
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unable to fetch room messages.",
            ))
        }
    }
}

/// Fetch the private conversation between the caller and `other_user`
pub async fn get_private_messages(
    State(state): State<Arc<AppState>>,
    Path(other_user): Path<String>,
    Query(query): Query<CallerQuery>,
) -> Result<Json<PrivateMessagesResponse>, ApiError> {
    let caller = query
        .username
        .and_then(|username| Username::new(username).ok())
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Both users are required."))?;
    let other = Username::new(other_user)
        .map_err(|_| api_error(StatusCode::BAD_REQUEST, "Both users are required."))?;

    match state
        .get_private_history_usecase
        .execute(&caller, &other)
        .await
    {
        Ok(records) => Ok(Json(PrivateMessagesResponse {
            messages: records.iter().map(PrivateMessageDto::from_record).collect(),
        })),
        Err(e) => {
            tracing::error!("Failed to fetch private messages: {}", e);
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unable to fetch private messages.",
            ))
        }
    }
}
