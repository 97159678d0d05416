use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const RW_API_KEY_HEADER: &str = "x-vestaboard-read-write-key";

/// What the board was asked to show.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoardMessage {
    Text { text: String },
    Characters(Vec<Vec<u8>>),
}

impl BoardMessage {
    fn is_valid(&self) -> bool {
        match self {
            BoardMessage::Text { text } => !text.is_empty(),
            BoardMessage::Characters(rows) => {
                rows.len() == 6 && rows.iter().all(|row| row.len() == 22)
            }
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: Uuid,
    pub message: BoardMessage,
}

/// Envelope returned for every POST.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
}

impl StatusResponse {
    fn status(status: &str) -> Json<StatusResponse> {
        Json(StatusResponse {
            status: status.to_string(),
            id: None,
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CurrentMessage {
    #[serde(rename = "currentMessage")]
    pub current_message: Option<StoredMessage>,
}

/// Every message accepted so far, oldest first.
pub type Board = Arc<RwLock<Vec<StoredMessage>>>;

#[derive(Clone)]
struct AppState {
    board: Board,
    api_key: Arc<str>,
}

pub fn new_board() -> Board {
    Arc::new(RwLock::new(Vec::new()))
}

pub fn app(api_key: &str) -> Router {
    app_with_board(api_key, new_board())
}

/// Router sharing `board` with the caller, so tests can inspect what arrived.
pub fn app_with_board(api_key: &str, board: Board) -> Router {
    let state = AppState {
        board,
        api_key: Arc::from(api_key),
    };
    Router::new()
        .route("/", post(send_message).get(current_message))
        .with_state(state)
}

pub async fn run(listener: TcpListener, api_key: &str, board: Board) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_board(api_key, board)).await
}

fn authorized(headers: &HeaderMap, api_key: &str) -> bool {
    headers
        .get(RW_API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == api_key)
}

async fn send_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<StatusResponse>) {
    if !authorized(&headers, &state.api_key) {
        tracing::warn!("rejected message with missing or wrong api key");
        return (StatusCode::UNAUTHORIZED, StatusResponse::status("invalid api key"));
    }

    let message = match serde_json::from_str::<BoardMessage>(&body) {
        Ok(message) if message.is_valid() => message,
        _ => {
            tracing::warn!(%body, "rejected malformed message");
            return (StatusCode::BAD_REQUEST, StatusResponse::status("invalid message"));
        }
    };

    let id = Uuid::new_v4();
    tracing::info!(%id, ?message, "message accepted");
    state.board.write().await.push(StoredMessage { id, message });

    (
        StatusCode::OK,
        Json(StatusResponse {
            status: "ok".to_string(),
            id: Some(id),
        }),
    )
}

async fn current_message(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CurrentMessage>, StatusCode> {
    if !authorized(&headers, &state.api_key) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let board = state.board.read().await;
    Ok(Json(CurrentMessage {
        current_message: board.last().cloned(),
    }))
}
