//! # Route Handlers

use super::{
    errors::AppError,
    state::AppState,
    types::{ChatRequest, ChatResponse, StatusResponse},
};
use axum::{extract::State, Json};
use tracing::info;

/// The status line reported by the root endpoint.
pub const STATUS_MESSAGE: &str = "✅ Dhonk Craft Backend with OpenAI is running!";

/// The handler for the root (`/`) endpoint.
pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: STATUS_MESSAGE.to_string(),
    })
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}

/// The handler for `POST /chat`: runs one message through the response pipeline.
pub async fn chat_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    info!(chars = payload.message.len(), "Received chat message");

    let answer = app_state.pipeline.respond(&payload.message).await?;
    info!(source = ?answer.source, "Answered chat message");

    Ok(Json(ChatResponse {
        answer: answer.text,
    }))
}
