use crate::types::ChatResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dhonkbot::ChatError;
use tracing::error;

/// The answer sent back when the customer submits an empty message.
pub const EMPTY_MESSAGE_ANSWER: &str = "❌ Please type something.";

/// A custom error type for the server application.
///
/// Every variant renders as a chat answer so the widget can show it in the
/// conversation like any other reply.
#[derive(Debug)]
pub enum AppError {
    /// Errors raised while answering a message.
    Chat(ChatError),
}

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        AppError::Chat(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, answer) = match self {
            AppError::Chat(ChatError::EmptyMessage) => {
                (StatusCode::BAD_REQUEST, EMPTY_MESSAGE_ANSWER.to_string())
            }
            AppError::Chat(ChatError::Generation(err)) => {
                error!("Generative fallback failed: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("❌ OpenAI Error: {err}"),
                )
            }
        };

        (status_code, Json(ChatResponse { answer })).into_response()
    }
}
