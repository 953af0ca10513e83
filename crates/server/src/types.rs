//! Request and response bodies for the HTTP API.

use serde::{Deserialize, Serialize};

/// The body of `POST /chat`. A missing `message` is treated as empty.
#[derive(Debug, Deserialize, Default)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}
