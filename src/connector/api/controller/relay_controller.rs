use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

use crate::application::{RelayChatUseCase, INVALID_MESSAGES};

pub const CHAT_PATH: &str = "/api/chat";
pub const INTERNAL_SERVER_ERROR: &str = "internal server error";

#[derive(Deserialize)]
struct RelayRequestBody {
    #[serde(default)]
    messages: Value,
}

#[derive(Serialize)]
struct RelayReply {
    content: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// HTTP handler for the relay endpoint.
pub struct RelayController;

impl RelayController {
    /// `POST /api/chat`
    ///
    /// A body that is not a JSON object counts as a request without
    /// `messages`. Provider failures are logged here and never echoed back.
    pub async fn relay(State(relay): State<Arc<RelayChatUseCase>>, body: Bytes) -> Response {
        let messages = match serde_json::from_slice::<RelayRequestBody>(&body) {
            Ok(request) => request.messages,
            Err(e) => {
                warn!("Unreadable relay request body: {}", e);
                Value::Null
            }
        };

        match relay.execute(&messages).await {
            Ok(content) => (StatusCode::OK, Json(RelayReply { content })).into_response(),
            Err(e) if e.is_invalid_input() => {
                Self::error_response(StatusCode::BAD_REQUEST, INVALID_MESSAGES)
            }
            Err(e) => {
                error!("Failed to relay chat request: {}", e);
                Self::error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
            }
        }
    }

    fn error_response(status: StatusCode, error: &'static str) -> Response {
        (status, Json(ErrorBody { error })).into_response()
    }
}
