use std::sync::Arc;

use axum::routing::post;
use tower_http::trace::TraceLayer;

use crate::application::RelayChatUseCase;

use super::controller::{RelayController, CHAT_PATH};

/// The relay endpoint's HTTP surface.
pub fn http_router(relay: Arc<RelayChatUseCase>) -> axum::Router {
    axum::Router::new()
        .route(CHAT_PATH, post(RelayController::relay))
        .layer(TraceLayer::new_for_http())
        .with_state(relay)
}
