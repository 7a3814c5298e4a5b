//! REST API handlers.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::info;

use super::types::{ApiInfoResponse, ChatRequest, ChatResponse};
use crate::backend::InMemoryBackend;
use crate::dialogue::DialogueEngine;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<DialogueEngine>,
}

impl AppState {
    pub fn new(engine: DialogueEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// State backed by the seeded demo data.
    pub fn in_memory() -> Self {
        Self::new(DialogueEngine::new(Arc::new(
            InMemoryBackend::with_demo_data(),
        )))
    }
}

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// API information endpoint.
pub async fn api_info(State(state): State<AppState>) -> Json<ApiInfoResponse> {
    Json(ApiInfoResponse {
        name: "order-desk",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
        sessions: state.engine.sessions().count(),
    })
}

/// Handle one chat turn.
///
/// Always answers 200; failures inside the turn are turned into an
/// escalation reply by the engine.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let key = req.session_key();
    let reply = state.engine.reply(req.message(), &key).await;
    info!(session = %key, "chat turn answered");
    Json(ChatResponse::new(reply))
}
