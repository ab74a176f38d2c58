use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use concierge_agent::runtime::AgentRuntime;
use concierge_core::{ChatRequest, ChatResponse};
use serde::Serialize;
use tower_http::cors::CorsLayer;

pub const APP_TITLE: &str = "Concierge Room Service Agent";

#[derive(Clone)]
pub struct AppState {
    runtime: Arc<AgentRuntime>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub app: &'static str,
    pub version: &'static str,
}

/// Permissive CORS for local development UIs; narrow in production.
pub fn router(runtime: Arc<AgentRuntime>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/chat", post(chat))
        .layer(CorsLayer::permissive())
        .with_state(AppState { runtime })
}

pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        app: APP_TITLE,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// The runtime never fails; malformed JSON is rejected by axum before this
/// handler runs.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    Json(state.runtime.handle_message(&request).await)
}
