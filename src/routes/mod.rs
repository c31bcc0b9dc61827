//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! A small JSON API for the dashboard renderer: read the current snapshot
//! and chat log, send chat messages, and post dashboard actions. There is a
//! single shared dashboard; no sessions.

pub mod dashboard;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/dashboard", get(dashboard::get_dashboard))
        .route(
            "/api/messages",
            get(dashboard::list_messages).post(dashboard::post_message),
        )
        .route("/api/actions", post(dashboard::post_action))
        .route("/api/view", post(dashboard::post_view))
        .route("/api/quick-prompts", get(dashboard::quick_prompts))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
