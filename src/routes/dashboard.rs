//! Dashboard and chat routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;
use crate::dashboard::action::{ActionError, DashboardAction};
use crate::dashboard::seed::{QUICK_PROMPTS, QuickPrompt};
use crate::dashboard::{DashboardState, LoadStatus, build_snapshot};
use crate::services::dashboard::{self as service, Turn, ViewUpdate};
use crate::state::AppState;

#[derive(Serialize)]
pub struct DashboardResponse {
    pub snapshot: DashboardState,
    pub thinking: bool,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct SendMessageBody {
    pub text: String,
}

/// `GET /api/dashboard`: fresh snapshot plus loading and busy flags.
pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let dashboard = state.dashboard.read().await;
    let (loading, error) = match &dashboard.load {
        LoadStatus::Loading => (true, None),
        LoadStatus::Ready => (false, None),
        LoadStatus::Failed(message) => (false, Some(message.clone())),
    };
    Json(DashboardResponse {
        snapshot: build_snapshot(&dashboard),
        thinking: state.thinking.is_thinking(),
        loading,
        error,
    })
}

/// `GET /api/messages`: the chat log in append order.
pub async fn list_messages(State(state): State<AppState>) -> Json<Vec<ChatMessage>> {
    Json(state.log.read().await.messages().to_vec())
}

/// `POST /api/messages`: send a typed message and wait for the reply.
pub async fn post_message(
    State(state): State<AppState>,
    Json(body): Json<SendMessageBody>,
) -> Result<Json<Turn>, StatusCode> {
    let text = body.text.trim();
    if text.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(Json(service::send_message(&state, text).await))
}

/// `POST /api/actions`: apply a dashboard action and wait for the reply.
pub async fn post_action(
    State(state): State<AppState>,
    Json(action): Json<DashboardAction>,
) -> Result<Json<Turn>, StatusCode> {
    service::perform_action(&state, &action)
        .await
        .map(Json)
        .map_err(action_error_to_status)
}

/// `POST /api/view`: map pan/zoom.
pub async fn post_view(State(state): State<AppState>, Json(update): Json<ViewUpdate>) -> StatusCode {
    service::update_view(&state, update).await;
    StatusCode::NO_CONTENT
}

/// `GET /api/quick-prompts`: suggested prompts for the chat panel.
pub async fn quick_prompts() -> Json<&'static [QuickPrompt]> {
    Json(&QUICK_PROMPTS[..])
}

pub(crate) fn action_error_to_status(err: ActionError) -> StatusCode {
    match err {
        ActionError::UnknownCompetitor(_) => StatusCode::NOT_FOUND,
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
