//! Dashboard service: user intents → state change → conversational turn.
//!
//! DESIGN
//! ======
//! Each intent runs in a fixed order: mutate the dashboard (if the intent
//! is an action), append the user-side message, release all locks, then
//! await the AI interaction directly. There is no deferred task; the AI
//! reply is the last thing the call does.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::chat::{ChatMessage, MessageContent, Role};
use crate::dashboard::action::{self, ActionError, DashboardAction};
use crate::dashboard::seed;
use crate::places::PlacesClient;
use crate::state::AppState;

use super::ai;

pub const LOAD_ERROR_MESSAGE: &str =
    "Could not load competitor data. Please check the API key and network connection.";

/// Both sides of one conversational turn.
#[derive(Debug, Clone, Serialize)]
pub struct Turn {
    pub narration: ChatMessage,
    pub reply: ChatMessage,
}

/// Map camera change from the renderer. Not narrated.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ViewUpdate {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub zoom: Option<f64>,
}

/// A typed chat message: logged verbatim, then answered.
pub async fn send_message(state: &AppState, text: &str) -> Turn {
    let narration = append_user(state, text).await;
    let reply = ai::interact(state, text).await;
    Turn { narration, reply }
}

/// Apply a dashboard action and answer its narration.
///
/// # Errors
///
/// Returns [`ActionError`] when the action is rejected; nothing is logged
/// and no AI call is made in that case.
pub async fn perform_action(state: &AppState, action: &DashboardAction) -> Result<Turn, ActionError> {
    let sentence = {
        let mut dashboard = state.dashboard.write().await;
        action::apply(&mut dashboard, action)?
    };
    info!(?action, "dashboard: action applied");

    let narration = append_user(state, &sentence).await;
    let reply = ai::interact(state, &sentence).await;
    Ok(Turn { narration, reply })
}

/// Pan/zoom the map. Absent fields keep their current value.
pub async fn update_view(state: &AppState, update: ViewUpdate) {
    let mut dashboard = state.dashboard.write().await;
    let view = &mut dashboard.view;
    if let Some(lat) = update.latitude {
        view.latitude = lat;
    }
    if let Some(lon) = update.longitude {
        view.longitude = lon;
    }
    if let Some(zoom) = update.zoom {
        view.zoom = zoom;
    }
}

/// One-shot competitor fetch. On success the list becomes the owner's
/// restaurant followed by the fetched venues; on failure the dashboard
/// records a persistent error. Not retried.
pub async fn load_competitors(state: &AppState, places: &PlacesClient) {
    let center = state.dashboard.read().await.view;
    match places
        .fetch_competitors(center.latitude, center.longitude)
        .await
    {
        Ok(fetched) => {
            info!(count = fetched.len(), "places: competitors loaded");
            let mut competitors = Vec::with_capacity(fetched.len() + 1);
            competitors.push(seed::self_restaurant(center));
            competitors.extend(fetched);
            state.dashboard.write().await.set_competitors(competitors);
        }
        Err(e) => {
            warn!(error = %e, "places: failed to fetch competitor data");
            state
                .dashboard
                .write()
                .await
                .set_load_error(LOAD_ERROR_MESSAGE);
        }
    }
}

async fn append_user(state: &AppState, text: &str) -> ChatMessage {
    state
        .log
        .write()
        .await
        .append(Role::User, MessageContent::plain(text))
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
