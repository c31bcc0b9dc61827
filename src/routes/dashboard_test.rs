use super::*;
use crate::services::ai::MOCK_RESPONSE;
use crate::state::test_helpers;

#[test]
fn action_error_to_status_maps_unknown_competitor() {
    let err = ActionError::UnknownCompetitor("x".into());
    assert_eq!(action_error_to_status(err), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_dashboard_reports_loading_then_ready() {
    let state = test_helpers::test_app_state();
    let Json(resp) = get_dashboard(State(state.clone())).await;
    assert!(resp.loading);
    assert!(resp.error.is_none());
    assert!(!resp.thinking);

    test_helpers::seed_competitors(&state).await;
    let Json(resp) = get_dashboard(State(state)).await;
    assert!(!resp.loading);
    assert_eq!(resp.snapshot.competitors.len(), 3);
}

#[tokio::test]
async fn get_dashboard_surfaces_load_error() {
    let state = test_helpers::test_app_state();
    state.dashboard.write().await.set_load_error("nope");
    let Json(resp) = get_dashboard(State(state)).await;
    assert!(!resp.loading);
    assert_eq!(resp.error.as_deref(), Some("nope"));
}

#[tokio::test]
async fn list_messages_starts_with_welcome() {
    let state = test_helpers::test_app_state();
    let Json(messages) = list_messages(State(state)).await;
    assert_eq!(messages.len(), 2);
    assert!(messages.iter().all(|m| m.is_html));
}

#[tokio::test]
async fn post_message_rejects_blank_text() {
    let state = test_helpers::test_app_state();
    let result = post_message(State(state.clone()), Json(SendMessageBody { text: "   ".into() })).await;
    assert_eq!(result.err(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(state.log.read().await.len(), 2);
}

#[tokio::test]
async fn post_message_returns_turn() {
    let state = test_helpers::test_app_state();
    let Json(turn) = post_message(State(state), Json(SendMessageBody { text: " hi ".into() }))
        .await
        .unwrap();
    assert_eq!(turn.narration.content.as_str(), "hi");
    assert_eq!(turn.reply.content.as_str(), MOCK_RESPONSE);
}

#[tokio::test]
async fn post_action_unknown_competitor_is_not_found() {
    let state = test_helpers::test_app_state();
    let result = post_action(State(state), Json(DashboardAction::SelectCompetitor { id: "nope".into() })).await;
    assert_eq!(result.err(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn post_view_updates_zoom() {
    let state = test_helpers::test_app_state();
    let status = post_view(State(state.clone()), Json(ViewUpdate { zoom: Some(10.0), ..ViewUpdate::default() })).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!((state.dashboard.read().await.view.zoom - 10.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn quick_prompts_lists_four() {
    let Json(prompts) = quick_prompts().await;
    assert_eq!(prompts.len(), 4);
    assert_eq!(prompts[0].text, "Analyze competitors near me.");
}
