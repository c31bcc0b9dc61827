use super::*;
use crate::dashboard::Dashboard;
use crate::state::test_helpers::{self, TEST_VIEW};

fn loaded_dashboard() -> Dashboard {
    let mut dashboard = Dashboard::new(TEST_VIEW);
    dashboard.set_competitors(test_helpers::dummy_competitors());
    dashboard
}

fn select(id: &str) -> DashboardAction {
    DashboardAction::SelectCompetitor { id: id.into() }
}

// =============================================================================
// select_competitor
// =============================================================================

#[test]
fn select_sets_id_and_recenters() {
    let mut dashboard = loaded_dashboard();
    let sentence = apply(&mut dashboard, &select("p1")).unwrap();
    assert_eq!(sentence, "I've selected \"Pizza Palace\". Tell me more about it.");
    assert_eq!(dashboard.selected_competitor_id.as_deref(), Some("p1"));
    assert!((dashboard.view.zoom - SELECTED_ZOOM).abs() < f64::EPSILON);
    assert!((dashboard.view.latitude - 37.78).abs() < f64::EPSILON);
}

#[test]
fn selecting_again_deselects_without_moving() {
    let mut dashboard = loaded_dashboard();
    apply(&mut dashboard, &select("p1")).unwrap();
    dashboard.view.zoom = 12.0;
    let sentence = apply(&mut dashboard, &select("p1")).unwrap();
    assert_eq!(sentence, "I've deselected \"Pizza Palace\".");
    assert!(dashboard.selected_competitor_id.is_none());
    assert!((dashboard.view.zoom - 12.0).abs() < f64::EPSILON);
}

#[test]
fn selecting_other_switches_selection() {
    let mut dashboard = loaded_dashboard();
    apply(&mut dashboard, &select("p1")).unwrap();
    let sentence = apply(&mut dashboard, &select("b1")).unwrap();
    assert!(sentence.starts_with("I've selected \"Burger Barn\""));
    assert_eq!(dashboard.selected_competitor_id.as_deref(), Some("b1"));
}

#[test]
fn selecting_unknown_id_errors_and_leaves_state() {
    let mut dashboard = loaded_dashboard();
    let err = apply(&mut dashboard, &select("nope")).unwrap_err();
    assert!(matches!(err, ActionError::UnknownCompetitor(id) if id == "nope"));
    assert!(dashboard.selected_competitor_id.is_none());
    assert!((dashboard.view.zoom - TEST_VIEW.zoom).abs() < f64::EPSILON);
}

// =============================================================================
// toggle_layer
// =============================================================================

#[test]
fn toggle_visible_layer_disables_then_enables() {
    let mut dashboard = loaded_dashboard();
    let action = DashboardAction::ToggleLayer { layer: MapLayer::Competitors };

    let sentence = apply(&mut dashboard, &action).unwrap();
    assert_eq!(sentence, "I just disabled the competitors layer.");
    assert!(sentence.contains("disabled"));
    assert!(!dashboard.visible_layers.contains(&MapLayer::Competitors));

    let sentence = apply(&mut dashboard, &action).unwrap();
    assert_eq!(sentence, "I just enabled the competitors layer.");
    assert_eq!(dashboard.visible_layers, vec![MapLayer::Competitors]);
}

// =============================================================================
// set_module
// =============================================================================

#[test]
fn set_module_switches_and_narrates() {
    let mut dashboard = loaded_dashboard();
    let sentence = apply(&mut dashboard, &DashboardAction::SetModule { module: Module::Price }).unwrap();
    assert_eq!(sentence, "I've switched to the 'price' module. What can I see here?");
    assert_eq!(dashboard.active_module, Module::Price);
}

#[test]
fn set_same_module_still_narrates() {
    let mut dashboard = loaded_dashboard();
    let sentence = apply(&mut dashboard, &DashboardAction::SetModule { module: Module::Place }).unwrap();
    assert!(sentence.contains("'place'"));
}

// =============================================================================
// wire format
// =============================================================================

#[test]
fn actions_deserialize_from_tagged_json() {
    let action: DashboardAction = serde_json::from_str(r#"{"action":"select_competitor","id":"p1"}"#).unwrap();
    assert_eq!(action, select("p1"));
    let action: DashboardAction = serde_json::from_str(r#"{"action":"toggle_layer","layer":"competitors"}"#).unwrap();
    assert_eq!(action, DashboardAction::ToggleLayer { layer: MapLayer::Competitors });
    let action: DashboardAction = serde_json::from_str(r#"{"action":"set_module","module":"promotion"}"#).unwrap();
    assert_eq!(action, DashboardAction::SetModule { module: Module::Promotion });
}

#[test]
fn unknown_module_is_rejected_at_the_boundary() {
    let result = serde_json::from_str::<DashboardAction>(r#"{"action":"set_module","module":"menu"}"#);
    assert!(result.is_err());
}
