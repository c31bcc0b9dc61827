//! Dashboard actions: state transitions that narrate themselves.
//!
//! DESIGN
//! ======
//! Every map or panel interaction arrives as a `DashboardAction` value.
//! Applying it mutates the `Dashboard` and returns the first-person sentence
//! that the chat treats as if the user had typed it. The caller appends that
//! sentence to the log and runs the AI interaction with it.

use serde::Deserialize;

use super::{Dashboard, MapLayer, Module};

/// Zoom applied when the map recenters on a selected competitor.
pub const SELECTED_ZOOM: f64 = 15.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum DashboardAction {
    /// Marker click. Clicking the selected competitor again deselects it.
    SelectCompetitor { id: String },
    ToggleLayer { layer: MapLayer },
    SetModule { module: Module },
}

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("unknown competitor: {0}")]
    UnknownCompetitor(String),
}

/// Apply `action` to `dashboard` and return its narration.
///
/// # Errors
///
/// Returns [`ActionError::UnknownCompetitor`] if a selection names an id that
/// is not in the current competitor list. The dashboard is left untouched.
pub fn apply(dashboard: &mut Dashboard, action: &DashboardAction) -> Result<String, ActionError> {
    match action {
        DashboardAction::SelectCompetitor { id } => select_competitor(dashboard, id),
        DashboardAction::ToggleLayer { layer } => Ok(toggle_layer(dashboard, *layer)),
        DashboardAction::SetModule { module } => Ok(set_module(dashboard, *module)),
    }
}

fn select_competitor(dashboard: &mut Dashboard, id: &str) -> Result<String, ActionError> {
    let competitor = dashboard
        .find_competitor(id)
        .cloned()
        .ok_or_else(|| ActionError::UnknownCompetitor(id.to_string()))?;

    if dashboard.selected_competitor_id.as_deref() == Some(id) {
        dashboard.selected_competitor_id = None;
        return Ok(format!("I've deselected \"{}\".", competitor.name));
    }

    dashboard.selected_competitor_id = Some(competitor.id);
    dashboard.view.latitude = competitor.latitude;
    dashboard.view.longitude = competitor.longitude;
    dashboard.view.zoom = SELECTED_ZOOM;
    Ok(format!("I've selected \"{}\". Tell me more about it.", competitor.name))
}

fn toggle_layer(dashboard: &mut Dashboard, layer: MapLayer) -> String {
    let verb = if let Some(pos) = dashboard.visible_layers.iter().position(|l| *l == layer) {
        dashboard.visible_layers.remove(pos);
        "disabled"
    } else {
        dashboard.visible_layers.push(layer);
        "enabled"
    };
    format!("I just {verb} the {} layer.", layer.as_str().replace('_', " "))
}

fn set_module(dashboard: &mut Dashboard, module: Module) -> String {
    dashboard.active_module = module;
    format!("I've switched to the '{module}' module. What can I see here?")
}

#[cfg(test)]
#[path = "action_test.rs"]
mod tests;
