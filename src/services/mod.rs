//! Services: the copilot interaction loop and the dashboard intents that
//! drive it.

pub mod ai;
pub mod dashboard;
