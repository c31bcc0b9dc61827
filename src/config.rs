//! Process configuration from environment variables.
//!
//! Provider credentials live with their clients (`llm::config`,
//! `places::PlacesConfig`); this module covers the server and the dashboard
//! defaults.

use std::time::Duration;

use crate::dashboard::MapView;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CENTER_LAT: f64 = 37.7749;
pub const DEFAULT_CENTER_LON: f64 = -122.4194;
pub const DEFAULT_ZOOM: f64 = 13.0;
pub const DEFAULT_AI_MOCK_DELAY_MS: u64 = 500;
pub const DEFAULT_AI_MAX_OUTPUT_TOKENS: u32 = 2048;

/// Settings for the AI interaction protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiSettings {
    /// Artificial latency of the mock reply when no LLM is configured.
    pub mock_delay: Duration,
    pub max_output_tokens: u32,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            mock_delay: Duration::from_millis(DEFAULT_AI_MOCK_DELAY_MS),
            max_output_tokens: DEFAULT_AI_MAX_OUTPUT_TOKENS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    /// Initial map camera; also the center of the competitor search.
    pub view: MapView,
    pub ai: AiSettings,
}

impl AppConfig {
    /// Read `PORT`, `DASHBOARD_CENTER_LAT`, `DASHBOARD_CENTER_LON`,
    /// `DASHBOARD_ZOOM`, `AI_MOCK_DELAY_MS` and `AI_MAX_OUTPUT_TOKENS`.
    /// Missing or unparseable values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            view: MapView {
                latitude: env_parse("DASHBOARD_CENTER_LAT", DEFAULT_CENTER_LAT),
                longitude: env_parse("DASHBOARD_CENTER_LON", DEFAULT_CENTER_LON),
                zoom: env_parse("DASHBOARD_ZOOM", DEFAULT_ZOOM),
            },
            ai: AiSettings {
                mock_delay: Duration::from_millis(env_parse("AI_MOCK_DELAY_MS", DEFAULT_AI_MOCK_DELAY_MS)),
                max_output_tokens: env_parse("AI_MAX_OUTPUT_TOKENS", DEFAULT_AI_MAX_OUTPUT_TOKENS),
            },
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
