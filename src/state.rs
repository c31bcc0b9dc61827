//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is the application controller: it owns the dashboard, the
//! chat log, and the busy flag, and is injected into Axum handlers via the
//! `State` extractor. Handlers never hold a lock across the AI call; they
//! mutate, release, then await.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::RwLock;

use crate::chat::ChatLog;
use crate::config::AiSettings;
use crate::dashboard::seed::WELCOME_MESSAGES;
use crate::dashboard::{Dashboard, MapView};
use crate::llm::LlmChat;

// =============================================================================
// THINKING FLAG
// =============================================================================

/// Busy flag shown as the "thinking" indicator.
///
/// Counts in-flight interactions so that overlapping calls keep the flag set
/// until the last one settles. Cleared only by dropping the guard returned
/// from [`ThinkingFlag::enter`].
#[derive(Clone, Default)]
pub struct ThinkingFlag {
    in_flight: Arc<AtomicUsize>,
}

impl ThinkingFlag {
    /// Idle -> Thinking. The returned guard performs Thinking -> Idle on drop.
    #[must_use]
    pub fn enter(&self) -> ThinkingGuard {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        ThinkingGuard { in_flight: Arc::clone(&self.in_flight) }
    }

    #[must_use]
    pub fn is_thinking(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }
}

pub struct ThinkingGuard {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for ThinkingGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Copy.
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<RwLock<Dashboard>>,
    pub log: Arc<RwLock<ChatLog>>,
    pub thinking: ThinkingFlag,
    /// Optional LLM client. `None` runs the copilot in mock mode.
    pub llm: Option<Arc<dyn LlmChat>>,
    pub ai: AiSettings,
}

impl AppState {
    #[must_use]
    pub fn new(view: MapView, llm: Option<Arc<dyn LlmChat>>, ai: AiSettings) -> Self {
        Self {
            dashboard: Arc::new(RwLock::new(Dashboard::new(view))),
            log: Arc::new(RwLock::new(ChatLog::with_greeting(WELCOME_MESSAGES))),
            thinking: ThinkingFlag::default(),
            llm,
            ai,
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
