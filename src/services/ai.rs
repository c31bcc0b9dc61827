//! AI service: dashboard snapshot + user message → copilot reply.
//!
//! DESIGN
//! ======
//! One interaction is: set the busy flag, snapshot the dashboard, build a
//! single prompt (persona, active module, module context, user message),
//! call the LLM with web search enabled, render the grounding sources as an
//! HTML list, and append exactly one AI message to the chat log.
//!
//! Failures never escape: any LLM error (or a reply without text) becomes a
//! fixed plain-text apology. Without a configured LLM the call is skipped
//! and a labeled mock reply is returned after an artificial delay.
//!
//! Overlapping interactions are not serialized. Each append is atomic, but
//! replies land in completion order.

use std::fmt::Write;

use tracing::{info, warn};

use crate::chat::{ChatMessage, MessageContent, Role};
use crate::config::AiSettings;
use crate::dashboard::context::format_module_context;
use crate::dashboard::{DashboardState, build_snapshot};
use crate::llm::LlmChat;
use crate::llm::types::{Citation, GenerateOptions, LlmError};
use crate::state::AppState;

pub const MOCK_RESPONSE: &str = "This is a mock response. Please set your API key to get real AI-powered insights.";
pub const APOLOGY: &str = "Sorry, I encountered an error. Please try again.";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("LLM reply contained no text")]
    EmptyReply,
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Run one copilot turn for `user_message` and append the reply to the log.
///
/// The busy flag is set for the duration of the call and cleared on every
/// path, including when the returned future is dropped early.
pub async fn interact(state: &AppState, user_message: &str) -> ChatMessage {
    let _thinking = state.thinking.enter();

    let snapshot = {
        let dashboard = state.dashboard.read().await;
        build_snapshot(&dashboard)
    };
    info!(module = %snapshot.active_module, message_len = user_message.len(), "ai: interaction started");

    let content = match generate_reply(state.llm.as_deref(), state.ai, &snapshot, user_message).await {
        Ok(content) => content,
        Err(e) => {
            warn!(error = %e, "ai: request failed");
            MessageContent::plain(APOLOGY)
        }
    };

    let (message, log_len) = {
        let mut log = state.log.write().await;
        let message = log.append(Role::Ai, content);
        (message, log.len())
    };
    info!(
        id = message.id,
        is_html = message.is_html,
        reply_len = message.content.as_str().len(),
        log_len,
        "ai: interaction settled"
    );
    message
}

/// Produce the reply body: mock text without an LLM, otherwise the model
/// text followed by its rendered sources.
///
/// # Errors
///
/// Returns [`AiError::Llm`] when the provider call fails and
/// [`AiError::EmptyReply`] when it succeeds without any text.
pub async fn generate_reply(
    llm: Option<&dyn LlmChat>,
    settings: AiSettings,
    snapshot: &DashboardState,
    user_message: &str,
) -> Result<MessageContent, AiError> {
    let Some(llm) = llm else {
        tokio::time::sleep(settings.mock_delay).await;
        return Ok(MessageContent::rich(MOCK_RESPONSE));
    };

    let prompt = build_prompt(snapshot, user_message);
    let options = GenerateOptions { max_output_tokens: settings.max_output_tokens, web_search: true };
    let reply = llm.chat(&prompt, options).await?;

    info!(
        model = %reply.model,
        input_tokens = reply.input_tokens,
        output_tokens = reply.output_tokens,
        citations = reply.citations.len(),
        "ai: LLM response"
    );

    let text = reply
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or(AiError::EmptyReply)?;
    let mut html = text;
    html.push_str(&format_sources(&reply.citations));
    Ok(MessageContent::rich(html))
}

// =============================================================================
// PROMPT
// =============================================================================

pub(crate) fn build_prompt(snapshot: &DashboardState, user_message: &str) -> String {
    let mut prompt = String::from(
        "You are an AI Copilot for \"BiteBase\", a sophisticated market research dashboard for the restaurant \
         industry. Your goal is to help restaurant owners make data-driven decisions by analyzing the state of \
         their dashboard. You have a complete, real-time view of their screen and access to Google Search for \
         up-to-date information.\n\n\
         Your responses must be insightful, professional, and use HTML for formatting (e.g., <strong>, <br/>, \
         <ul>, <li>). Do not use markdown. Be concise and helpful.\n\n\
         # Current Dashboard State\n",
    );
    let _ = writeln!(prompt, "- The user is currently on the \"{}\" module.", snapshot.active_module);
    prompt.push('\n');
    prompt.push_str(&format_module_context(snapshot));
    prompt.push_str("\n# User's Latest Action/Message\n");
    let _ = writeln!(prompt, "\"{user_message}\"");
    prompt.push_str(
        "\n# Your Task\n\
         Based on the complete dashboard state and the user's message, provide a helpful and context-aware \
         response.\n\
         - If the user's query can be best answered with real-time information (e.g., \"what's the weather\", \
         \"tell me about this landmark\", \"are there any events near...\"), use your search tool.\n\
         - If the user asks for analysis, provide a summary based on the data for the ACTIVE module.\n\
         - If they ask for suggestions, offer strategic advice relevant to the ACTIVE module.\n\
         - If their message describes an action (like switching modules), acknowledge it and briefly describe \
         what the new view shows or suggest an action they can take in this new view.\n",
    );
    prompt
}

// =============================================================================
// SOURCES
// =============================================================================

/// Render grounding citations as an HTML list under a "Sources" label.
/// Citations without a URI are dropped; returns an empty string when none
/// remain.
pub(crate) fn format_sources(citations: &[Citation]) -> String {
    let mut items = String::new();
    for citation in citations {
        let Some(uri) = citation.uri.as_deref().filter(|u| !u.is_empty()) else {
            continue;
        };
        let title = citation.title.as_deref().unwrap_or(uri);
        let _ = write!(
            items,
            "<li><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></li>",
            escape_html(uri),
            escape_html(title)
        );
    }
    if items.is_empty() {
        return String::new();
    }
    format!("<br/><hr style=\"margin: 8px 0;\"/><small><strong>Sources:</strong><ul>{items}</ul></small>")
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "ai_test.rs"]
mod tests;
