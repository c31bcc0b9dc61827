//! OpenAI-compatible Responses API client.
//!
//! Sends a single prompt to `/responses`, optionally with the
//! `web_search_preview` tool. Web sources come back as `url_citation`
//! annotations on the output text parts.

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::config::LlmTimeouts;
use super::types::{Citation, GenerateOptions, GeneratedReply, LlmError};

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the HTTP client cannot be constructed.
    pub fn new(api_key: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url })
    }

    /// # Errors
    ///
    /// Returns [`LlmError::ApiResponse`] when the endpoint answers with a non-2xx
    /// status, [`LlmError::ApiRequest`] on transport failure, and
    /// [`LlmError::ApiParse`] on a malformed body.
    pub async fn chat(
        &self,
        model: &str,
        prompt: &str,
        options: GenerateOptions,
    ) -> Result<GeneratedReply, LlmError> {
        let tools = if options.web_search { vec![RespToolDef { tool_type: "web_search_preview" }] } else { Vec::new() };
        let body = RespRequest { model, max_output_tokens: options.max_output_tokens, input: prompt, tools };
        let text = self.send_json("/responses", &body).await?;
        parse_responses_response(&text)
    }

    async fn send_json(&self, path: &str, body: &impl Serialize) -> Result<String, LlmError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(LlmError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}

// =============================================================================
// RESPONSES WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct RespRequest<'a> {
    model: &'a str,
    max_output_tokens: u32,
    input: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<RespToolDef>,
}

#[derive(Serialize)]
struct RespToolDef {
    #[serde(rename = "type")]
    tool_type: &'static str,
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

pub(crate) fn parse_responses_response(json_text: &str) -> Result<GeneratedReply, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    if !root.is_object() {
        return Err(LlmError::ApiParse("responses: expected a JSON object".to_string()));
    }
    let model = root
        .get("model")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default();
    let input_tokens = root
        .get("usage")
        .and_then(|u| u.get("input_tokens"))
        .and_then(Value::as_u64)
        .unwrap_or(0);
    let output_tokens = root
        .get("usage")
        .and_then(|u| u.get("output_tokens"))
        .and_then(Value::as_u64)
        .unwrap_or(0);

    let mut text = String::new();
    let mut citations = Vec::new();
    if let Some(items) = root.get("output").and_then(Value::as_array) {
        for item in items {
            if item.get("type").and_then(Value::as_str) != Some("message") {
                continue;
            }
            let Some(parts) = item.get("content").and_then(Value::as_array) else {
                continue;
            };
            for part in parts {
                if part.get("type").and_then(Value::as_str) != Some("output_text") {
                    continue;
                }
                if let Some(t) = part.get("text").and_then(Value::as_str) {
                    text.push_str(t);
                }
                let annotations = part.get("annotations").and_then(Value::as_array);
                for annotation in annotations.into_iter().flatten() {
                    if annotation.get("type").and_then(Value::as_str) != Some("url_citation") {
                        continue;
                    }
                    citations.push(Citation {
                        uri: annotation.get("url").and_then(Value::as_str).map(str::to_owned),
                        title: annotation.get("title").and_then(Value::as_str).map(str::to_owned),
                    });
                }
            }
        }
    } else if let Some(output_text) = root.get("output_text").and_then(Value::as_str) {
        text.push_str(output_text);
    }

    Ok(GeneratedReply {
        text: if text.is_empty() { None } else { Some(text) },
        citations,
        model,
        input_tokens,
        output_tokens,
    })
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
