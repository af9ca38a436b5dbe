//! Google Gemini `generateContent`.
//!
//! Gemini receives the system prompt and the user prompt as a single user
//! turn, separated by a `USER MESSAGE:` marker.

use crate::providers::backend::{
    credential_value, send_json, BackendError, CompletionRequest, LlmBackend,
};
use crate::providers::credentials::Credential;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiBackend {
    base_url: String,
    client: Client,
}

impl Default for GeminiBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl GeminiBackend {
    pub fn new() -> Self {
        Self {
            base_url: GEMINI_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Use a preconfigured HTTP client, e.g. one with timeouts or a proxy.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{model}:generateContent",
            self.base_url.trim_end_matches('/')
        )
    }
}

/// The single text turn sent to Gemini.
pub fn combined_prompt(request: &CompletionRequest) -> String {
    format!(
        "{}\n\nUSER MESSAGE:\n{}",
        request.system_prompt, request.user_prompt
    )
}

pub fn build_body(request: &CompletionRequest) -> Value {
    json!({
        "contents": [
            {"role": "user", "parts": [{"text": combined_prompt(request)}]}
        ],
        "generationConfig": {
            "maxOutputTokens": request.max_tokens,
            "temperature": request.temperature,
        },
    })
}

/// Concatenated text of `candidates[0].content.parts`.
pub fn parse_response(response: &Value) -> Result<String, BackendError> {
    let Some(parts) = response
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
    else {
        let reason = response
            .pointer("/promptFeedback/blockReason")
            .and_then(Value::as_str)
            .map(|r| format!("prompt blocked: {r}"))
            .unwrap_or_else(|| "missing candidates[0].content.parts".to_string());
        return Err(BackendError::Decode(reason));
    };

    Ok(parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect())
}

#[async_trait]
impl LlmBackend for GeminiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
        credential: Option<&Credential>,
    ) -> Result<String, BackendError> {
        let body = build_body(request);
        debug!(model = %request.model, prompt_bytes = request.user_prompt.len(), "sending gemini request");

        let response = send_json(
            self.client
                .post(self.endpoint(&request.model))
                .query(&[("key", credential_value(credential))])
                .json(&body),
        )
        .await?;

        parse_response(&response)
    }
}
