//! Anthropic Messages API.

use crate::providers::backend::{
    credential_value, send_json, BackendError, CompletionRequest, LlmBackend,
};
use crate::providers::credentials::Credential;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicBackend {
    base_url: String,
    client: Client,
}

impl Default for AnthropicBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AnthropicBackend {
    pub fn new() -> Self {
        Self {
            base_url: ANTHROPIC_BASE_URL.to_string(),
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

    fn endpoint(&self) -> String {
        format!("{}/messages", self.base_url.trim_end_matches('/'))
    }
}

pub fn build_body(request: &CompletionRequest) -> Value {
    json!({
        "model": request.model,
        "max_tokens": request.max_tokens,
        "temperature": request.temperature,
        "system": request.system_prompt,
        "messages": [
            {"role": "user", "content": request.user_prompt},
        ],
    })
}

/// The first `text` content block. A reply without one is returned as
/// pretty-printed JSON so the caller still sees what came back.
pub fn parse_response(response: &Value) -> Result<String, BackendError> {
    let text = response
        .get("content")
        .and_then(Value::as_array)
        .and_then(|blocks| {
            blocks
                .iter()
                .find(|block| block.get("type").and_then(Value::as_str) == Some("text"))
        })
        .and_then(|block| block.get("text"))
        .and_then(Value::as_str);

    match text {
        Some(text) => Ok(text.to_string()),
        None => serde_json::to_string_pretty(response)
            .map_err(|e| BackendError::Decode(e.to_string())),
    }
}

#[async_trait]
impl LlmBackend for AnthropicBackend {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
        credential: Option<&Credential>,
    ) -> Result<String, BackendError> {
        let body = build_body(request);
        debug!(model = %request.model, prompt_bytes = request.user_prompt.len(), "sending anthropic message");

        let response = send_json(
            self.client
                .post(self.endpoint())
                .header("x-api-key", credential_value(credential))
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&body),
        )
        .await?;

        parse_response(&response)
    }
}
