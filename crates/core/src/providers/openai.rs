//! OpenAI chat completions, also used for xAI (Grok) which speaks the same
//! wire format.

use crate::providers::backend::{
    credential_value, send_json, BackendError, CompletionRequest, LlmBackend,
};
use crate::providers::credentials::Credential;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const XAI_BASE_URL: &str = "https://api.x.ai/v1";

/// A backend for any OpenAI-compatible `/chat/completions` endpoint.
pub struct ChatCompletionsBackend {
    name: String,
    base_url: String,
    client: Client,
}

impl ChatCompletionsBackend {
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    pub fn openai() -> Self {
        Self::new("openai", OPENAI_BASE_URL)
    }

    pub fn xai() -> Self {
        Self::new("xai", XAI_BASE_URL)
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
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

pub fn build_body(request: &CompletionRequest) -> Value {
    json!({
        "model": request.model,
        "messages": [
            {"role": "system", "content": request.system_prompt},
            {"role": "user", "content": request.user_prompt},
        ],
        "max_tokens": request.max_tokens,
        "temperature": request.temperature,
    })
}

/// `choices[0].message.content`.
pub fn parse_response(response: &Value) -> Result<String, BackendError> {
    response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| BackendError::Decode("missing choices[0].message.content".to_string()))
}

#[async_trait]
impl LlmBackend for ChatCompletionsBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
        credential: Option<&Credential>,
    ) -> Result<String, BackendError> {
        let body = build_body(request);
        debug!(backend = %self.name, prompt_bytes = request.user_prompt.len(), "sending chat completion");

        let response = send_json(
            self.client
                .post(self.endpoint())
                .bearer_auth(credential_value(credential))
                .json(&body),
        )
        .await?;

        parse_response(&response)
    }
}
