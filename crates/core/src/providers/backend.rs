//! The backend trait and the types shared by every backend.

use crate::providers::credentials::Credential;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Parameters of one completion call. The provider is chosen separately.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub max_tokens: u32,
    /// Sampling temperature in `[0, 1]`.
    pub temperature: f64,
}

impl CompletionRequest {
    /// A request with the default sampling parameters: 512 tokens at 0.7.
    pub fn new(
        model: impl Into<String>,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            max_tokens: 512,
            temperature: 0.7,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

/// A failure reported by a backend. Propagated to callers unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("could not decode provider response: {0}")]
    Decode(String),

    #[error("{0}")]
    Failed(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// One hosted LLM service.
///
/// Implementations make a single attempt and return the primary text of
/// the reply.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Lowercase name under which the backend is registered.
    fn name(&self) -> &str;

    /// Whether calls need an API key. The router checks this before calling.
    fn requires_credential(&self) -> bool {
        true
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
        credential: Option<&Credential>,
    ) -> Result<String, BackendError>;
}

/// Send a prepared request and decode a JSON body, mapping non-2xx statuses
/// to [`BackendError::Status`].
pub(crate) async fn send_json(request: reqwest::RequestBuilder) -> Result<Value, BackendError> {
    let resp = request.send().await?;

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(BackendError::Status { status, body });
    }

    Ok(resp.json::<Value>().await?)
}

pub(crate) fn credential_value(credential: Option<&Credential>) -> &str {
    credential.map(Credential::expose).unwrap_or_default()
}
