//! Provider router.
//!
//! The router owns a registry of [`LlmBackend`]s keyed by lowercase name
//! and turns "provider + request" into one backend call.

use crate::providers::anthropic::AnthropicBackend;
use crate::providers::backend::{BackendError, CompletionRequest, LlmBackend};
use crate::providers::gemini::GeminiBackend;
use crate::providers::kind::normalize_name;
use crate::providers::openai::ChatCompletionsBackend;
use crate::session::ReviewSession;
use rk_protocol::pipeline_models::ReviewConfig;
use rk_protocol::session_models::ActivityKind;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouterError {
    #[error("no API key available for provider '{0}'")]
    CredentialMissing(String),

    #[error("unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Dispatches completion calls to registered backends.
///
/// # Example
///
/// ```rust,no_run
/// use rk_core::providers::{CompletionRequest, ProviderRouter};
/// use rk_core::session::ReviewSession;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let router = ProviderRouter::with_defaults();
/// let mut session = ReviewSession::new();
/// let request = CompletionRequest::new("gpt-4o-mini", "You are a 510(k) reviewer.", "Hello");
/// let text = router.complete(&mut session, "openai", &request).await?;
/// println!("{text}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct ProviderRouter {
    backends: HashMap<String, Arc<dyn LlmBackend>>,
}

impl ProviderRouter {
    /// A router with no backends.
    pub fn new() -> Self {
        Self::default()
    }

    /// A router with the four hosted backends: openai, gemini, xai, anthropic.
    pub fn with_defaults() -> Self {
        Self::new()
            .with_backend(Arc::new(ChatCompletionsBackend::openai()))
            .with_backend(Arc::new(GeminiBackend::new()))
            .with_backend(Arc::new(ChatCompletionsBackend::xai()))
            .with_backend(Arc::new(AnthropicBackend::new()))
    }

    /// Register a backend under its name, replacing any previous one.
    pub fn register(&mut self, backend: Arc<dyn LlmBackend>) {
        self.backends.insert(normalize_name(backend.name()), backend);
    }

    pub fn with_backend(mut self, backend: Arc<dyn LlmBackend>) -> Self {
        self.register(backend);
        self
    }

    pub fn supports(&self, provider: &str) -> bool {
        self.backends.contains_key(&normalize_name(provider))
    }

    /// Registered provider names, sorted.
    pub fn providers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.backends.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Run one completion.
    ///
    /// Each call is logged to the session activity and spends AI capacity,
    /// whether or not it succeeds. Parameter, provider and credential
    /// problems are reported before the backend is contacted.
    pub async fn complete(
        &self,
        session: &mut ReviewSession,
        provider: &str,
        request: &CompletionRequest,
    ) -> Result<String, RouterError> {
        let provider = normalize_name(provider);

        info!(provider = %provider, model = %request.model, "calling LLM");
        session.log_activity(
            ActivityKind::Call,
            format!("Calling {provider} model {}", request.model),
        );
        session.metrics.spend_capacity();

        let backend = self
            .backends
            .get(&provider)
            .ok_or_else(|| RouterError::UnsupportedProvider(provider.clone()))?;

        validate_parameters(request)?;

        let credential = if backend.requires_credential() {
            Some(
                session
                    .credentials
                    .get(&provider)
                    .ok_or_else(|| RouterError::CredentialMissing(provider.clone()))?,
            )
        } else {
            None
        };

        backend
            .complete(request, credential.as_ref())
            .await
            .map_err(|err| {
                warn!(provider = %provider, error = %err, "LLM call failed");
                RouterError::Backend(err)
            })
    }

    /// Check that every agent in `config` names a registered provider.
    pub fn validate_config(&self, config: &ReviewConfig) -> Result<(), RouterError> {
        for agent in &config.agents {
            if !self.supports(&agent.provider) {
                return Err(RouterError::UnsupportedProvider(format!(
                    "{} (agent '{}')",
                    agent.provider, agent.id
                )));
            }
        }
        Ok(())
    }
}

fn validate_parameters(request: &CompletionRequest) -> Result<(), RouterError> {
    if request.max_tokens == 0 {
        return Err(RouterError::InvalidParameters(
            "max_tokens must be greater than 0".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&request.temperature) {
        return Err(RouterError::InvalidParameters(format!(
            "temperature must be within [0, 1], got {}",
            request.temperature
        )));
    }
    Ok(())
}
