//! Deterministic in-process backend for tests and offline runs.
//!
//! The stub interprets the requested model name:
//!
//! - `echo` returns the user prompt unchanged
//! - `uppercase` returns the user prompt uppercased
//! - `fail` returns [`BackendError::Failed`]
//! - any model registered with [`StubBackend::with_response`] returns that text
//! - anything else returns `"[stub:{model}] {user_prompt}"`

use crate::providers::backend::{BackendError, CompletionRequest, LlmBackend};
use crate::providers::credentials::Credential;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub struct StubBackend {
    name: String,
    responses: HashMap<String, String>,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl StubBackend {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            responses: HashMap::new(),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Reply with `response` whenever `model` is requested.
    pub fn with_response(mut self, model: impl Into<String>, response: impl Into<String>) -> Self {
        self.responses.insert(model.into(), response.into());
        self
    }

    /// Number of `complete` calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Copies of every request received, in order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmBackend for StubBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn requires_credential(&self) -> bool {
        false
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
        _credential: Option<&Credential>,
    ) -> Result<String, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        if let Some(response) = self.responses.get(&request.model) {
            return Ok(response.clone());
        }

        match request.model.as_str() {
            "echo" => Ok(request.user_prompt.clone()),
            "uppercase" => Ok(request.user_prompt.to_uppercase()),
            "fail" => Err(BackendError::Failed("stub backend failure".to_string())),
            model => Ok(format!("[stub:{model}] {}", request.user_prompt)),
        }
    }
}
