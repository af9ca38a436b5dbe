//! LLM providers.
//!
//! This module provides the [`LlmBackend`] trait, one adapter per hosted
//! service, a deterministic stub, credential lookup and the
//! [`ProviderRouter`] that ties them together.

pub mod anthropic;
pub mod backend;
pub mod credentials;
pub mod gemini;
pub mod kind;
pub mod openai;
pub mod router;
pub mod stub;

pub use anthropic::AnthropicBackend;
pub use backend::{BackendError, CompletionRequest, LlmBackend};
pub use credentials::{Credential, CredentialSource, CredentialStore};
pub use gemini::GeminiBackend;
pub use kind::ProviderKind;
pub use openai::ChatCompletionsBackend;
pub use router::{ProviderRouter, RouterError};
pub use stub::StubBackend;
