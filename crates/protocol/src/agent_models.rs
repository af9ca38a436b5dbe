//! Agent configuration models.
//!
//! Agents are declared in the `agents:` list of the configuration document,
//! or as Markdown files with YAML front matter in an `agents/` directory.

use serde::{Deserialize, Serialize};

/// Represents a configured review agent: one LLM persona bound to a provider.
///
/// # Example
///
/// ```yaml
/// agents:
///   - id: device_summary
///     name: Device Summary Analyst
///     provider: openai
///     default_model: gpt-4o-mini
///     system_prompt: |
///       You are an FDA 510(k) reviewer. Summarize the device description.
/// ```
///
/// When loaded from a Markdown file, the front matter holds every field
/// except `system_prompt`, which is taken from the file body.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// Unique identifier for this agent.
    ///
    /// Used to reference the agent in pipeline steps.
    pub id: String,

    /// Human-readable display name.
    pub name: String,

    /// Provider name (e.g. "openai", "gemini", "xai", "anthropic").
    ///
    /// Matched case-insensitively by the provider router.
    pub provider: String,

    /// Model identifier used unless a run supplies a model override.
    pub default_model: String,

    /// System prompt that defines the agent's behavior.
    #[serde(default)]
    pub system_prompt: String,
}
