//! Pipeline configuration models and the configuration document.
//!
//! This module defines the structure of the `agents.yaml` document that
//! declares every agent and every multi-agent review pipeline.

use crate::agent_models::AgentConfig;
use serde::{Deserialize, Serialize};

/// A single step of a pipeline: a reference to an agent by id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PipelineStep {
    /// The `id` of an [`AgentConfig`] declared in the same document.
    pub agent_id: String,
}

impl PipelineStep {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
        }
    }
}

/// Defines a review pipeline: an ordered chain of agents.
///
/// Each step receives the raw output of the previous step as its user
/// prompt; the first step receives the assembled case input.
///
/// # Example
///
/// ```yaml
/// pipelines:
///   - id: standard_510k
///     name: Standard 510(k) Review
///     description: Device summary, then substantial equivalence, then risk.
///     steps:
///       - agent_id: device_summary
///       - agent_id: se_comparison
///       - agent_id: risk_review
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Unique identifier for this pipeline.
    pub id: String,

    /// Human-readable display name.
    pub name: String,

    /// Free-form description shown when listing pipelines.
    #[serde(default)]
    pub description: String,

    /// Ordered steps, executed sequentially.
    #[serde(default)]
    pub steps: Vec<PipelineStep>,
}

impl PipelineConfig {
    /// Agent ids referenced by this pipeline, in step order.
    pub fn agent_ids(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.agent_id.as_str())
    }
}

/// The whole configuration document: every agent and every pipeline.
///
/// A missing document is equivalent to `ReviewConfig::default()`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewConfig {
    #[serde(default)]
    pub agents: Vec<AgentConfig>,

    #[serde(default)]
    pub pipelines: Vec<PipelineConfig>,
}

impl ReviewConfig {
    /// Look up an agent by id.
    pub fn agent(&self, id: &str) -> Option<&AgentConfig> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Look up a pipeline by id, falling back to its display name.
    pub fn pipeline(&self, id_or_name: &str) -> Option<&PipelineConfig> {
        self.pipelines
            .iter()
            .find(|p| p.id == id_or_name)
            .or_else(|| self.pipelines.iter().find(|p| p.name == id_or_name))
    }
}
