//! Pipeline run models.
//!
//! A [`PipelineRun`] is the record of one successful execution of a
//! pipeline. Runs are created by the executor, appended to the session
//! history and never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a single pipeline execution.
///
/// `NotStarted -> Running(i) -> Completed`, or `Running(i) -> Failed(i)`.
/// Step indices are zero-based.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "state", content = "step", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    NotStarted,
    Running(usize),
    Completed,
    Failed(usize),
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed(_))
    }
}

/// The output of one pipeline step.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StepOutput {
    /// Id of the agent that produced the output.
    pub agent_id: String,

    /// Raw text returned by the provider.
    pub output: String,
}

impl StepOutput {
    pub fn new(agent_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            output: output.into(),
        }
    }
}

/// Record of one completed pipeline execution.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PipelineRun {
    /// Unique identifier for this run.
    pub id: Uuid,

    /// Id of the pipeline that was executed.
    pub pipeline_id: String,

    /// Step outputs in execution order.
    pub steps: Vec<StepOutput>,

    pub started_at: DateTime<Utc>,

    pub finished_at: DateTime<Utc>,
}

impl PipelineRun {
    /// Output of the last step, i.e. the pipeline's final answer.
    pub fn final_output(&self) -> Option<&str> {
        self.steps.last().map(|s| s.output.as_str())
    }
}
