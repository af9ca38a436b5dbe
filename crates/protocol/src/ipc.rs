//! Progress events emitted by the pipeline executor.
//!
//! The executor optionally publishes [`RunEvent`]s on a channel so that a
//! front end can display progress while a run is in flight. Events are
//! advisory: a dropped receiver never affects the run itself.
//!
//! Uses tagged enum serialization:
//! ```json
//! {
//!   "type": "stepCompleted",
//!   "payload": { "run_id": "uuid-here", "step_index": 0, "agent_id": "device_summary" }
//! }
//! ```

use crate::run_models::RunStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum RunEvent {
    /// A run has begun.
    RunStarted {
        run_id: Uuid,
        pipeline_id: String,
        total_steps: usize,
    },

    /// A step is about to call its provider.
    StepStarted {
        run_id: Uuid,
        step_index: usize,
        agent_id: String,
        agent_name: String,
    },

    /// A step returned its output.
    StepCompleted {
        run_id: Uuid,
        step_index: usize,
        agent_id: String,
    },

    /// Every step succeeded; the run was appended to history.
    RunCompleted { run_id: Uuid },

    /// A step failed; the run was not appended to history.
    RunFailed {
        run_id: Uuid,
        step_index: usize,
        error: String,
    },
}

impl RunEvent {
    pub fn run_id(&self) -> Uuid {
        match self {
            Self::RunStarted { run_id, .. }
            | Self::StepStarted { run_id, .. }
            | Self::StepCompleted { run_id, .. }
            | Self::RunCompleted { run_id }
            | Self::RunFailed { run_id, .. } => *run_id,
        }
    }

    /// The run status implied by this event.
    pub fn status(&self) -> RunStatus {
        match self {
            Self::RunStarted { .. } => RunStatus::Running(0),
            Self::StepStarted { step_index, .. } | Self::StepCompleted { step_index, .. } => {
                RunStatus::Running(*step_index)
            }
            Self::RunCompleted { .. } => RunStatus::Completed,
            Self::RunFailed { step_index, .. } => RunStatus::Failed(*step_index),
        }
    }
}
