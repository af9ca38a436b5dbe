//! Pipeline execution engine.
//!
//! The PipelineExecutor runs the steps of a review pipeline sequentially.
//! Each step resolves its agent, calls the provider router and hands its
//! raw output to the next step as the user prompt.

use crate::providers::backend::CompletionRequest;
use crate::providers::router::{ProviderRouter, RouterError};
use crate::session::ReviewSession;
use chrono::Utc;
use rk_protocol::agent_models::AgentConfig;
use rk_protocol::config_models::StudioSettings;
use rk_protocol::ipc::RunEvent;
use rk_protocol::pipeline_models::{PipelineConfig, ReviewConfig};
use rk_protocol::run_models::{PipelineRun, StepOutput};
use rk_protocol::session_models::ActivityKind;
use thiserror::Error;
use tokio::sync::mpsc::Sender;
use tracing::{info, warn};
use uuid::Uuid;

pub const CASE_INPUT_HEADER: &str = "[510(k) Case Input]";
pub const OBSERVATIONS_HEADER: &str = "[Review Observations]";
pub const INSTRUCTIONS_HEADER: &str = "[Additional Instructions]";

/// Why a single step failed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StepError {
    #[error("agent not found: {0}")]
    AgentNotFound(String),

    #[error(transparent)]
    Router(#[from] RouterError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("pipeline '{0}' has no steps")]
    EmptyPipeline(String),

    /// Step `step` (zero-based) failed. `completed` holds the outputs of the
    /// steps before it.
    #[error("step {} ({agent_id}) failed: {source}", .step + 1)]
    StepFailed {
        step: usize,
        agent_id: String,
        completed: Vec<StepOutput>,
        source: StepError,
    },
}

impl PipelineError {
    /// Outputs of the steps that finished before the failure.
    pub fn completed_steps(&self) -> &[StepOutput] {
        match self {
            Self::EmptyPipeline(_) => &[],
            Self::StepFailed { completed, .. } => completed,
        }
    }
}

/// Build the first step's user prompt from the case inputs.
pub fn build_initial_prompt(template: &str, observations: &str, instructions: &str) -> String {
    format!(
        "{CASE_INPUT_HEADER}\n{template}\n\n{OBSERVATIONS_HEADER}\n{observations}\n\n{INSTRUCTIONS_HEADER}\n{instructions}"
    )
}

/// Caller-supplied parameters for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRequest {
    /// User prompt of the first step.
    pub initial_prompt: String,

    /// Replaces every agent's provider when set.
    pub provider_override: Option<String>,

    /// Replaces every agent's model when set.
    pub model_override: Option<String>,

    pub max_tokens: u32,

    pub temperature: f64,
}

impl RunRequest {
    /// A request with the sampling defaults of [`StudioSettings`].
    pub fn new(initial_prompt: impl Into<String>) -> Self {
        let defaults = StudioSettings::default();
        Self {
            initial_prompt: initial_prompt.into(),
            provider_override: None,
            model_override: None,
            max_tokens: defaults.max_tokens,
            temperature: defaults.temperature,
        }
    }

    /// A request whose initial prompt is assembled from the case inputs.
    pub fn for_case(template: &str, observations: &str, instructions: &str) -> Self {
        Self::new(build_initial_prompt(template, observations, instructions))
    }

    pub fn with_settings(mut self, settings: &StudioSettings) -> Self {
        self.max_tokens = settings.max_tokens;
        self.temperature = settings.temperature;
        self
    }

    /// Blank values count as no override.
    pub fn with_provider_override(mut self, provider: Option<String>) -> Self {
        self.provider_override = provider.filter(|p| !p.trim().is_empty());
        self
    }

    /// Blank values count as no override.
    pub fn with_model_override(mut self, model: Option<String>) -> Self {
        self.model_override = model.filter(|m| !m.trim().is_empty());
        self
    }
}

/// Sequential multi-agent pipeline executor.
pub struct PipelineExecutor {
    router: ProviderRouter,
    events_tx: Option<Sender<RunEvent>>,
}

impl PipelineExecutor {
    pub fn new(router: ProviderRouter) -> Self {
        Self {
            router,
            events_tx: None,
        }
    }

    /// Publish progress events on `events_tx`.
    pub fn with_events(mut self, events_tx: Sender<RunEvent>) -> Self {
        self.events_tx = Some(events_tx);
        self
    }

    pub fn router(&self) -> &ProviderRouter {
        &self.router
    }

    /// Execute `pipeline` and return the recorded run.
    ///
    /// On success the run is appended to the session history and the
    /// metrics are credited. On failure nothing is appended; the error
    /// carries the outputs of the steps that did complete.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::EmptyPipeline`] before any call
    /// - [`PipelineError::StepFailed`] for an unknown agent or a failed call
    pub async fn run(
        &self,
        session: &mut ReviewSession,
        config: &ReviewConfig,
        pipeline: &PipelineConfig,
        request: &RunRequest,
    ) -> Result<PipelineRun, PipelineError> {
        if pipeline.steps.is_empty() {
            return Err(PipelineError::EmptyPipeline(pipeline.id.clone()));
        }

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();

        info!(run_id = %run_id, pipeline = %pipeline.id, steps = pipeline.steps.len(), "pipeline started");
        self.emit(RunEvent::RunStarted {
            run_id,
            pipeline_id: pipeline.id.clone(),
            total_steps: pipeline.steps.len(),
        })
        .await;

        let mut outputs: Vec<StepOutput> = Vec::with_capacity(pipeline.steps.len());
        let mut current_input = request.initial_prompt.clone();

        for (step_index, step) in pipeline.steps.iter().enumerate() {
            let result = match config.agent(&step.agent_id) {
                Some(agent) => {
                    self.emit(RunEvent::StepStarted {
                        run_id,
                        step_index,
                        agent_id: agent.id.clone(),
                        agent_name: agent.name.clone(),
                    })
                    .await;

                    self.run_agent(session, agent, &current_input, request)
                        .await
                        .map_err(StepError::from)
                }
                None => Err(StepError::AgentNotFound(step.agent_id.clone())),
            };

            match result {
                Ok(output) => {
                    info!(run_id = %run_id, step = step_index + 1, agent = %step.agent_id, "step completed");
                    session.metrics.regenerate();
                    outputs.push(StepOutput::new(step.agent_id.clone(), output.clone()));
                    current_input = output;

                    self.emit(RunEvent::StepCompleted {
                        run_id,
                        step_index,
                        agent_id: step.agent_id.clone(),
                    })
                    .await;
                }
                Err(source) => {
                    warn!(run_id = %run_id, step = step_index + 1, agent = %step.agent_id, error = %source, "pipeline stopped");
                    session.log_activity(
                        ActivityKind::Error,
                        format!("Review pipeline stopped at agent {}", step.agent_id),
                    );

                    self.emit(RunEvent::RunFailed {
                        run_id,
                        step_index,
                        error: source.to_string(),
                    })
                    .await;

                    return Err(PipelineError::StepFailed {
                        step: step_index,
                        agent_id: step.agent_id.clone(),
                        completed: outputs,
                        source,
                    });
                }
            }
        }

        let run = PipelineRun {
            id: run_id,
            pipeline_id: pipeline.id.clone(),
            steps: outputs,
            started_at,
            finished_at: Utc::now(),
        };

        session.log_activity(
            ActivityKind::Success,
            format!("Completed review pipeline: {}", pipeline.name),
        );
        if session.record_run(run.clone()) {
            session.log_activity(
                ActivityKind::Success,
                format!("Review maturity increased to level {}", session.metrics.level),
            );
        }

        info!(run_id = %run_id, pipeline = %pipeline.id, "pipeline completed");
        self.emit(RunEvent::RunCompleted { run_id }).await;

        Ok(run)
    }

    /// Call one agent with `user_prompt`, applying the request's overrides.
    pub async fn run_agent(
        &self,
        session: &mut ReviewSession,
        agent: &AgentConfig,
        user_prompt: &str,
        request: &RunRequest,
    ) -> Result<String, RouterError> {
        let provider = request
            .provider_override
            .as_deref()
            .unwrap_or(&agent.provider);
        let model = request
            .model_override
            .as_deref()
            .unwrap_or(&agent.default_model);

        let completion = CompletionRequest::new(model, agent.system_prompt.clone(), user_prompt)
            .with_max_tokens(request.max_tokens)
            .with_temperature(request.temperature);

        self.router.complete(session, provider, &completion).await
    }

    async fn emit(&self, event: RunEvent) {
        if let Some(tx) = &self.events_tx {
            let _ = tx.send(event).await;
        }
    }
}
