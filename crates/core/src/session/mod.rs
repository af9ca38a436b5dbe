//! Per-session review state.
//!
//! A [`ReviewSession`] owns everything that lives for the duration of one
//! review: case inputs, credentials, run history, the activity log, metrics
//! and corpus Q&A history. It is passed by `&mut` to the operations that
//! change it; nothing here is shared between tasks.

pub mod metrics;

pub use metrics::{milestones, Milestone, ReviewMetrics};

use crate::providers::credentials::CredentialStore;
use rk_protocol::config_models::StudioSettings;
use rk_protocol::notes_models::QaExchange;
use rk_protocol::run_models::PipelineRun;
use rk_protocol::session_models::{ActivityEntry, ActivityKind};
use std::collections::{BTreeMap, VecDeque};

/// Maximum number of activity entries kept; older entries are dropped.
pub const ACTIVITY_LOG_CAPACITY: usize = 200;

#[derive(Debug, Clone)]
pub struct ReviewSession {
    /// 510(k) case template text.
    pub template: String,

    /// Reviewer observation notes.
    pub observations: String,

    pub settings: StudioSettings,

    pub credentials: CredentialStore,

    pub metrics: ReviewMetrics,

    history: Vec<PipelineRun>,
    activity: VecDeque<ActivityEntry>,
    next_sequence: u64,
    qa_history: Vec<QaExchange>,
}

impl Default for ReviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewSession {
    /// A fresh session with default settings and credentials read from the
    /// environment.
    pub fn new() -> Self {
        Self::with_credentials(StudioSettings::default(), CredentialStore::new())
    }

    pub fn with_settings(settings: StudioSettings) -> Self {
        Self::with_credentials(settings, CredentialStore::new())
    }

    pub fn with_credentials(settings: StudioSettings, credentials: CredentialStore) -> Self {
        Self {
            template: String::new(),
            observations: String::new(),
            settings,
            credentials,
            metrics: ReviewMetrics::default(),
            history: Vec::new(),
            activity: VecDeque::new(),
            next_sequence: 1,
            qa_history: Vec::new(),
        }
    }

    /// Append an activity entry, evicting the oldest beyond capacity.
    pub fn log_activity(&mut self, kind: ActivityKind, message: impl Into<String>) {
        self.activity.push_back(ActivityEntry {
            kind,
            message: message.into(),
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;

        while self.activity.len() > ACTIVITY_LOG_CAPACITY {
            self.activity.pop_front();
        }
    }

    /// Activity entries, oldest first.
    pub fn activity(&self) -> impl DoubleEndedIterator<Item = &ActivityEntry> {
        self.activity.iter()
    }

    pub fn activity_len(&self) -> usize {
        self.activity.len()
    }

    /// Append a completed run to history and credit the metrics.
    ///
    /// Returns `true` when the run caused a level-up.
    pub fn record_run(&mut self, run: PipelineRun) -> bool {
        self.history.push(run);
        self.metrics.record_completed_run()
    }

    /// Completed runs, oldest first.
    pub fn history(&self) -> &[PipelineRun] {
        &self.history
    }

    /// How often each agent appears across all runs in history.
    pub fn agent_usage(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for step in self.history.iter().flat_map(|run| run.steps.iter()) {
            *counts.entry(step.agent_id.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn milestones(&self) -> Vec<Milestone> {
        milestones(&self.metrics, self.activity.len())
    }

    /// Restore AI capacity and compliance health.
    pub fn regenerate(&mut self) {
        self.metrics.regenerate();
        self.log_activity(ActivityKind::Success, "AI capacity and compliance health restored");
    }

    pub fn record_qa(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.qa_history.push(QaExchange {
            question: question.into(),
            answer: answer.into(),
        });
    }

    pub fn qa_history(&self) -> &[QaExchange] {
        &self.qa_history
    }
}
