//! Review maturity metrics.
//!
//! Every completed run earns experience; every LLM call spends AI capacity.
//! Capacity and compliance health regenerate on request and after each
//! successful pipeline step.

pub const MAX_GAUGE: u32 = 100;

const EXPERIENCE_PER_RUN: u32 = 10;
const EXPERIENCE_PER_LEVEL: u32 = 50;
const CAPACITY_PER_CALL: u32 = 20;
const CAPACITY_REGEN: u32 = 10;
const HEALTH_REGEN: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewMetrics {
    /// Review maturity level, starting at 1.
    pub level: u32,

    /// Experience towards the next level.
    pub experience: u32,

    pub runs_completed: u32,

    /// AI capacity gauge, 0 to 100.
    pub ai_capacity: u32,

    /// Compliance health gauge, 0 to 100.
    pub compliance_health: u32,
}

impl Default for ReviewMetrics {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0,
            runs_completed: 0,
            ai_capacity: MAX_GAUGE,
            compliance_health: MAX_GAUGE,
        }
    }
}

impl ReviewMetrics {
    /// Experience needed to leave the current level.
    pub fn experience_to_next_level(&self) -> u32 {
        self.level * EXPERIENCE_PER_LEVEL
    }

    /// Record a completed pipeline run. Returns `true` on level-up.
    pub fn record_completed_run(&mut self) -> bool {
        self.experience += EXPERIENCE_PER_RUN;
        self.runs_completed += 1;

        if self.experience >= self.experience_to_next_level() {
            self.level += 1;
            self.experience = 0;
            return true;
        }
        false
    }

    /// Spend capacity for one LLM call, floored at zero.
    pub fn spend_capacity(&mut self) {
        self.ai_capacity = self.ai_capacity.saturating_sub(CAPACITY_PER_CALL);
    }

    pub fn regenerate(&mut self) {
        self.ai_capacity = (self.ai_capacity + CAPACITY_REGEN).min(MAX_GAUGE);
        self.compliance_health = (self.compliance_health + HEALTH_REGEN).min(MAX_GAUGE);
    }
}

/// Milestones unlocked by sustained use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    /// Maturity level 5.
    AdvancedReviewer,
    /// Ten completed pipeline runs.
    CaseExpert,
    /// Fifty logged activities.
    HighEngagement,
    /// Maturity level 10.
    PrincipalArchitect,
}

impl Milestone {
    pub fn description(&self) -> &'static str {
        match self {
            Self::AdvancedReviewer => "Advanced reviewer: maturity level 5 reached",
            Self::CaseExpert => "Case expert: 10 or more review pipelines completed",
            Self::HighEngagement => "High engagement: 50 or more model calls or actions",
            Self::PrincipalArchitect => "Principal review architect: maturity level 10 reached",
        }
    }
}

/// Milestones reached for the given metrics and activity count.
pub fn milestones(metrics: &ReviewMetrics, activity_count: usize) -> Vec<Milestone> {
    let mut reached = Vec::new();
    if metrics.level >= 5 {
        reached.push(Milestone::AdvancedReviewer);
    }
    if metrics.runs_completed >= 10 {
        reached.push(Milestone::CaseExpert);
    }
    if activity_count >= 50 {
        reached.push(Milestone::HighEngagement);
    }
    if metrics.level >= 10 {
        reached.push(Milestone::PrincipalArchitect);
    }
    reached
}
