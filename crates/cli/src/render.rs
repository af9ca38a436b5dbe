//! Terminal rendering of runs, listings and session state.

use colored::{ColoredString, Colorize};
use rk_core::session::ReviewSession;
use rk_protocol::pipeline_models::ReviewConfig;
use rk_protocol::run_models::PipelineRun;
use rk_protocol::session_models::{ActivityEntry, ActivityKind};
use rk_protocol::RunEvent;

/// One progress line for a run event.
pub fn event_line(event: &RunEvent) -> String {
    match event {
        RunEvent::RunStarted {
            pipeline_id,
            total_steps,
            ..
        } => format!(
            "{} pipeline {} ({total_steps} steps)",
            "▶".cyan(),
            pipeline_id.bold()
        ),
        RunEvent::StepStarted {
            step_index,
            agent_id,
            agent_name,
            ..
        } => format!(
            "  {} step {} {agent_name} ({agent_id})",
            "…".yellow(),
            step_index + 1
        ),
        RunEvent::StepCompleted {
            step_index,
            agent_id,
            ..
        } => format!("  {} step {} {agent_id}", "✓".green(), step_index + 1),
        RunEvent::RunCompleted { .. } => format!("{} run completed", "✓".green().bold()),
        RunEvent::RunFailed {
            step_index, error, ..
        } => format!(
            "{} run failed at step {}: {error}",
            "✗".red().bold(),
            step_index + 1
        ),
    }
}

pub fn print_run(run: &PipelineRun) {
    for (index, step) in run.steps.iter().enumerate() {
        println!();
        println!(
            "{}",
            format!("── Step {}: {} ──", index + 1, step.agent_id).bold()
        );
        println!("{}", step.output);
    }
}

pub fn print_agents(config: &ReviewConfig) {
    if config.agents.is_empty() {
        println!("No agents configured.");
        return;
    }
    for agent in &config.agents {
        println!(
            "{}  {}  {}/{}",
            agent.id.bold(),
            agent.name,
            agent.provider.cyan(),
            agent.default_model
        );
    }
}

pub fn print_pipelines(config: &ReviewConfig) {
    if config.pipelines.is_empty() {
        println!("No pipelines configured.");
        return;
    }
    for pipeline in &config.pipelines {
        println!("{}  {}", pipeline.id.bold(), pipeline.name);
        if !pipeline.description.is_empty() {
            println!("    {}", pipeline.description.dimmed());
        }
        let steps: Vec<String> = pipeline
            .agent_ids()
            .map(|id| {
                if config.agent(id).is_some() {
                    id.to_string()
                } else {
                    format!("{} (missing)", id.red())
                }
            })
            .collect();
        println!("    {}", steps.join(" → "));
    }
}

fn activity_marker(kind: ActivityKind) -> ColoredString {
    let marker = kind.marker();
    match kind {
        ActivityKind::Info => marker.normal(),
        ActivityKind::Success => marker.green(),
        ActivityKind::Warning => marker.yellow(),
        ActivityKind::Error => marker.red(),
        ActivityKind::Call => marker.cyan(),
    }
}

fn activity_line(entry: &ActivityEntry) -> String {
    format!(
        "{:>4} [{}] {}",
        entry.sequence,
        activity_marker(entry.kind),
        entry.message
    )
}

/// Print the most recent `limit` activity entries, oldest first.
pub fn print_activity(session: &ReviewSession, limit: usize) {
    let skip = session.activity_len().saturating_sub(limit);
    for entry in session.activity().skip(skip) {
        eprintln!("{}", activity_line(entry));
    }
}

pub fn print_metrics(session: &ReviewSession) {
    let metrics = &session.metrics;
    println!("{}", "Review metrics".bold());
    println!(
        "  level {}  experience {}/{}",
        metrics.level,
        metrics.experience,
        metrics.experience_to_next_level()
    );
    println!("  runs completed     {}", metrics.runs_completed);
    println!("  AI capacity        {}", metrics.ai_capacity);
    println!("  compliance health  {}", metrics.compliance_health);

    let milestones = session.milestones();
    if !milestones.is_empty() {
        println!("{}", "Milestones".bold());
        for milestone in milestones {
            println!("  {} {}", "★".yellow(), milestone.description());
        }
    }

    let usage = session.agent_usage();
    if !usage.is_empty() {
        println!("{}", "Agent usage".bold());
        for (agent, count) in usage {
            println!("  {agent:<24} {count}");
        }
    }
}
