//! Integration tests for the PipelineExecutor.
//!
//! These tests verify that the executor:
//! - Threads each step's output into the next step
//! - Stops at the first failing step and keeps the completed outputs
//! - Records successful runs in the session and credits the metrics
//! - Emits run events in order

mod common;

use common::*;
use rk_core::engine::{PipelineError, PipelineExecutor, RunRequest, StepError};
use rk_core::providers::{RouterError, StubBackend};
use rk_protocol::run_models::StepOutput;
use rk_protocol::session_models::ActivityKind;
use tokio::sync::mpsc;

/// RED: end-to-end acceptance for the happy path.
///
/// Acceptance criteria:
/// 1. Step 1 receives the initial prompt, step 2 receives step 1's output
/// 2. The run lists `{agent_id, output}` in step order
/// 3. The run is appended to the session history
#[tokio::test]
async fn test_echo_then_uppercase_pipeline() {
    let (router, stub) = stub_router();
    let executor = PipelineExecutor::new(router);
    let mut session = offline_session();

    let config = review_config(
        vec![stub_agent("A1", "echo"), stub_agent("A2", "uppercase")],
        vec![pipeline("shout", &["A1", "A2"])],
    );
    let shout = config.pipeline("shout").expect("pipeline exists");

    let run = executor
        .run(&mut session, &config, shout, &RunRequest::new("hello"))
        .await
        .expect("pipeline should succeed");

    assert_eq!(
        run.steps,
        vec![StepOutput::new("A1", "hello"), StepOutput::new("A2", "HELLO")]
    );
    assert_eq!(run.pipeline_id, "shout");
    assert!(run.finished_at >= run.started_at);

    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history()[0].id, run.id);
    assert_eq!(stub.call_count(), 2);
    assert_eq!(stub.requests()[1].user_prompt, "hello");
}

/// A missing agent in step 2 halts the run after step 1.
#[tokio::test]
async fn test_missing_agent_halts_after_first_step() {
    let (router, stub) = stub_router();
    let executor = PipelineExecutor::new(router);
    let mut session = offline_session();

    let config = review_config(
        vec![stub_agent("first", "echo"), stub_agent("third", "echo")],
        vec![pipeline("broken", &["first", "ghost", "third"])],
    );
    let broken = config.pipeline("broken").expect("pipeline exists");

    let err = executor
        .run(&mut session, &config, broken, &RunRequest::new("case text"))
        .await
        .expect_err("pipeline should fail");

    match &err {
        PipelineError::StepFailed {
            step,
            agent_id,
            completed,
            source,
        } => {
            assert_eq!(*step, 1);
            assert_eq!(agent_id, "ghost");
            assert_eq!(completed.len(), 1);
            assert_eq!(completed[0], StepOutput::new("first", "case text"));
            assert_eq!(*source, StepError::AgentNotFound("ghost".to_string()));
        }
        other => panic!("Expected StepFailed, got {other:?}"),
    }

    assert!(session.history().is_empty());
    assert_eq!(stub.call_count(), 1);
    assert!(session
        .activity()
        .any(|entry| entry.kind == ActivityKind::Error && entry.message.contains("ghost")));
}

#[tokio::test]
async fn test_unsupported_provider_fails_first_step() {
    let (router, stub) = stub_router();
    let executor = PipelineExecutor::new(router);
    let mut session = offline_session();

    let mut agent = stub_agent("a1", "echo");
    agent.provider = "unsupported-x".to_string();
    let config = review_config(vec![agent], vec![pipeline("p", &["a1"])]);

    let err = executor
        .run(
            &mut session,
            &config,
            &config.pipelines[0],
            &RunRequest::new("x"),
        )
        .await
        .expect_err("unsupported provider");

    assert!(matches!(
        err,
        PipelineError::StepFailed {
            step: 0,
            source: StepError::Router(RouterError::UnsupportedProvider(_)),
            ..
        }
    ));
    assert!(err.completed_steps().is_empty());
    assert_eq!(stub.call_count(), 0);
}

#[tokio::test]
async fn test_events_follow_run_lifecycle() {
    let (router, _stub) = stub_router();
    let (events_tx, mut events_rx) = mpsc::channel(100);
    let executor = PipelineExecutor::new(router).with_events(events_tx);
    let mut session = offline_session();

    let config = review_config(
        vec![stub_agent("a", "echo"), stub_agent("b", "echo"), stub_agent("c", "echo")],
        vec![pipeline("three", &["a", "b", "c"])],
    );

    executor
        .run(
            &mut session,
            &config,
            &config.pipelines[0],
            &RunRequest::new("x"),
        )
        .await
        .expect("pipeline should succeed");

    let events = drain_events(&mut events_rx);
    assert_event_sequence(&events);
    assert_eq!(completed_step_indices(&events), vec![0, 1, 2]);
    assert_eq!(events.len(), 8);
}

#[tokio::test]
async fn test_failed_run_emits_run_failed() {
    let (router, _stub) = stub_router();
    let (events_tx, mut events_rx) = mpsc::channel(100);
    let executor = PipelineExecutor::new(router).with_events(events_tx);
    let mut session = offline_session();

    let config = review_config(
        vec![stub_agent("ok", "echo"), stub_agent("bad", "fail")],
        vec![pipeline("p", &["ok", "bad"])],
    );

    let _ = executor
        .run(
            &mut session,
            &config,
            &config.pipelines[0],
            &RunRequest::new("x"),
        )
        .await;

    let events = drain_events(&mut events_rx);
    assert_event_sequence(&events);
    assert!(matches!(
        events.last(),
        Some(rk_protocol::ipc::RunEvent::RunFailed { step_index: 1, .. })
    ));
}

/// Successful steps regenerate capacity; every call spends it.
#[tokio::test]
async fn test_metrics_after_successful_run() {
    let (router, _stub) = stub_router();
    let executor = PipelineExecutor::new(router);
    let mut session = offline_session();

    let config = review_config(
        vec![stub_agent("a", "echo"), stub_agent("b", "echo")],
        vec![pipeline("p", &["a", "b"])],
    );

    executor
        .run(
            &mut session,
            &config,
            &config.pipelines[0],
            &RunRequest::new("x"),
        )
        .await
        .expect("pipeline should succeed");

    // 100 - 20 + 10 - 20 + 10
    assert_eq!(session.metrics.ai_capacity, 80);
    assert_eq!(session.metrics.runs_completed, 1);
    assert_eq!(session.metrics.experience, 10);
    assert_eq!(session.agent_usage().get("a"), Some(&1));
    assert!(session
        .activity()
        .any(|entry| entry.message == "Completed review pipeline: Pipeline p"));
}

#[tokio::test]
async fn test_for_case_prompt_reaches_first_step() {
    let (router, stub) = stub_router_with(StubBackend::new(STUB));
    let executor = PipelineExecutor::new(router);
    let mut session = offline_session();
    let config = review_config(vec![stub_agent("a", "echo")], vec![pipeline("p", &["a"])]);

    let request = RunRequest::for_case("Infusion pump", "Alarm testing incomplete", "");
    let run = executor
        .run(&mut session, &config, &config.pipelines[0], &request)
        .await
        .expect("pipeline should succeed");

    let prompt = &stub.requests()[0].user_prompt;
    assert!(prompt.starts_with("[510(k) Case Input]\nInfusion pump"));
    assert!(prompt.contains("[Review Observations]\nAlarm testing incomplete"));
    assert_eq!(run.final_output(), Some(prompt.as_str()));
}
