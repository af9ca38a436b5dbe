use rk_protocol::*;

#[test]
fn test_review_config_deserialization_from_yaml() {
    let yaml_str = r#"
agents:
  - id: device_summary
    name: Device Summary
    provider: openai
    default_model: gpt-4o-mini
    system_prompt: "Summarize the device description."
  - id: risk_review
    name: Risk Review
    provider: Anthropic
    default_model: claude-3-5-sonnet-latest
pipelines:
  - id: full_review
    name: Full 510(k) Review
    description: Summary followed by risk analysis
    steps:
      - agent_id: device_summary
      - agent_id: risk_review
"#;

    let config: ReviewConfig =
        serde_yaml::from_str(yaml_str).expect("Failed to deserialize ReviewConfig");

    assert_eq!(config.agents.len(), 2);
    assert_eq!(config.pipelines.len(), 1);
    assert_eq!(config.agents[1].provider, "Anthropic");
    // system_prompt is optional
    assert_eq!(config.agents[1].system_prompt, "");

    let pipeline = config.pipeline("full_review").expect("pipeline by id");
    assert_eq!(
        pipeline.agent_ids().collect::<Vec<_>>(),
        vec!["device_summary", "risk_review"]
    );
    assert_eq!(
        config.pipeline("Full 510(k) Review").map(|p| p.id.as_str()),
        Some("full_review")
    );
    assert!(config.agent("risk_review").is_some());
    assert!(config.agent("missing").is_none());
}

#[test]
fn test_empty_document_yields_empty_config() {
    let config: ReviewConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
    assert!(config.agents.is_empty());
    assert!(config.pipelines.is_empty());
}

#[test]
fn test_studio_settings_partial_document_keeps_defaults() {
    let settings: StudioSettings = serde_json::from_value(serde_json::json!({
        "default_provider": "gemini",
        "temperature": 0.2
    }))
    .expect("Failed to deserialize StudioSettings");

    assert_eq!(settings.default_provider, "gemini");
    assert_eq!(settings.default_model, "gpt-4o-mini");
    assert_eq!(settings.max_tokens, 1024);
    assert_eq!(settings.highlight_color, "#FF7F50");
    assert!(settings.highlight_keywords.iter().any(|k| k == "510(k)"));
}

#[test]
fn test_run_status_serialization() {
    let json = serde_json::to_value(RunStatus::Running(2)).expect("Failed to serialize RunStatus");
    assert_eq!(json, serde_json::json!({"state": "RUNNING", "step": 2}));

    let json = serde_json::to_value(RunStatus::Completed).expect("Failed to serialize RunStatus");
    assert_eq!(json, serde_json::json!({"state": "COMPLETED"}));

    let deserialized: RunStatus =
        serde_json::from_value(serde_json::json!({"state": "FAILED", "step": 1}))
            .expect("Failed to deserialize RunStatus");
    assert_eq!(deserialized, RunStatus::Failed(1));
    assert!(deserialized.is_terminal());
    assert!(!RunStatus::NotStarted.is_terminal());
}

#[test]
fn test_pipeline_run_serialization() {
    use uuid::Uuid;

    let now = chrono::Utc::now();
    let run = PipelineRun {
        id: Uuid::new_v4(),
        pipeline_id: "full_review".to_string(),
        steps: vec![
            StepOutput::new("device_summary", "summary"),
            StepOutput::new("risk_review", "risks"),
        ],
        started_at: now,
        finished_at: now,
    };

    let json = serde_json::to_string(&run).expect("Failed to serialize PipelineRun");
    let deserialized: PipelineRun =
        serde_json::from_str(&json).expect("Failed to deserialize PipelineRun");

    assert_eq!(deserialized, run);
    assert_eq!(deserialized.final_output(), Some("risks"));
}

#[test]
fn test_run_event_serialization() {
    use uuid::Uuid;

    let run_id = Uuid::new_v4();
    let event = RunEvent::StepCompleted {
        run_id,
        step_index: 0,
        agent_id: "device_summary".to_string(),
    };

    let json = serde_json::to_value(&event).expect("Failed to serialize RunEvent");

    assert_eq!(json["type"], "stepCompleted");
    assert_eq!(json["payload"]["step_index"], 0);
    assert_eq!(json["payload"]["agent_id"], "device_summary");

    let deserialized: RunEvent =
        serde_json::from_value(json).expect("Failed to deserialize RunEvent");
    assert_eq!(deserialized, event);
    assert_eq!(deserialized.run_id(), run_id);
    assert_eq!(deserialized.status(), RunStatus::Running(0));
}

#[test]
fn test_run_event_status() {
    use uuid::Uuid;

    let run_id = Uuid::new_v4();
    let failed = RunEvent::RunFailed {
        run_id,
        step_index: 1,
        error: "agent not found: ghost".to_string(),
    };
    assert_eq!(failed.status(), RunStatus::Failed(1));
    assert_eq!(RunEvent::RunCompleted { run_id }.status(), RunStatus::Completed);
}

#[test]
fn test_entity_payload_tolerates_missing_fields() {
    let entities: Vec<Entity> = serde_json::from_str(
        r#"[{"id": 1, "name": "Predicate device", "type": "regulation"},
            {"id": 2, "name": "Biocompatibility", "type": "test", "description": "ISO 10993"}]"#,
    )
    .expect("Failed to deserialize entities");

    assert_eq!(entities.len(), 2);
    assert_eq!(entities[0].kind, "regulation");
    assert_eq!(entities[0].source_snippet, "");
    assert_eq!(entities[1].description, "ISO 10993");
}

#[test]
fn test_entity_ids_accept_numbers_and_text() {
    let entities: Vec<CorpusEntity> = serde_json::from_str(
        r#"[{"id": 7, "name": "Occlusion alarm"},
            {"id": "E2", "name": "ISO 14971", "source_files": ["risk.pdf"]}]"#,
    )
    .expect("Failed to deserialize entities");

    assert_eq!(entities[0].id, EntityId::Number(7));
    assert_eq!(entities[1].id, EntityId::Text("E2".to_string()));
    assert_eq!(entities[1].id.to_string(), "E2");

    let json = serde_json::to_value(&entities[1]).expect("Failed to serialize entity");
    assert_eq!(json["id"], "E2");
}

#[test]
fn test_word_graph_defaults() {
    let graph: WordGraph = serde_json::from_str(
        r#"{"nodes": [{"id": "risk"}], "edges": [{"source": "risk", "target": "hazard"}]}"#,
    )
    .expect("Failed to deserialize WordGraph");

    assert_eq!(graph.nodes[0].frequency, 1);
    assert_eq!(graph.edges[0].weight, 1);
    assert_eq!(graph.edges[0].note, "");
}

#[test]
fn test_activity_kind_serialization() {
    let entry = ActivityEntry {
        kind: ActivityKind::Call,
        message: "openai/gpt-4o-mini".to_string(),
        sequence: 1,
    };
    let json = serde_json::to_value(&entry).expect("Failed to serialize ActivityEntry");
    assert_eq!(json["kind"], "call");
}
