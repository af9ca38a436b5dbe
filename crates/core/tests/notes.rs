//! Integration tests for the note tools.
//!
//! The stub backend is primed with canned replies per model so each tool's
//! parsing and session side effects can be checked end to end.

mod common;

use common::*;
use rk_core::notes::{
    entity_table, mind_map_to_dot, word_graph_to_dot, NoteError, NoteKeeper, NoteTool,
    StructuredError,
};
use rk_core::providers::StubBackend;

const ENTITIES_REPLY: &str = r#"```json
[
  {"id": 1, "name": "ISO 14971", "type": "regulation", "description": "Risk management", "source_snippet": "per ISO 14971"},
  {"id": 2, "name": "Occlusion alarm", "type": "test"}
]
```"#;

const MIND_MAP_REPLY: &str = r#"Here is the map:
{"nodes": [{"id": "pump", "label": "Infusion Pump", "type": "device"}, {"id": "occ", "label": "Occlusion", "type": "risk"}],
 "edges": [{"source": "pump", "target": "occ", "relation": "may cause"}]}"#;

const WORD_GRAPH_REPLY: &str = r#"{"nodes": [{"id": "alarm", "label": "alarm", "frequency": 2}], "edges": []}"#;

fn keeper(stub: StubBackend) -> (NoteKeeper, std::sync::Arc<StubBackend>) {
    let (router, stub) = stub_router_with(stub);
    (NoteKeeper::new(router).with_provider(STUB), stub)
}

/// RED: fenced entity JSON parses and renders as a table.
#[tokio::test]
async fn test_extract_entities() {
    let (keeper, stub) = keeper(StubBackend::new(STUB).with_response("entities", ENTITIES_REPLY));
    let keeper = keeper.with_model("entities");
    let mut session = offline_session();

    let entities = keeper
        .extract_entities(&mut session, "The pump follows ISO 14971.")
        .await
        .expect("entities parse");

    assert_eq!(entities.len(), 2);
    assert_eq!(entities[0].kind, "regulation");
    assert_eq!(entities[1].description, "");

    let request = &stub.requests()[0];
    assert_eq!(request.system_prompt, NoteTool::Entities.system_prompt());
    assert_eq!(request.max_tokens, 1024);
    assert_eq!(request.temperature, 0.2);

    let table = entity_table(&entities);
    assert!(table.contains("| 1 | ISO 14971 | regulation | Risk management | per ISO 14971 |"));
}

#[tokio::test]
async fn test_mind_map_and_word_graph() {
    let stub = StubBackend::new(STUB)
        .with_response("map", MIND_MAP_REPLY)
        .with_response("words", WORD_GRAPH_REPLY);
    let (router, _stub) = stub_router_with(stub);
    let mut session = offline_session();

    let map = NoteKeeper::new(router.clone())
        .with_provider(STUB)
        .with_model("map")
        .mind_map(&mut session, "text")
        .await
        .expect("mind map parses");
    assert!(mind_map_to_dot(&map).contains("\"pump\" -> \"occ\" [label=\"may cause\"];"));

    let graph = NoteKeeper::new(router)
        .with_provider(STUB)
        .with_model("words")
        .word_graph(&mut session, "text")
        .await
        .expect("word graph parses");
    assert!(word_graph_to_dot(&graph).contains("fontsize=14"));
}

#[tokio::test]
async fn test_malformed_reply_carries_text() {
    let (keeper, _stub) =
        keeper(StubBackend::new(STUB).with_response("chatty", "Sorry, I cannot do that."));
    let keeper = keeper.with_model("chatty");
    let mut session = offline_session();

    match keeper.mind_map(&mut session, "text").await {
        Err(NoteError::Structured(StructuredError::Malformed { text, .. })) => {
            assert_eq!(text, "Sorry, I cannot do that.");
        }
        other => panic!("Expected Malformed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_defaults_come_from_settings() {
    let (router, stub) = stub_router();
    let mut session = offline_session();
    session.settings.default_provider = STUB.to_string();
    session.settings.default_model = "echo".to_string();
    session.settings.max_tokens = 4000;

    let markdown = NoteKeeper::new(router)
        .to_markdown(&mut session, "raw text")
        .await
        .expect("markdown");

    assert_eq!(markdown, "raw text");
    let request = &stub.requests()[0];
    assert_eq!(request.model, "echo");
    assert_eq!(request.max_tokens, 4000);
    assert_eq!(request.temperature, 0.1);
}

#[tokio::test]
async fn test_ask_corpus_records_exchange() {
    let (keeper, stub) =
        keeper(StubBackend::new(STUB).with_response("qa", "File 1 supports the SE claim."));
    let keeper = keeper.with_model("qa");
    let mut session = offline_session();

    let answer = keeper
        .ask_corpus(&mut session, "## File 1: a.pdf\n\nSE table", "Is SE supported?")
        .await
        .expect("answer");

    assert_eq!(answer, "File 1 supports the SE claim.");
    assert_eq!(session.qa_history().len(), 1);
    assert_eq!(session.qa_history()[0].question, "Is SE supported?");

    let request = &stub.requests()[0];
    assert!(request
        .user_prompt
        .starts_with("=== COMBINED OCR DOCUMENTS START ===\n## File 1: a.pdf"));
    assert!(request.user_prompt.ends_with("User question:\nIs SE supported?"));
    assert_eq!(request.max_tokens, 1200);
}

#[tokio::test]
async fn test_empty_input_is_rejected_without_a_call() {
    let (keeper, stub) = keeper(StubBackend::new(STUB));
    let mut session = offline_session();

    let result = keeper.summarize(&mut session, "   ").await;

    assert_eq!(result, Err(NoteError::EmptyInput(NoteTool::Summary)));
    assert_eq!(stub.call_count(), 0);
    assert!(session.qa_history().is_empty());
}
