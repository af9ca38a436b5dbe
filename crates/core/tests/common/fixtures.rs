//! Test fixtures for configurations, sessions and routers.

use rk_core::providers::{CredentialStore, ProviderRouter, StubBackend};
use rk_core::session::ReviewSession;
use rk_protocol::agent_models::AgentConfig;
use rk_protocol::config_models::StudioSettings;
use rk_protocol::pipeline_models::{PipelineConfig, PipelineStep, ReviewConfig};
use std::sync::Arc;
use tempfile::TempDir;

/// Name under which the stub backend is registered.
pub const STUB: &str = "stub";

/// An agent served by the stub backend with `model`.
#[allow(dead_code)]
pub fn stub_agent(id: &str, model: &str) -> AgentConfig {
    AgentConfig {
        id: id.to_string(),
        name: format!("Test agent {id}"),
        provider: STUB.to_string(),
        default_model: model.to_string(),
        system_prompt: format!("You are test agent {id}."),
    }
}

#[allow(dead_code)]
pub fn pipeline(id: &str, agent_ids: &[&str]) -> PipelineConfig {
    PipelineConfig {
        id: id.to_string(),
        name: format!("Pipeline {id}"),
        description: String::new(),
        steps: agent_ids.iter().map(|a| PipelineStep::new(*a)).collect(),
    }
}

#[allow(dead_code)]
pub fn review_config(agents: Vec<AgentConfig>, pipelines: Vec<PipelineConfig>) -> ReviewConfig {
    ReviewConfig { agents, pipelines }
}

/// A session that ignores environment credentials.
#[allow(dead_code)]
pub fn offline_session() -> ReviewSession {
    ReviewSession::with_credentials(StudioSettings::default(), CredentialStore::without_env())
}

/// A router holding only a stub backend, plus a handle to inspect it.
#[allow(dead_code)]
pub fn stub_router() -> (ProviderRouter, Arc<StubBackend>) {
    stub_router_with(StubBackend::new(STUB))
}

#[allow(dead_code)]
pub fn stub_router_with(stub: StubBackend) -> (ProviderRouter, Arc<StubBackend>) {
    let stub = Arc::new(stub);
    (ProviderRouter::new().with_backend(stub.clone()), stub)
}

/// A temporary directory with an `agents.yaml`, `config.toml` and one
/// Markdown agent.
///
/// Returns a TempDir that must be kept alive for the test duration.
#[allow(dead_code)]
pub fn create_review_dir() -> std::io::Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    let root = temp_dir.path();

    let document = r#"
agents:
  - id: summary
    name: Device Summary
    provider: openai
    default_model: gpt-4o-mini
    system_prompt: Summarize the device.
  - id: se
    name: SE Comparison
    provider: anthropic
    default_model: claude-3-5-sonnet-latest
    system_prompt: Compare with the predicate.
pipelines:
  - id: standard
    name: Standard Review
    description: Summary then SE, then labeling
    steps:
      - agent_id: summary
      - agent_id: se
      - agent_id: labeling
"#;
    std::fs::write(root.join("agents.yaml"), document)?;

    std::fs::write(
        root.join("config.toml"),
        "default_provider = \"gemini\"\ndefault_model = \"gemini-2.5-flash\"\nmax_tokens = 2048\n",
    )?;

    std::fs::create_dir_all(root.join("agents"))?;
    let labeling = r#"---
id: labeling
name: Labeling Review
provider: xai
default_model: grok-3-mini
---
Check the labeling against the Indications for Use."#;
    std::fs::write(root.join("agents/labeling.md"), labeling)?;

    Ok(temp_dir)
}

/// Build a PDF with one Helvetica text line per page.
#[allow(dead_code)]
pub fn make_test_pdf(pages: &[&str]) -> Vec<u8> {
    use lopdf::dictionary;
    use lopdf::{Document, Object, Stream};

    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let kids: Vec<Object> = pages
        .iter()
        .map(|text| {
            let content = format!("BT /F1 12 Tf 72 700 Td ({text}) Tj ET");
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                },
            })
            .into()
        })
        .collect();

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("serialize test PDF");
    buf
}
