//! LLM-backed note tools.
//!
//! Every tool is a fixed system prompt plus fixed sampling parameters sent
//! through the [`ProviderRouter`]. Tools that return structured data parse
//! the reply with [`extract_json_payload`].

use super::structured::{extract_json_payload, StructuredError};
use crate::providers::backend::CompletionRequest;
use crate::providers::router::{ProviderRouter, RouterError};
use crate::session::ReviewSession;
use rk_protocol::config_models::StudioSettings;
use rk_protocol::notes_models::{CorpusEntity, Entity, MindMap, WordGraph};
use rk_protocol::session_models::ActivityKind;
use std::fmt;
use thiserror::Error;
use tracing::info;

const MARKDOWN_PROMPT: &str = "You are a professional FDA 510(k) regulatory note architect.
Turn the raw text into a lossless, well-structured Markdown document.
- Keep every factual statement. Do not delete anything and do not invent anything.
- You may split or merge paragraphs, add ## and ### headings that follow regulatory logic (device, indications, substantial equivalence, testing, risk, clinical, labeling) and use lists.
- You must not drop meaningful information or add data that is absent from the source.
Reply with Markdown only, without commentary outside the document.";

const FORMAT_PROMPT: &str = "You are an expert editor for FDA 510(k) submissions.
Reformat the content while keeping every original sentence.
You must:
- Keep all sentences; you may only reorder them into clearer sections or lists.
- Add headings and list structure that make the review easier.
- Wrap key regulatory, technical, risk and clinical terms as <span style=\"color:coral\">term</span>.
You must not summarize, shorten or add new facts.
Reply with Markdown and inline HTML only.";

const ENTITIES_PROMPT: &str = r#"You are an information extraction specialist for FDA 510(k) dossiers.
Identify up to 20 of the most valuable entities in the text: regulations or standards, submission sections, device modules or components, risks or hazards, performance tests, clinical endpoints or outcomes.
Reply with JSON only, as an array:
[
  {"id": 1, "name": "...", "type": "regulation|section|risk|test|clinical|other", "description": "short explanation", "source_snippet": "representative phrase from the text"}
]"#;

const MIND_MAP_PROMPT: &str = r#"You are a knowledge graph designer.
Build a compact mind-map from the text and reply with JSON only:
{
  "nodes": [{"id": "NodeID", "label": "display name", "type": "device|risk|test|regulation|clinical|other"}],
  "edges": [{"source": "NodeID", "target": "OtherID", "relation": "short verb phrase"}]
}
Use 8 to 15 nodes and 10 to 25 edges. Every edge must reference existing node ids."#;

const WORD_GRAPH_PROMPT: &str = r#"You are a text mining and terminology network expert.
Select the 10 to 15 most important terms in the text and describe how they relate. Reply with JSON only:
{
  "nodes": [{"id": "term", "label": "term", "frequency": 3}],
  "edges": [{"source": "term", "target": "other term", "weight": 1, "note": "how they relate"}]
}
Weights range from 1 (weak) to 5 (strong)."#;

const SUMMARY_PROMPT: &str = "You are a senior FDA 510(k) reviewer.
Write a briefing on the document for a review team, covering:
- Device overview
- Indications for Use, if present
- Key technological characteristics
- The substantial equivalence argument
- Major performance tests (bench, biocompatibility, EMC, software and so on)
- Main risks and their mitigations
- Clinical data or rationale
Return Markdown with clear headings and bullet lists. Do not invent content.";

const CORPUS_ENTITIES_PROMPT: &str = r###"You are a cross-document knowledge extraction specialist for FDA 510(k) submissions.
The input is a Markdown corpus made of several documents, each under a "## File N: name" heading.
Identify up to 20 of the most important entities across all documents. Reply with JSON only, as an array:
[
  {"id": 1, "name": "...", "type": "device|risk|test|clinical|regulation|other", "description": "short explanation", "source_files": ["file name"], "context_snippet": "representative phrase"}
]"###;

const CORPUS_QA_PROMPT: &str = "You are a senior FDA 510(k) reviewer analyzing multiple OCR'd documents.
You receive a combined Markdown corpus of every document, followed by a user question.
You must:
- Base all reasoning strictly on the corpus.
- Cross-reference documents when needed and say which file supports which point.
- Keep hypotheses clearly apart from explicit evidence.
Answer in structured Markdown with headings and bullet lists, written for regulatory reviewers.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NoteError {
    #[error("no input text for the {0} tool")]
    EmptyInput(NoteTool),

    #[error(transparent)]
    Router(#[from] RouterError),

    #[error(transparent)]
    Structured(#[from] StructuredError),
}

/// The note operations offered on review text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteTool {
    Markdown,
    Format,
    Entities,
    MindMap,
    WordGraph,
    Summary,
    CorpusEntities,
    CorpusQa,
}

impl NoteTool {
    pub const ALL: [NoteTool; 8] = [
        Self::Markdown,
        Self::Format,
        Self::Entities,
        Self::MindMap,
        Self::WordGraph,
        Self::Summary,
        Self::CorpusEntities,
        Self::CorpusQa,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Format => "format",
            Self::Entities => "entities",
            Self::MindMap => "mindmap",
            Self::WordGraph => "wordgraph",
            Self::Summary => "summary",
            Self::CorpusEntities => "corpus-entities",
            Self::CorpusQa => "corpus-qa",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            Self::Markdown => MARKDOWN_PROMPT,
            Self::Format => FORMAT_PROMPT,
            Self::Entities => ENTITIES_PROMPT,
            Self::MindMap => MIND_MAP_PROMPT,
            Self::WordGraph => WORD_GRAPH_PROMPT,
            Self::Summary => SUMMARY_PROMPT,
            Self::CorpusEntities => CORPUS_ENTITIES_PROMPT,
            Self::CorpusQa => CORPUS_QA_PROMPT,
        }
    }

    pub fn temperature(&self) -> f64 {
        match self {
            Self::Markdown => 0.1,
            Self::Entities | Self::CorpusEntities => 0.2,
            Self::MindMap | Self::Summary | Self::CorpusQa => 0.3,
            Self::Format | Self::WordGraph => 0.4,
        }
    }

    /// Markdown and Format follow the configured limit; the others are fixed.
    pub fn max_tokens(&self, settings: &StudioSettings) -> u32 {
        match self {
            Self::Markdown | Self::Format => settings.max_tokens,
            Self::Entities | Self::MindMap | Self::WordGraph => 1024,
            Self::Summary => 800,
            Self::CorpusEntities => 2000,
            Self::CorpusQa => 1200,
        }
    }
}

impl fmt::Display for NoteTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// User prompt for a corpus question.
pub fn corpus_question_prompt(corpus: &str, question: &str) -> String {
    format!(
        "=== COMBINED OCR DOCUMENTS START ===\n{corpus}\n=== COMBINED OCR DOCUMENTS END ===\n\nUser question:\n{question}"
    )
}

/// Runs note tools against one provider and model.
///
/// Without an explicit provider or model the session's settings decide.
#[derive(Clone)]
pub struct NoteKeeper {
    router: ProviderRouter,
    provider: Option<String>,
    model: Option<String>,
}

impl NoteKeeper {
    pub fn new(router: ProviderRouter) -> Self {
        Self {
            router,
            provider: None,
            model: None,
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Run `tool` over `input` and return the raw reply.
    pub async fn run(
        &self,
        session: &mut ReviewSession,
        tool: NoteTool,
        input: &str,
    ) -> Result<String, NoteError> {
        if input.trim().is_empty() {
            return Err(NoteError::EmptyInput(tool));
        }

        let provider = self
            .provider
            .clone()
            .unwrap_or_else(|| session.settings.default_provider.clone());
        let model = self
            .model
            .clone()
            .unwrap_or_else(|| session.settings.default_model.clone());

        let request = CompletionRequest::new(model, tool.system_prompt(), input)
            .with_max_tokens(tool.max_tokens(&session.settings))
            .with_temperature(tool.temperature());

        info!(tool = %tool, provider = %provider, "running note tool");
        let reply = self.router.complete(session, &provider, &request).await?;
        session.log_activity(ActivityKind::Success, format!("Note tool {tool} finished"));
        Ok(reply)
    }

    pub async fn to_markdown(&self, session: &mut ReviewSession, raw: &str) -> Result<String, NoteError> {
        self.run(session, NoteTool::Markdown, raw).await
    }

    pub async fn format(&self, session: &mut ReviewSession, text: &str) -> Result<String, NoteError> {
        self.run(session, NoteTool::Format, text).await
    }

    pub async fn summarize(&self, session: &mut ReviewSession, markdown: &str) -> Result<String, NoteError> {
        self.run(session, NoteTool::Summary, markdown).await
    }

    pub async fn extract_entities(
        &self,
        session: &mut ReviewSession,
        text: &str,
    ) -> Result<Vec<Entity>, NoteError> {
        let reply = self.run(session, NoteTool::Entities, text).await?;
        Ok(extract_json_payload(&reply)?)
    }

    pub async fn mind_map(&self, session: &mut ReviewSession, text: &str) -> Result<MindMap, NoteError> {
        let reply = self.run(session, NoteTool::MindMap, text).await?;
        Ok(extract_json_payload(&reply)?)
    }

    pub async fn word_graph(&self, session: &mut ReviewSession, text: &str) -> Result<WordGraph, NoteError> {
        let reply = self.run(session, NoteTool::WordGraph, text).await?;
        Ok(extract_json_payload(&reply)?)
    }

    pub async fn corpus_entities(
        &self,
        session: &mut ReviewSession,
        corpus: &str,
    ) -> Result<Vec<CorpusEntity>, NoteError> {
        let reply = self.run(session, NoteTool::CorpusEntities, corpus).await?;
        Ok(extract_json_payload(&reply)?)
    }

    /// Answer `question` from `corpus` and append the exchange to the
    /// session's Q&A history.
    pub async fn ask_corpus(
        &self,
        session: &mut ReviewSession,
        corpus: &str,
        question: &str,
    ) -> Result<String, NoteError> {
        if corpus.trim().is_empty() || question.trim().is_empty() {
            return Err(NoteError::EmptyInput(NoteTool::CorpusQa));
        }

        let answer = self
            .run(session, NoteTool::CorpusQa, &corpus_question_prompt(corpus, question))
            .await?;
        session.record_qa(question, answer.clone());
        Ok(answer)
    }
}
