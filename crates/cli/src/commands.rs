//! Subcommand implementations.

use crate::prompt::ensure_credentials;
use crate::render;
use color_eyre::eyre::{bail, eyre, Result, WrapErr};
use colored::Colorize;
use rk_core::config::{load_config, AppConfig};
use rk_core::documents::pdf::page_count;
use rk_core::documents::{
    build_corpus, cleanup_text, decode_text, extract_pdf, highlight_keywords, parse_keywords,
    parse_page_selection, CleanupOptions, DocumentKind, ExtractionStrategy, OcrLanguage,
    ProcessedDocument, SourceDocument,
};
use rk_core::engine::{PipelineExecutor, RunRequest};
use rk_core::init::{generate_starter_config, InitOptions};
use rk_core::notes::{
    corpus_entity_table, entity_table, mind_map_to_dot, word_graph_to_dot, NoteKeeper, NoteTool,
};
use rk_core::providers::{CredentialSource, ProviderKind, ProviderRouter, StubBackend};
use rk_core::session::ReviewSession;
use rk_protocol::RunEvent;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Name of the offline backend available alongside the hosted providers.
pub const OFFLINE_PROVIDER: &str = "stub";

/// Activity entries shown after a command that called an LLM.
const ACTIVITY_TAIL: usize = 10;

/// Write each progress event to stderr until the executor drops its sender.
async fn print_events(mut events: mpsc::Receiver<RunEvent>) {
    while let Some(event) = events.recv().await {
        eprintln!("{}", render::event_line(&event));
    }
}

/// Wait for the event printer; a failed printer is logged, not fatal.
/// Returns whether the printer finished cleanly.
async fn finish_printer(printer: JoinHandle<()>) -> bool {
    match printer.await {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "event printer task failed");
            false
        }
    }
}

/// The hosted backends plus the offline `stub` backend.
pub fn build_router() -> ProviderRouter {
    ProviderRouter::with_defaults().with_backend(Arc::new(StubBackend::new(OFFLINE_PROVIDER)))
}

async fn load(config_path: &Path) -> Result<AppConfig> {
    let config = load_config(config_path)
        .await
        .wrap_err_with(|| format!("loading {}", config_path.display()))?;
    debug!(
        agents = config.review.agents.len(),
        pipelines = config.review.pipelines.len(),
        "configuration ready"
    );
    Ok(config)
}

/// Text of a case file. PDFs go through the text layer or OCR.
async fn document_text(
    path: &Path,
    pages: Option<&str>,
    strategy: ExtractionStrategy,
) -> Result<(SourceDocument, String)> {
    let document = SourceDocument::from_path(path)
        .await
        .wrap_err_with(|| format!("reading {}", path.display()))?;

    let text = match document.kind {
        DocumentKind::Pdf => {
            let total = page_count(&document.bytes)?;
            let selected = parse_page_selection(pages.unwrap_or(""), total);
            debug!(file = %document.filename, total, ?selected, "extracting PDF pages");
            extract_pdf(&document.bytes, &selected, strategy).await?
        }
        DocumentKind::Text => document.text(),
    };
    Ok((document, text))
}

fn read_text_file(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read(path)
            .map(|bytes| decode_text(&bytes))
            .wrap_err_with(|| format!("reading {}", path.display())),
        None => Ok(String::new()),
    }
}

pub async fn init(dir: PathBuf, force: bool, minimal: bool) -> Result<()> {
    let options = InitOptions {
        target_dir: dir.clone(),
        force,
        minimal,
    };
    let written = generate_starter_config(options).await?;

    println!(
        "{} review workspace in {}",
        "Created".green().bold(),
        dir.display()
    );
    for path in written {
        println!("  {}", path.display());
    }
    Ok(())
}

pub async fn agents(config_path: &Path) -> Result<()> {
    let config = load(config_path).await?;
    render::print_agents(&config.review);

    if let Err(err) = build_router().validate_config(&config.review) {
        warn!(error = %err, "configuration references an unknown provider");
        println!("{} {err}", "warning:".yellow().bold());
    }
    Ok(())
}

pub async fn pipelines(config_path: &Path) -> Result<()> {
    let config = load(config_path).await?;
    render::print_pipelines(&config.review);
    Ok(())
}

pub struct RunArgs {
    pub pipeline: String,
    pub case: Option<PathBuf>,
    pub case_text: Option<String>,
    pub pages: Option<String>,
    pub observations: Option<PathBuf>,
    pub instructions: String,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub json: bool,
}

pub async fn run(config_path: &Path, args: RunArgs) -> Result<()> {
    let config = load(config_path).await?;
    let Some(pipeline) = config.review.pipeline(&args.pipeline) else {
        let known: Vec<&str> = config.review.pipelines.iter().map(|p| p.id.as_str()).collect();
        bail!(
            "unknown pipeline '{}' (available: {})",
            args.pipeline,
            if known.is_empty() {
                "none".to_string()
            } else {
                known.join(", ")
            }
        );
    };

    let mut session = ReviewSession::with_settings(config.settings.clone());
    session.template = match &args.case {
        Some(path) => {
            document_text(path, args.pages.as_deref(), ExtractionStrategy::TextLayer)
                .await?
                .1
        }
        None => args.case_text.unwrap_or_default(),
    };
    session.observations = read_text_file(args.observations.as_deref())?;

    let mut request =
        RunRequest::for_case(&session.template, &session.observations, &args.instructions)
            .with_settings(&session.settings)
            .with_provider_override(args.provider)
            .with_model_override(args.model);
    if let Some(max_tokens) = args.max_tokens {
        request.max_tokens = max_tokens;
    }
    if let Some(temperature) = args.temperature {
        request.temperature = temperature;
    }

    let providers: Vec<String> = match &request.provider_override {
        Some(provider) => vec![provider.clone()],
        None => pipeline
            .agent_ids()
            .filter_map(|id| config.review.agent(id))
            .map(|agent| agent.provider.clone())
            .collect(),
    };
    ensure_credentials(&mut session, providers.iter().map(String::as_str))?;

    let (events_tx, events_rx) = mpsc::channel(32);
    let printer = tokio::spawn(print_events(events_rx));

    let result = {
        let executor = PipelineExecutor::new(build_router()).with_events(events_tx);
        executor
            .run(&mut session, &config.review, pipeline, &request)
            .await
    };
    finish_printer(printer).await;
    render::print_activity(&session, ACTIVITY_TAIL);

    match result {
        Ok(run) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&run)?);
            } else {
                render::print_run(&run);
            }
            Ok(())
        }
        Err(err) => {
            for step in err.completed_steps() {
                println!("{}", format!("── {} ──", step.agent_id).bold());
                println!("{}", step.output);
            }
            Err(err.into())
        }
    }
}

pub struct ExtractArgs {
    pub files: Vec<PathBuf>,
    pub pages: Option<String>,
    pub ocr: bool,
    pub lang: Option<String>,
    pub cleanup: bool,
    pub keywords: Option<String>,
    pub summarize: bool,
    pub entities: bool,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub output: Option<PathBuf>,
}

/// Extract, clean up and highlight each file, then print the combined corpus.
pub async fn extract(config_path: &Path, args: ExtractArgs) -> Result<()> {
    let config = load(config_path).await?;
    let mut session = ReviewSession::with_settings(config.settings);
    let router = build_router();

    let language_code = args
        .lang
        .clone()
        .unwrap_or_else(|| session.settings.ocr_language.clone());
    let language = OcrLanguage::from_code(&language_code)
        .ok_or_else(|| eyre!("unsupported OCR language '{language_code}'"))?;
    let strategy = if args.ocr {
        ExtractionStrategy::Ocr(language)
    } else {
        ExtractionStrategy::TextLayer
    };

    let keywords = match &args.keywords {
        Some(list) => parse_keywords(list),
        None => session.settings.highlight_keywords.clone(),
    };

    if args.cleanup || args.summarize || args.entities {
        let provider = args
            .provider
            .clone()
            .unwrap_or_else(|| session.settings.default_provider.clone());
        ensure_credentials(&mut session, [provider.as_str()])?;
    }

    let mut keeper = NoteKeeper::new(router.clone());
    if let Some(provider) = &args.provider {
        keeper = keeper.with_provider(provider.clone());
    }
    if let Some(model) = &args.model {
        keeper = keeper.with_model(model.clone());
    }

    let mut documents = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let (document, text) = document_text(path, args.pages.as_deref(), strategy).await?;

        let markdown = if args.cleanup {
            let mut options = match document.kind {
                DocumentKind::Pdf => CleanupOptions::for_pdf(&session.settings),
                DocumentKind::Text => CleanupOptions::for_text(&session.settings),
            };
            if let Some(provider) = &args.provider {
                options = options.with_provider(provider.clone());
            }
            if let Some(model) = &args.model {
                options = options.with_model(model.clone());
            }
            cleanup_text(&router, &mut session, &text, &options).await?
        } else if document.kind == DocumentKind::Pdf {
            highlight_keywords(&text, &keywords, &session.settings.highlight_color)
        } else {
            text
        };

        let mut processed = ProcessedDocument::new(document.filename, markdown);
        if args.summarize && !processed.markdown.trim().is_empty() {
            processed.summary = Some(keeper.summarize(&mut session, &processed.markdown).await?);
        }
        documents.push(processed);
    }

    let corpus = build_corpus(&documents);
    match &args.output {
        Some(path) => {
            tokio::fs::write(path, &corpus)
                .await
                .wrap_err_with(|| format!("writing {}", path.display()))?;
            println!("{} {}", "Wrote".green().bold(), path.display());
        }
        None => println!("{corpus}"),
    }

    for document in &documents {
        if let Some(summary) = &document.summary {
            println!();
            println!("{}", format!("Summary of {}", document.filename).bold());
            println!("{summary}");
        }
    }

    if args.entities {
        let entities = keeper.corpus_entities(&mut session, &corpus).await?;
        println!();
        println!("{}", corpus_entity_table(&entities));
    }

    if session.activity_len() > 0 {
        render::print_activity(&session, ACTIVITY_TAIL);
    }
    Ok(())
}

pub struct NoteArgs {
    pub tool: NoteTool,
    pub file: PathBuf,
    pub pages: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub json: bool,
}

/// Run one note tool over a file and print its result.
pub async fn note(config_path: &Path, args: NoteArgs) -> Result<()> {
    if args.tool == NoteTool::CorpusQa {
        bail!("use the `ask` command for corpus questions");
    }

    let config = load(config_path).await?;
    let mut session = ReviewSession::with_settings(config.settings);
    let (_, text) =
        document_text(&args.file, args.pages.as_deref(), ExtractionStrategy::TextLayer).await?;

    let mut keeper = NoteKeeper::new(build_router());
    if let Some(provider) = &args.provider {
        keeper = keeper.with_provider(provider.clone());
    }
    if let Some(model) = &args.model {
        keeper = keeper.with_model(model.clone());
    }

    let provider = args
        .provider
        .clone()
        .unwrap_or_else(|| session.settings.default_provider.clone());
    ensure_credentials(&mut session, [provider.as_str()])?;

    match args.tool {
        NoteTool::Entities => {
            let entities = keeper.extract_entities(&mut session, &text).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&entities)?);
            } else {
                println!("{}", entity_table(&entities));
            }
        }
        NoteTool::CorpusEntities => {
            let entities = keeper.corpus_entities(&mut session, &text).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&entities)?);
            } else {
                println!("{}", corpus_entity_table(&entities));
            }
        }
        NoteTool::MindMap => {
            let map = keeper.mind_map(&mut session, &text).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&map)?);
            } else {
                println!("{}", mind_map_to_dot(&map));
            }
        }
        NoteTool::WordGraph => {
            let graph = keeper.word_graph(&mut session, &text).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&graph)?);
            } else {
                println!("{}", word_graph_to_dot(&graph));
            }
        }
        tool => println!("{}", keeper.run(&mut session, tool, &text).await?),
    }
    Ok(())
}

pub struct AskArgs {
    pub question: String,
    pub files: Vec<PathBuf>,
    pub pages: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
}

/// Answer a question from the combined text of several files.
pub async fn ask(config_path: &Path, args: AskArgs) -> Result<()> {
    let config = load(config_path).await?;
    let mut session = ReviewSession::with_settings(config.settings);

    let mut documents = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let (document, text) =
            document_text(path, args.pages.as_deref(), ExtractionStrategy::TextLayer).await?;
        documents.push(ProcessedDocument::new(document.filename, text));
    }
    let corpus = build_corpus(&documents);

    let mut keeper = NoteKeeper::new(build_router());
    if let Some(provider) = &args.provider {
        keeper = keeper.with_provider(provider.clone());
    }
    if let Some(model) = &args.model {
        keeper = keeper.with_model(model.clone());
    }

    let provider = args
        .provider
        .clone()
        .unwrap_or_else(|| session.settings.default_provider.clone());
    ensure_credentials(&mut session, [provider.as_str()])?;

    let answer = keeper.ask_corpus(&mut session, &corpus, &args.question).await?;
    println!("{answer}");
    Ok(())
}

/// Show settings, credential availability and fresh session metrics.
pub async fn status(config_path: &Path) -> Result<()> {
    let config = load(config_path).await?;
    let session = ReviewSession::with_settings(config.settings);
    let settings = &session.settings;

    println!("{}", "Settings".bold());
    println!(
        "  default  {}/{}",
        settings.default_provider, settings.default_model
    );
    println!(
        "  sampling max_tokens={} temperature={}",
        settings.max_tokens, settings.temperature
    );
    println!("  OCR      {}", settings.ocr_language);

    println!("{}", "Providers".bold());
    for kind in ProviderKind::ALL {
        let state = match session.credentials.source(kind.name()) {
            Some(CredentialSource::Environment) => format!("key from {}", kind.env_var()).green(),
            Some(CredentialSource::Session) => "key entered this session".green(),
            None => format!("no key (set {})", kind.env_var()).yellow(),
        };
        println!("  {:<10} {state}", kind.name());
    }
    println!("  {:<10} {}", OFFLINE_PROVIDER, "offline, no key needed".dimmed());

    render::print_metrics(&session);
    Ok(())
}
