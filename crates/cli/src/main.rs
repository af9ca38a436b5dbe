//! review-kit: multi-agent 510(k) review from the terminal.

mod commands;
mod prompt;
mod render;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use commands::{AskArgs, ExtractArgs, NoteArgs, RunArgs};
use rk_core::notes::NoteTool;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "review-kit", version, about = "Multi-agent 510(k) review pipelines")]
struct Cli {
    /// Agents document, or a directory containing `agents.yaml`.
    #[arg(long, short, global = true, default_value = "agents.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a starter review workspace.
    Init {
        /// Target directory.
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Overwrite existing files.
        #[arg(long)]
        force: bool,

        /// Skip the Markdown agents under `agents/`.
        #[arg(long)]
        minimal: bool,
    },

    /// List configured agents.
    Agents,

    /// List configured pipelines and their steps.
    Pipelines,

    /// Run a pipeline over a case.
    Run {
        /// Pipeline id or name.
        pipeline: String,

        /// Case template file (text or PDF).
        #[arg(long, conflicts_with = "case_text")]
        case: Option<PathBuf>,

        /// Case template given inline.
        #[arg(long)]
        case_text: Option<String>,

        /// Page selection for a PDF case, e.g. `1-3,5`.
        #[arg(long)]
        pages: Option<String>,

        /// Reviewer observations file.
        #[arg(long)]
        observations: Option<PathBuf>,

        /// Extra instructions appended to the first prompt.
        #[arg(long, default_value = "")]
        instructions: String,

        /// Use this provider for every step (`stub` runs offline).
        #[arg(long)]
        provider: Option<String>,

        /// Use this model for every step.
        #[arg(long)]
        model: Option<String>,

        #[arg(long)]
        max_tokens: Option<u32>,

        #[arg(long)]
        temperature: Option<f64>,

        /// Print the run record as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Extract text from documents and print the combined corpus.
    Extract {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Page selection for PDFs, e.g. `1-3,5`. All pages when omitted.
        #[arg(long)]
        pages: Option<String>,

        /// OCR rendered pages instead of reading the text layer.
        #[arg(long)]
        ocr: bool,

        /// OCR language: eng, chi_tra or eng+chi_tra.
        #[arg(long)]
        lang: Option<String>,

        /// Clean up extracted text with an LLM.
        #[arg(long)]
        cleanup: bool,

        /// Comma-separated keywords to highlight when not cleaning up.
        #[arg(long)]
        keywords: Option<String>,

        /// Summarize each document.
        #[arg(long)]
        summarize: bool,

        /// Extract entities across all documents.
        #[arg(long)]
        entities: bool,

        #[arg(long)]
        provider: Option<String>,

        #[arg(long)]
        model: Option<String>,

        /// Write the corpus to a file instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Run a note tool over a file.
    Note {
        /// markdown, format, entities, mindmap, wordgraph, summary or corpus-entities.
        #[arg(value_parser = parse_note_tool)]
        tool: NoteTool,

        file: PathBuf,

        #[arg(long)]
        pages: Option<String>,

        #[arg(long)]
        provider: Option<String>,

        #[arg(long)]
        model: Option<String>,

        /// Print structured results as JSON instead of a table or DOT.
        #[arg(long)]
        json: bool,
    },

    /// Ask a question across several documents.
    Ask {
        question: String,

        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[arg(long)]
        pages: Option<String>,

        #[arg(long)]
        provider: Option<String>,

        #[arg(long)]
        model: Option<String>,
    },

    /// Show settings, provider keys and review metrics.
    Status,
}

fn parse_note_tool(name: &str) -> Result<NoteTool, String> {
    NoteTool::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = NoteTool::ALL.iter().map(NoteTool::name).collect();
        format!("unknown tool '{name}' (expected one of: {})", known.join(", "))
    })
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = Cli::parse();
    let config = cli.config;

    match cli.command {
        Command::Init {
            dir,
            force,
            minimal,
        } => commands::init(dir, force, minimal).await,
        Command::Agents => commands::agents(&config).await,
        Command::Pipelines => commands::pipelines(&config).await,
        Command::Run {
            pipeline,
            case,
            case_text,
            pages,
            observations,
            instructions,
            provider,
            model,
            max_tokens,
            temperature,
            json,
        } => {
            commands::run(
                &config,
                RunArgs {
                    pipeline,
                    case,
                    case_text,
                    pages,
                    observations,
                    instructions,
                    provider,
                    model,
                    max_tokens,
                    temperature,
                    json,
                },
            )
            .await
        }
        Command::Extract {
            files,
            pages,
            ocr,
            lang,
            cleanup,
            keywords,
            summarize,
            entities,
            provider,
            model,
            output,
        } => {
            commands::extract(
                &config,
                ExtractArgs {
                    files,
                    pages,
                    ocr,
                    lang,
                    cleanup,
                    keywords,
                    summarize,
                    entities,
                    provider,
                    model,
                    output,
                },
            )
            .await
        }
        Command::Note {
            tool,
            file,
            pages,
            provider,
            model,
            json,
        } => {
            commands::note(
                &config,
                NoteArgs {
                    tool,
                    file,
                    pages,
                    provider,
                    model,
                    json,
                },
            )
            .await
        }
        Command::Ask {
            question,
            files,
            pages,
            provider,
            model,
        } => {
            commands::ask(
                &config,
                AskArgs {
                    question,
                    files,
                    pages,
                    provider,
                    model,
                },
            )
            .await
        }
        Command::Status => commands::status(&config).await,
    }
}
