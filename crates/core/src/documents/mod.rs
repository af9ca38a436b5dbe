//! Submission document helpers.
//!
//! This module turns uploaded submission files into review text:
//!
//! - [`pages`]: page-range selectors such as `"1-3,5"`
//! - [`pdf`]: page count and embedded text-layer extraction
//! - [`ocr`]: rasterize pages with `pdftoppm` and OCR them with `tesseract`
//! - [`cleanup`]: optional LLM reconstruction of extracted text into Markdown
//! - [`highlight`]: keyword highlighting for the non-LLM path
//! - [`corpus`]: joining several processed files into one corpus

pub mod cleanup;
pub mod corpus;
pub mod highlight;
pub mod ocr;
pub mod pages;
pub mod pdf;

use std::fmt;
use std::path::Path;
use thiserror::Error;

pub use cleanup::{cleanup_text, CleanupOptions, ADVANCED_OCR_SYSTEM_PROMPT};
pub use corpus::{build_corpus, ProcessedDocument};
pub use highlight::{highlight_keywords, parse_keywords};
pub use pages::parse_page_selection;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("required tool '{tool}' was not found on PATH")]
    ToolUnavailable { tool: String },
}

pub type DocumentResult<T> = Result<T, DocumentError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Text,
}

impl DocumentKind {
    /// `.pdf` in any case is a PDF; everything else is treated as text.
    pub fn from_filename(filename: &str) -> Self {
        let is_pdf = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

        if is_pdf {
            Self::Pdf
        } else {
            Self::Text
        }
    }
}

/// An uploaded file held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub kind: DocumentKind,
}

impl SourceDocument {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let kind = DocumentKind::from_filename(&filename);
        Self {
            filename,
            bytes,
            kind,
        }
    }

    /// Read a file from disk, keeping only its file name.
    pub async fn from_path(path: &Path) -> DocumentResult<Self> {
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(filename, bytes))
    }

    /// Contents decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        decode_text(&self.bytes)
    }
}

pub fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Tesseract language profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OcrLanguage {
    #[default]
    English,
    TraditionalChinese,
    EnglishAndTraditionalChinese,
}

impl OcrLanguage {
    /// Language argument passed to `tesseract -l`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "eng",
            Self::TraditionalChinese => "chi_tra",
            Self::EnglishAndTraditionalChinese => "eng+chi_tra",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "eng" => Some(Self::English),
            "chi_tra" => Some(Self::TraditionalChinese),
            "eng+chi_tra" | "chi_tra+eng" => Some(Self::EnglishAndTraditionalChinese),
            _ => None,
        }
    }
}

impl fmt::Display for OcrLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// How text is pulled out of a PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// The embedded text layer.
    TextLayer,
    /// Rasterize and OCR each page.
    Ocr(OcrLanguage),
}

/// Extract the selected pages of a PDF with the given strategy.
pub async fn extract_pdf(
    bytes: &[u8],
    pages: &[u32],
    strategy: ExtractionStrategy,
) -> DocumentResult<String> {
    match strategy {
        ExtractionStrategy::TextLayer => pdf::extract_text_layer(bytes, pages),
        ExtractionStrategy::Ocr(language) => ocr::ocr_pages(bytes, pages, language).await,
    }
}

/// Render `(page, text)` pairs as `--- Page N ---` blocks.
pub fn format_page_blocks<'a>(pages: impl IntoIterator<Item = (u32, &'a str)>) -> String {
    pages
        .into_iter()
        .map(|(page, text)| format!("\n\n--- Page {page} ---\n\n{text}"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
