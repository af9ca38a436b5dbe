//! Global settings models for `config.toml`.
//!
//! These settings supply the defaults used when a caller does not pick a
//! provider, model or sampling parameters explicitly.

use serde::Deserialize;
use serde::Serialize;

/// Keywords highlighted in OCR output when no LLM cleanup is requested.
pub const DEFAULT_HIGHLIGHT_KEYWORDS: &[&str] = &[
    "510(k)",
    "substantial equivalence",
    "risk",
    "performance testing",
    "adverse event",
    "indication",
    "predicate device",
];

/// Represents global settings from `config.toml`.
///
/// Every field is optional in the file; missing fields take the defaults
/// documented below.
///
/// # Example
///
/// ```toml
/// default_provider = "anthropic"
/// default_model = "claude-3-5-sonnet-latest"
/// max_tokens = 2048
/// temperature = 0.3
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StudioSettings {
    /// Provider used by note tools and document cleanup. Defaults to `openai`.
    pub default_provider: String,

    /// Model used together with `default_provider`. Defaults to `gpt-4o-mini`.
    pub default_model: String,

    /// Maximum output tokens for pipeline steps. Defaults to 1024.
    pub max_tokens: u32,

    /// Sampling temperature for pipeline steps. Defaults to 0.7.
    pub temperature: f64,

    /// Keywords wrapped in highlight spans by the OCR path.
    pub highlight_keywords: Vec<String>,

    /// CSS color used for keyword highlights. Defaults to coral `#FF7F50`.
    pub highlight_color: String,

    /// Tesseract language profile used when none is given. Defaults to `eng`.
    pub ocr_language: String,
}

impl Default for StudioSettings {
    fn default() -> Self {
        Self {
            default_provider: "openai".to_string(),
            default_model: "gpt-4o-mini".to_string(),
            max_tokens: 1024,
            temperature: 0.7,
            highlight_keywords: DEFAULT_HIGHLIGHT_KEYWORDS
                .iter()
                .map(|k| (*k).to_string())
                .collect(),
            highlight_color: "#FF7F50".to_string(),
            ocr_language: "eng".to_string(),
        }
    }
}
