//! LLM reconstruction of extracted text into highlighted Markdown.

use crate::providers::backend::CompletionRequest;
use crate::providers::router::{ProviderRouter, RouterError};
use crate::session::ReviewSession;
use rk_protocol::config_models::StudioSettings;

pub const ADVANCED_OCR_SYSTEM_PROMPT: &str = r#"You are an OCR cleanup and document reconstruction assistant for FDA 510(k) submissions.
The input is noisy text pulled from PDF pages. It may contain broken encodings, hard line breaks and hyphenated words.

Tasks:
1. Denoise and normalize:
   - Rejoin words split by hyphenation or line breaks.
   - Drop obvious OCR noise such as stray symbols or repeated page headers and footers.
   - Keep every substantive regulatory, clinical, risk and technical statement.
2. Rebuild the structure as Markdown:
   - Add headings (##, ###) for sections such as Device Description, Indications for Use, Substantial Equivalence, Performance Testing, Risk Management, Clinical and Labeling when they are present or clearly implied.
   - Use bulleted or numbered lists where they help readability.
3. Highlight key terms in coral:
   - Wrap important domain terms as <span style="color:coral">term</span>.
   - Prefer the device name, key parameters, standards, risk terms, clinical endpoints, performance metrics and regulatory references.

Rules:
- Never add facts that are not in the input.
- Never drop meaningful content.

Return Markdown with inline HTML only."#;

/// Provider, model and sampling parameters for a cleanup call.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanupOptions {
    pub provider: String,
    pub model: String,
    pub system_prompt: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl CleanupOptions {
    /// Defaults for text extracted from PDF pages.
    pub fn for_pdf(settings: &StudioSettings) -> Self {
        Self {
            provider: settings.default_provider.clone(),
            model: settings.default_model.clone(),
            system_prompt: ADVANCED_OCR_SYSTEM_PROMPT.to_string(),
            max_tokens: 1500,
            temperature: 0.2,
        }
    }

    /// Defaults for plain-text uploads, which are usually longer.
    pub fn for_text(settings: &StudioSettings) -> Self {
        Self {
            max_tokens: 2000,
            ..Self::for_pdf(settings)
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Send `text` through the cleanup prompt and return the reply unmodified.
pub async fn cleanup_text(
    router: &ProviderRouter,
    session: &mut ReviewSession,
    text: &str,
    options: &CleanupOptions,
) -> Result<String, RouterError> {
    let request = CompletionRequest::new(
        options.model.clone(),
        options.system_prompt.clone(),
        text,
    )
    .with_max_tokens(options.max_tokens)
    .with_temperature(options.temperature);

    router.complete(session, &options.provider, &request).await
}
