//! The hosted LLM providers known out of the box.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAi,
    Gemini,
    Xai,
    Anthropic,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [Self::OpenAi, Self::Gemini, Self::Xai, Self::Anthropic];

    /// Parse a provider name. Matching ignores case and surrounding whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use rk_core::providers::ProviderKind;
    ///
    /// assert_eq!(ProviderKind::from_name(" OpenAI "), Some(ProviderKind::OpenAi));
    /// assert_eq!(ProviderKind::from_name("grok"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        match normalize_name(name).as_str() {
            "openai" => Some(Self::OpenAi),
            "gemini" => Some(Self::Gemini),
            "xai" => Some(Self::Xai),
            "anthropic" => Some(Self::Anthropic),
            _ => None,
        }
    }

    /// Canonical lowercase name, as used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::Xai => "xai",
            Self::Anthropic => "anthropic",
        }
    }

    /// Environment variable holding the API key.
    pub fn env_var(&self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
            Self::Xai => "XAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    /// Human-readable label for prompts and listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Gemini => "Gemini",
            Self::Xai => "xAI (Grok)",
            Self::Anthropic => "Anthropic",
        }
    }

    /// Models offered for selection in the front end.
    pub fn suggested_models(&self) -> &'static [&'static str] {
        match self {
            Self::OpenAi => &["gpt-5-nano", "gpt-4o-mini", "gpt-4.1-mini"],
            Self::Gemini => &["gemini-2.5-flash", "gemini-2.5-flash-lite"],
            Self::Xai => &["grok-4-fast-reasoning", "grok-3-mini"],
            Self::Anthropic => &["claude-3-5-sonnet-latest", "claude-3-opus-latest"],
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalized form of a provider name: trimmed and lowercased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
