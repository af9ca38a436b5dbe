//! The aggregated configuration handed to the rest of the core.

use rk_protocol::config_models::StudioSettings;
use rk_protocol::pipeline_models::ReviewConfig;

/// Everything loaded from disk: the agents document and global settings.
///
/// # Example
///
/// ```rust,no_run
/// use rk_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("agents.yaml")).await?;
/// println!("Loaded {} agents and {} pipelines",
///          config.review.agents.len(),
///          config.review.pipelines.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Global settings from `config.toml` next to the document.
    pub settings: StudioSettings,

    /// Agents and pipelines from the YAML document and `agents/*.md`.
    pub review: ReviewConfig,
}
