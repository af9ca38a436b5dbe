//! Configuration loader for the agents document and its neighbours.
//!
//! A review workspace looks like this:
//!
//! ```text
//! review/
//! ├── agents.yaml      # agents + pipelines (required for anything useful)
//! ├── config.toml      # global settings (optional)
//! └── agents/          # extra agents as Markdown with front matter (optional)
//!     └── labeling.md
//! ```

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::AppConfig;
use gray_matter::engine::YAML;
use gray_matter::Matter;
use rk_protocol::agent_models::AgentConfig;
use rk_protocol::config_models::StudioSettings;
use rk_protocol::pipeline_models::ReviewConfig;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// File name used when `load_config` is pointed at a directory.
pub const DEFAULT_DOCUMENT_NAME: &str = "agents.yaml";

/// Loads the agents document plus `config.toml` and `agents/*.md` next to it.
///
/// `path` may name the YAML document itself or a directory containing
/// `agents.yaml`.
///
/// # Returns
///
/// An `AppConfig`. A missing document yields an empty agent/pipeline list
/// rather than an error; a missing `config.toml` yields default settings.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - Files exist but cannot be read
/// - Files have invalid syntax (YAML, TOML, or Markdown front matter)
/// - Two agents or two pipelines share an id
///
/// Pipeline steps naming unknown agents are only logged here; the executor
/// reports them when the pipeline actually runs.
pub async fn load_config(path: &Path) -> ConfigResult<AppConfig> {
    let document_path = resolve_document_path(path);
    let base_dir = document_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let settings = load_settings(&base_dir)?;

    let mut review = load_document(&document_path)?;
    review.agents.extend(load_markdown_agents(&base_dir)?);

    validate(&document_path, &review)?;

    debug!(
        agents = review.agents.len(),
        pipelines = review.pipelines.len(),
        "configuration loaded from {}",
        document_path.display()
    );

    Ok(AppConfig { settings, review })
}

fn resolve_document_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(DEFAULT_DOCUMENT_NAME)
    } else {
        path.to_path_buf()
    }
}

/// Loads the YAML agents document.
fn load_document(path: &Path) -> ConfigResult<ReviewConfig> {
    if !path.exists() {
        warn!("agents document {} not found, using empty configuration", path.display());
        return Ok(ReviewConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    if content.trim().is_empty() {
        return Ok(ReviewConfig::default());
    }

    serde_yaml::from_str(&content).map_err(|source| ConfigError::YamlParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads global settings from `config.toml`.
fn load_settings(base_dir: &Path) -> ConfigResult<StudioSettings> {
    let config_path = base_dir.join("config.toml");

    if !config_path.exists() {
        return Ok(StudioSettings::default());
    }

    let content =
        std::fs::read_to_string(&config_path).map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: config_path,
        source,
    })
}

/// Loads agent definitions from `agents/*.md`.
///
/// The front matter carries `id`, `name`, `provider` and `default_model`;
/// the Markdown body becomes the system prompt.
fn load_markdown_agents(base_dir: &Path) -> ConfigResult<Vec<AgentConfig>> {
    let agents_dir = base_dir.join("agents");

    if !agents_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut agents = Vec::new();
    let matter = Matter::<YAML>::new();

    for entry in WalkDir::new(&agents_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ConfigError::DirectoryWalk {
            path: agents_dir.clone(),
            source,
        })?;

        let path = entry.path();

        if path.extension().and_then(|s| s.to_str()) != Some("md") {
            warn!("skipping non-Markdown file {}", path.display());
            continue;
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let result = matter.parse(&content);

        let mut agent: AgentConfig = result
            .data
            .ok_or_else(|| ConfigError::MarkdownParse {
                path: path.to_path_buf(),
                reason: "Missing YAML front matter".to_string(),
            })?
            .deserialize()
            .map_err(|e| ConfigError::MarkdownParse {
                path: path.to_path_buf(),
                reason: format!("Failed to deserialize front matter: {e}"),
            })?;

        let body = result.content.trim();
        if !body.is_empty() {
            agent.system_prompt = body.to_string();
        }

        agents.push(agent);
    }

    Ok(agents)
}

fn validate(path: &Path, review: &ReviewConfig) -> ConfigResult<()> {
    let mut agent_ids = HashSet::new();
    for agent in &review.agents {
        if !agent_ids.insert(agent.id.as_str()) {
            return Err(ConfigError::InvalidConfig {
                path: path.to_path_buf(),
                reason: format!("duplicate agent id '{}'", agent.id),
            });
        }
    }

    let mut pipeline_ids = HashSet::new();
    for pipeline in &review.pipelines {
        if !pipeline_ids.insert(pipeline.id.as_str()) {
            return Err(ConfigError::InvalidConfig {
                path: path.to_path_buf(),
                reason: format!("duplicate pipeline id '{}'", pipeline.id),
            });
        }

        for agent_id in pipeline.agent_ids() {
            if !agent_ids.contains(agent_id) {
                warn!(
                    pipeline = %pipeline.id,
                    "step references unknown agent '{agent_id}'"
                );
            }
        }
    }

    Ok(())
}
