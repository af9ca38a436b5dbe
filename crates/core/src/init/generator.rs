//! Writes the starter configuration into a directory.

use super::error::{InitError, InitResult};
use super::templates::{get_template, list_templates};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Directory that receives `agents.yaml`, `config.toml` and `agents/`.
    pub target_dir: PathBuf,

    /// Overwrite files that already exist.
    pub force: bool,

    /// Only write `agents.yaml` and `config.toml`.
    pub minimal: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            target_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            force: false,
            minimal: false,
        }
    }
}

/// Template paths written for `options`.
fn planned_templates(options: &InitOptions) -> Vec<String> {
    let mut paths = vec!["agents.yaml".to_string(), "config.toml".to_string()];
    if !options.minimal {
        paths.extend(list_templates("agents/"));
    }
    paths
}

/// Write the starter files and return the paths written.
///
/// ```text
/// <target_dir>/
/// ├── agents.yaml
/// ├── config.toml
/// └── agents/
///     └── labeling-review.md   (unless minimal)
/// ```
///
/// Nothing is written when any target file exists and `force` is unset.
pub async fn generate_starter_config(options: InitOptions) -> InitResult<Vec<PathBuf>> {
    let templates = planned_templates(&options);

    if !options.force {
        if let Some(existing) = templates
            .iter()
            .map(|path| options.target_dir.join(path))
            .find(|path| path.exists())
        {
            return Err(InitError::FileExists(existing));
        }
    }

    let mut written = Vec::with_capacity(templates.len());
    for template in &templates {
        written.push(write_template_file(&options.target_dir, template)?);
    }

    info!(dir = %options.target_dir.display(), files = written.len(), "starter configuration written");
    Ok(written)
}

fn write_template_file(target_dir: &Path, template_path: &str) -> InitResult<PathBuf> {
    let content = get_template(template_path)
        .ok_or_else(|| InitError::TemplateNotFound(template_path.to_string()))?;

    let target_path = target_dir.join(template_path);
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|source| InitError::DirectoryCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&target_path, content).map_err(|source| InitError::FileWrite {
        path: target_path.clone(),
        source,
    })?;

    Ok(target_path)
}
