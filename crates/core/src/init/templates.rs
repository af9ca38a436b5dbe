//! Starter templates embedded at compile time.
//!
//! The workspace `templates/` directory is embedded with `rust-embed`, so
//! `review-kit init` needs no files at runtime. With `debug-embed` enabled
//! debug builds embed as well instead of reading from disk.

use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../templates"]
pub struct TemplateAssets;

/// Template content by path relative to `templates/`, e.g. `"agents.yaml"`.
///
/// ```
/// use rk_core::init::templates::get_template;
///
/// let settings = get_template("config.toml").expect("config.toml is embedded");
/// assert!(settings.contains("default_provider"));
/// ```
pub fn get_template(path: &str) -> Option<String> {
    TemplateAssets::get(path).map(|file| String::from_utf8_lossy(file.data.as_ref()).into_owned())
}

/// Template paths starting with `prefix`, sorted.
pub fn list_templates(prefix: &str) -> Vec<String> {
    let mut paths: Vec<String> = TemplateAssets::iter()
        .filter(|path| path.starts_with(prefix))
        .map(|path| path.to_string())
        .collect();
    paths.sort();
    paths
}
