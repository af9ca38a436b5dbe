//! Configuration loading and management.
//!
//! This module loads the YAML agents document, optional Markdown agent
//! definitions and the optional global `config.toml`.

pub mod error;
pub mod loader;
pub mod models;

pub use error::{ConfigError, ConfigResult};
pub use loader::load_config;
pub use models::AppConfig;
