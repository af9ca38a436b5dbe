//! Starter configuration for new review workspaces.
//!
//! `review-kit init` writes an `agents.yaml` with 510(k) review agents and
//! pipelines, a `config.toml` with the default settings and, unless minimal,
//! an `agents/` directory holding Markdown-defined agents.
//!
//! # Example
//!
//! ```no_run
//! use rk_core::init::{generate_starter_config, InitOptions};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = InitOptions {
//!     target_dir: PathBuf::from("."),
//!     force: false,
//!     minimal: false,
//! };
//!
//! let written = generate_starter_config(options).await?;
//! println!("wrote {} files", written.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generator;
pub mod templates;

pub use error::{InitError, InitResult};
pub use generator::{generate_starter_config, InitOptions};
pub use templates::{get_template, list_templates};
