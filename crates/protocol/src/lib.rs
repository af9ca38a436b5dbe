//! # rk-protocol
//!
//! Shared data model for review-kit.
//!
//! This crate defines the data structures used for:
//! - Configuration document parsing (agents, pipelines, global settings)
//! - Pipeline run records and progress events
//! - Structured payloads produced by the note tools (entities, mind-maps, word graphs)
//! - Session activity entries
//!
//! ## Modules
//!
//! - [`agent_models`]: Agent configuration structures
//! - [`config_models`]: Global settings from config.toml
//! - [`pipeline_models`]: Pipeline definitions and the configuration document
//! - [`run_models`]: Pipeline run records and run status
//! - [`ipc`]: Progress events emitted by the pipeline executor
//! - [`notes_models`]: Structured note payloads returned by LLM tools
//! - [`session_models`]: Activity log entries
//!
//! ## Design Principles
//!
//! - Minimal dependencies: only serde, uuid and chrono
//! - Independent compilation: no dependencies on other review-kit crates

pub mod agent_models;
pub mod config_models;
pub mod ipc;
pub mod notes_models;
pub mod pipeline_models;
pub mod run_models;
pub mod session_models;

// Re-export all public types for convenience
pub use agent_models::*;
pub use config_models::*;
pub use ipc::*;
pub use notes_models::*;
pub use pipeline_models::*;
pub use run_models::*;
pub use session_models::*;
