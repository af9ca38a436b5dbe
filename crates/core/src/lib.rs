//! # rk-core
//!
//! Review pipeline executor, provider router and document helpers for
//! review-kit.
//!
//! This crate provides:
//! - Configuration loading from `agents.yaml`, `config.toml` and `agents/*.md`
//! - A provider router over the OpenAI, Gemini, xAI and Anthropic backends
//! - The sequential multi-agent pipeline executor
//! - PDF text extraction, OCR and LLM cleanup of submission documents
//! - Note tools: Markdown structuring, entities, mind-maps, word graphs, Q&A
//! - The per-session review context
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading
//! - [`providers`]: Backend trait, backends, credentials and the router
//! - [`engine`]: Pipeline execution engine
//! - [`documents`]: Page selection, extraction, OCR and corpus assembly
//! - [`notes`]: LLM-backed note tools and their renderers
//! - [`session`]: Session state, activity log and metrics
//! - [`init`]: Starter configuration generator

pub mod config;
pub mod documents;
pub mod engine;
pub mod init;
pub mod notes;
pub mod providers;
pub mod session;
