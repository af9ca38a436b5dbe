//! Note tools over review text.
//!
//! - [`tools`]: the LLM-backed [`NoteKeeper`] operations
//! - [`structured`]: JSON payload extraction from model replies
//! - [`graph`]: DOT and Markdown table rendering

pub mod graph;
pub mod structured;
pub mod tools;

pub use graph::{corpus_entity_table, entity_table, mind_map_to_dot, word_graph_to_dot};
pub use structured::{extract_json_payload, StructuredError};
pub use tools::{corpus_question_prompt, NoteError, NoteKeeper, NoteTool};
