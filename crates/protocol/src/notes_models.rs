//! Structured payloads returned by the note tools.
//!
//! LLMs are asked to reply with JSON in these shapes. Fields the model
//! tends to omit carry serde defaults so that partial replies still parse.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity identifier. Models reply with either `1` or `"E1"`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum EntityId {
    Number(u64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A key entity extracted from a single document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,

    /// One of `regulation|section|risk|test|clinical|other`.
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub source_snippet: String,
}

/// A key entity extracted across several documents.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CorpusEntity {
    pub id: EntityId,
    pub name: String,

    /// One of `device|risk|test|clinical|regulation|other`.
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub description: String,

    /// Filenames the entity was found in.
    #[serde(default)]
    pub source_files: Vec<String>,

    #[serde(default)]
    pub context_snippet: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MindMapNode {
    pub id: String,

    /// Display label; the id is shown when empty.
    #[serde(default)]
    pub label: String,

    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MindMapEdge {
    pub source: String,
    pub target: String,

    #[serde(default)]
    pub relation: String,
}

/// A directed concept map of the reviewed text.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct MindMap {
    #[serde(default)]
    pub nodes: Vec<MindMapNode>,

    #[serde(default)]
    pub edges: Vec<MindMapEdge>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WordNode {
    pub id: String,

    #[serde(default)]
    pub label: String,

    #[serde(default = "default_weight")]
    pub frequency: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WordEdge {
    pub source: String,
    pub target: String,

    /// Link strength, 1 to 5.
    #[serde(default = "default_weight")]
    pub weight: u32,

    #[serde(default)]
    pub note: String,
}

/// An undirected terminology network of the reviewed text.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct WordGraph {
    #[serde(default)]
    pub nodes: Vec<WordNode>,

    #[serde(default)]
    pub edges: Vec<WordEdge>,
}

fn default_weight() -> u32 {
    1
}

/// A question asked against the combined document corpus, with its answer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct QaExchange {
    pub question: String,
    pub answer: String,
}
