//! Session activity models.

use serde::{Deserialize, Serialize};

/// Category of an activity log entry.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Info,
    Success,
    Warning,
    Error,
    /// An outbound LLM call.
    Call,
}

impl ActivityKind {
    /// Short marker used when printing the log.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Info => "i",
            Self::Success => "+",
            Self::Warning => "!",
            Self::Error => "x",
            Self::Call => ">",
        }
    }
}

/// One entry of the session activity log.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    pub message: String,

    /// Monotonic position within the session, starting at 1.
    pub sequence: u64,
}
