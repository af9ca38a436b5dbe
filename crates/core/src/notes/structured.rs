//! Structured payloads embedded in model replies.
//!
//! Models asked for JSON often wrap it in a Markdown fence or surround it
//! with prose. [`extract_json_payload`] tries, in order:
//!
//! 1. the whole trimmed reply
//! 2. the body of the first ```` ```json ```` or bare ```` ``` ```` fence
//! 3. the span from the first `{` or `[` to the last matching closer

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StructuredError {
    #[error("model reply is not valid structured JSON: {reason}")]
    Malformed { text: String, reason: String },
}

impl StructuredError {
    /// The reply that could not be parsed.
    pub fn text(&self) -> &str {
        match self {
            Self::Malformed { text, .. } => text,
        }
    }
}

/// Parse the JSON payload of a model reply as `T`.
pub fn extract_json_payload<T: DeserializeOwned>(text: &str) -> Result<T, StructuredError> {
    let trimmed = text.trim();

    let first_error = match serde_json::from_str::<T>(trimmed) {
        Ok(value) => return Ok(value),
        Err(e) => e.to_string(),
    };

    if let Some(block) = fenced_block(trimmed) {
        if let Ok(value) = serde_json::from_str::<T>(block) {
            return Ok(value);
        }
    }

    if let Some(span) = bracketed_span(trimmed) {
        if let Ok(value) = serde_json::from_str::<T>(span) {
            return Ok(value);
        }
    }

    Err(StructuredError::Malformed {
        text: text.to_string(),
        reason: first_error,
    })
}

fn fenced_block(text: &str) -> Option<&str> {
    for marker in ["```json", "```JSON", "```"] {
        if let Some(start) = text.find(marker) {
            let body = &text[start + marker.len()..];
            if let Some(end) = body.find("```") {
                return Some(body[..end].trim());
            }
        }
    }
    None
}

fn bracketed_span(text: &str) -> Option<&str> {
    let start = match (text.find('{'), text.find('[')) {
        (Some(brace), Some(bracket)) => brace.min(bracket),
        (Some(brace), None) => brace,
        (None, Some(bracket)) => bracket,
        (None, None) => return None,
    };
    let close = if text[start..].starts_with('{') { '}' } else { ']' };
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Item {
        id: u32,
    }

    #[test]
    fn test_plain_json() {
        let items: Vec<Item> = extract_json_payload(r#" [{"id": 1}, {"id": 2}] "#).expect("parse");
        assert_eq!(items, vec![Item { id: 1 }, Item { id: 2 }]);
    }

    #[test]
    fn test_json_fence() {
        let reply = "Here you go:\n```json\n[{\"id\": 7}]\n```\nDone.";
        let items: Vec<Item> = extract_json_payload(reply).expect("parse");
        assert_eq!(items, vec![Item { id: 7 }]);
    }

    #[test]
    fn test_bare_fence() {
        let reply = "```\n{\"id\": 3}\n```";
        let item: Item = extract_json_payload(reply).expect("parse");
        assert_eq!(item, Item { id: 3 });
    }

    #[test]
    fn test_array_of_objects_in_prose() {
        let reply = "The entities are [{\"id\": 1}] as requested.";
        let items: Vec<Item> = extract_json_payload(reply).expect("parse");
        assert_eq!(items, vec![Item { id: 1 }]);
    }

    #[test]
    fn test_malformed_keeps_text() {
        let reply = "I could not find any entities.";
        let err = extract_json_payload::<Vec<Item>>(reply).expect_err("should fail");
        assert_eq!(err.text(), reply);
    }
}
