//! Lenient JSON extraction from free-text model replies.
//!
//! Chat models often wrap their JSON in a Markdown fence even when told not
//! to.  [`extract`] applies one fixed unfencing policy and then hands the
//! remaining text to `serde_json`:
//!
//! 1. A `` ```json `` tagged fence wins: take the text after the first
//!    `` ```json `` up to the next `` ``` ``.
//! 2. Otherwise any `` ``` `` fence: take the text between the first and the
//!    second `` ``` ``.
//! 3. Otherwise the whole reply.
//!
//! A missing closing fence keeps everything to the end of the reply.  Only
//! the first block is ever looked at; later blocks are ignored.
//!
//! No schema is checked here.  Callers look up the keys they need.

use serde_json::Value;
use thiserror::Error;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// The reply could not be parsed as JSON after unfencing.
#[derive(Debug, Error, PartialEq)]
pub enum ExtractError {
    /// `serde_json` rejected the (unfenced) text; carries its message.
    #[error("{0}")]
    Malformed(String),
}

/// Parse the JSON payload embedded in a raw model reply.
///
/// ```
/// use english_tool::llm::extract;
///
/// let payload = extract("```json\n{\"translation\": \"สวัสดี\"}\n```").unwrap();
/// assert_eq!(payload["translation"], "สวัสดี");
/// ```
pub fn extract(raw: &str) -> Result<Value, ExtractError> {
    serde_json::from_str(unfence(raw)).map_err(|e| ExtractError::Malformed(e.to_string()))
}

/// Apply the unfencing policy and return the candidate JSON text.
pub fn unfence(raw: &str) -> &str {
    if let Some(start) = raw.find(JSON_FENCE) {
        return up_to_fence(&raw[start + JSON_FENCE.len()..]);
    }
    if let Some(start) = raw.find(FENCE) {
        return up_to_fence(&raw[start + FENCE.len()..]);
    }
    raw
}

fn up_to_fence(rest: &str) -> &str {
    match rest.find(FENCE) {
        Some(end) => &rest[..end],
        None => rest,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_tagged_fence_parses_like_serde() {
        let body = r#"{"translation": "แมว", "n": [1, 2.5, null], "nested": {"ok": true}}"#;
        let raw = format!("```json\n{body}\n```");

        let expected: Value = serde_json::from_str(body).unwrap();
        assert_eq!(extract(&raw).unwrap(), expected);
    }

    #[test]
    fn thai_translation_in_fence() {
        let raw = "```json\n{\"translation\": \"สวัสดี\"}\n```";
        assert_eq!(extract(raw).unwrap(), json!({"translation": "สวัสดี"}));
    }

    #[test]
    fn unfenced_json_is_identity() {
        let body = r#"{"errors": [{"error": "tense", "correction": "went"}]}"#;
        let expected: Value = serde_json::from_str(body).unwrap();
        assert_eq!(extract(body).unwrap(), expected);
    }

    #[test]
    fn unfenced_scalar_and_array_parse() {
        assert_eq!(extract("[1, 2]").unwrap(), json!([1, 2]));
        assert_eq!(extract("  \"hi\"  ").unwrap(), json!("hi"));
    }

    #[test]
    fn prose_around_tagged_fence_is_dropped() {
        let raw = "Sure! Here is the result:\n```json\n{\"translation\": \"ลา\"}\n```\nHope that helps.";
        assert_eq!(extract(raw).unwrap(), json!({"translation": "ลา"}));
    }

    #[test]
    fn generic_fence_is_unwrapped() {
        let raw = "```\n{\"errors\": []}\n```";
        assert_eq!(extract(raw).unwrap(), json!({"errors": []}));
    }

    #[test]
    fn tagged_fence_preferred_over_earlier_generic_fence() {
        let raw = "```text\nnot json\n```\n```json\n{\"a\": 1}\n```";
        assert_eq!(extract(raw).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn only_first_generic_block_is_considered() {
        let raw = "```\n{\"first\": 1}\n```\n```\n{\"second\": 2}\n```";
        assert_eq!(extract(raw).unwrap(), json!({"first": 1}));
    }

    #[test]
    fn generic_fence_with_language_tag_is_malformed() {
        // Only `json` is recognised as a tag; other tags stay in the text.
        let raw = "```javascript\n{\"a\": 1}\n```";
        assert!(matches!(extract(raw), Err(ExtractError::Malformed(_))));
    }

    #[test]
    fn missing_closing_fence_takes_rest_of_reply() {
        let raw = "```json\n{\"translation\": \"น้ำ\"}\n";
        assert_eq!(extract(raw).unwrap(), json!({"translation": "น้ำ"}));
    }

    #[test]
    fn plain_text_is_malformed() {
        let err = extract("no json here").unwrap_err();
        let ExtractError::Malformed(msg) = err;
        assert!(msg.contains("expected"), "parser message kept: {msg}");
    }

    #[test]
    fn empty_input_is_malformed() {
        assert!(matches!(extract(""), Err(ExtractError::Malformed(_))));
    }

    #[test]
    fn empty_fence_is_malformed() {
        assert!(matches!(extract("```json\n```"), Err(ExtractError::Malformed(_))));
    }

    #[test]
    fn unfence_returns_raw_without_fences() {
        assert_eq!(unfence("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(unfence("```json{}```"), "{}");
        assert_eq!(unfence("a```b```c```d"), "b");
    }
}
