//! Locates the JSON object inside free-form model output.
//!
//! Models wrap their answer in prose and, usually, a markdown code fence. A
//! fenced object wins; otherwise everything from the first `{` to the last
//! `}` is taken. The greedy fallback means two separate objects in one reply
//! are read as a single (invalid) candidate.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

static FENCED_OBJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("valid fenced object pattern")
});

static BARE_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)(\{.*\})").expect("valid bare object pattern"));

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("no JSON found")]
    NoJson { raw: String },

    #[error("invalid JSON")]
    InvalidJson {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ExtractionError {
    /// The model output the extraction was attempted on.
    pub fn raw(&self) -> &str {
        match self {
            ExtractionError::NoJson { raw } | ExtractionError::InvalidJson { raw, .. } => raw,
        }
    }
}

pub fn extract_json(raw: &str) -> Result<Value, ExtractionError> {
    let candidate = FENCED_OBJECT
        .captures(raw)
        .or_else(|| BARE_OBJECT.captures(raw))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| ExtractionError::NoJson {
            raw: raw.to_string(),
        })?;

    serde_json::from_str(candidate).map_err(|source| ExtractionError::InvalidJson {
        raw: raw.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fenced_block_with_language_tag() {
        let value = extract_json("Here you go:\n```json\n{\"a\":1}\n```").unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn fenced_block_without_language_tag() {
        let value = extract_json("```\n{\"city\": \"Rome\"}\n```\nbuon viaggio").unwrap();
        assert_eq!(value, json!({"city": "Rome"}));
    }

    #[test]
    fn fenced_block_wins_over_surrounding_braces() {
        let raw = "Use {curly} braces wisely.\n```json\n{\"a\":1}\n```\nThat's all {really}.";
        assert_eq!(extract_json(raw).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn bare_object_without_fence() {
        let raw = "Sure! {\"destination\": \"Paris\", \"duration\": 2} Hope that helps.";
        assert_eq!(
            extract_json(raw).unwrap(),
            json!({"destination": "Paris", "duration": 2})
        );
    }

    #[test]
    fn nested_objects_survive() {
        let raw = "{\"itinerary\": [{\"day\": 1, \"activities\": [{\"activity\": \"walk\"}]}]}";
        let value = extract_json(raw).unwrap();
        assert_eq!(value["itinerary"][0]["activities"][0]["activity"], "walk");
    }

    #[test]
    fn no_braces_is_no_json() {
        let err = extract_json("no braces here").unwrap_err();
        assert!(matches!(err, ExtractionError::NoJson { .. }));
        assert_eq!(err.to_string(), "no JSON found");
        assert_eq!(err.raw(), "no braces here");
    }

    #[test]
    fn two_objects_are_read_greedily_and_fail() {
        let err = extract_json("prefix {\"a\":1} suffix {\"b\":2}").unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidJson { .. }));
        assert_eq!(err.to_string(), "invalid JSON");
    }

    #[test]
    fn empty_input_is_no_json() {
        assert!(matches!(
            extract_json("").unwrap_err(),
            ExtractionError::NoJson { .. }
        ));
    }
}
