//! Defensive JSON extraction from free-form model output.
//!
//! The model is asked for JSON but answers in prose more often than anyone
//! would like: bare JSON, JSON inside a ` ```json ` fence, inside an
//! unlabeled fence, or buried mid-paragraph. The extractor runs an ordered
//! list of strategies and the first candidate that parses wins. The ordering
//! is a contract — downstream behavior depends on which fallback fires, so
//! new strategies go at the end.
//!
//! Exhausting every strategy is not an error here. The caller gets
//! [`Extracted::Unparseable`] and decides whether that kills the run.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

static JSON_FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json\s*(.+?)\s*```").unwrap());
static ANY_FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```[^\n]*\n(.+?)\s*```").unwrap());
static OUTER_JSON_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)[\{\[].*[\}\]]").unwrap());

/// Outcome of JSON extraction: a parsed value, or an explicit "nothing
/// parseable" that the caller must match on.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    Parsed(Value),
    Unparseable,
}

/// Extraction strategies in contract order.
const STRATEGIES: [(&str, fn(&str) -> Option<String>); 4] = [
    ("whole_text", whole_text),
    ("json_fence", json_fence),
    ("any_fence", any_fence),
    ("outer_json", outer_json),
];

/// Run the strategy cascade over raw model text.
pub fn extract_json(text: &str) -> Extracted {
    for (name, strategy) in STRATEGIES {
        if let Some(candidate) = strategy(text) {
            if let Ok(value) = serde_json::from_str::<Value>(&candidate) {
                debug!(strategy = name, "Extracted JSON from model response");
                return Extracted::Parsed(value);
            }
        }
    }
    debug!("All extraction strategies exhausted");
    Extracted::Unparseable
}

fn whole_text(text: &str) -> Option<String> {
    Some(text.trim().to_string())
}

fn json_fence(text: &str) -> Option<String> {
    JSON_FENCE_RE
        .captures(text)
        .map(|caps| caps[1].to_string())
}

fn any_fence(text: &str) -> Option<String> {
    ANY_FENCE_RE
        .captures(text)
        .map(|caps| caps[1].to_string())
}

/// Widest `{...}`/`[...]` substring. Greedy on purpose: the digest payload is
/// the outermost structure, and trailing prose after the final brace is rare.
fn outer_json(text: &str) -> Option<String> {
    OUTER_JSON_RE
        .find(text)
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_json_parses_directly() {
        let result = extract_json(r#"  {"category": "Models", "items": []}  "#);
        assert_eq!(
            result,
            Extracted::Parsed(json!({"category": "Models", "items": []}))
        );
    }

    #[test]
    fn test_labeled_fence() {
        let text = "Here is the digest you asked for:\n```json\n[{\"category\": \"Models\", \"items\": []}]\n```\nLet me know if you need more.";
        assert_eq!(
            extract_json(text),
            Extracted::Parsed(json!([{"category": "Models", "items": []}]))
        );
    }

    #[test]
    fn test_unlabeled_fence() {
        let text = "Sure!\n```\n{\"title\": \"AI Daily\", \"tags\": [\"llm\"]}\n```";
        assert_eq!(
            extract_json(text),
            Extracted::Parsed(json!({"title": "AI Daily", "tags": ["llm"]}))
        );
    }

    #[test]
    fn test_embedded_object_among_prose() {
        let text = "The summary follows. {\"title\": \"AI Daily\", \"tags\": []} Hope that helps!";
        assert_eq!(
            extract_json(text),
            Extracted::Parsed(json!({"title": "AI Daily", "tags": []}))
        );
    }

    #[test]
    fn test_garbage_is_unparseable() {
        assert_eq!(
            extract_json("I could not find any news today, sorry."),
            Extracted::Unparseable
        );
    }

    #[test]
    fn test_empty_input_is_unparseable() {
        assert_eq!(extract_json(""), Extracted::Unparseable);
    }

    #[test]
    fn test_labeled_fence_wins_over_outer_match() {
        // Prose mentions a brace before the fence; the fence strategy runs
        // first and must win.
        let text = "Schema is {category, items}. Result:\n```json\n[{\"category\": \"A\", \"items\": []}]\n```";
        assert_eq!(
            extract_json(text),
            Extracted::Parsed(json!([{"category": "A", "items": []}]))
        );
    }

    #[test]
    fn test_broken_fence_falls_through_to_outer_json() {
        // Fence contents are invalid JSON; cascade continues and the widest
        // brace match (inside the fence text) still parses.
        let text = "```json\nnot json at all {\"title\": \"T\", \"tags\": []}\n```";
        assert_eq!(
            extract_json(text),
            Extracted::Parsed(json!({"title": "T", "tags": []}))
        );
    }
}
