//! Fail-fast schema validation for model-produced JSON.
//!
//! The model output is untrusted: a digest is only constructed after every
//! category, item, and link has been checked for shape and non-emptiness.
//! Validation aborts at the first violation and reports the path to it
//! (`categories[2].items[0].links[1].url` style) — a partially valid digest
//! is rejected whole rather than published with holes.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::{Category, DigestDocument, DigestSummary, Link, NewsItem};

fn violation(path: impl Into<String>, reason: impl Into<String>) -> Error {
    Error::SchemaValidation {
        path: path.into(),
        reason: reason.into(),
    }
}

fn require_string(value: &Value, path: &str) -> Result<String> {
    match value.as_str() {
        Some(s) if !s.trim().is_empty() => Ok(s.to_string()),
        Some(_) => Err(violation(path, "must be a non-empty string")),
        None => Err(violation(path, "must be a string")),
    }
}

/// Validate the first model call's payload as a [`DigestDocument`].
pub fn validate_digest(value: &Value) -> Result<DigestDocument> {
    let categories = value
        .as_array()
        .ok_or_else(|| violation("$", "digest must be a JSON array of categories"))?;

    let mut out = Vec::with_capacity(categories.len());
    for (ci, raw_category) in categories.iter().enumerate() {
        out.push(validate_category(raw_category, ci)?);
    }
    Ok(DigestDocument(out))
}

fn validate_category(value: &Value, ci: usize) -> Result<Category> {
    let path = format!("categories[{ci}]");
    let object = value
        .as_object()
        .ok_or_else(|| violation(&path, "must be an object"))?;

    let name = require_string(
        object.get("category").unwrap_or(&Value::Null),
        &format!("{path}.category"),
    )?;

    let raw_items = object
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| violation(format!("{path}.items"), "must be an array"))?;

    let mut items = Vec::with_capacity(raw_items.len());
    for (ii, raw_item) in raw_items.iter().enumerate() {
        items.push(validate_item(raw_item, &path, ii)?);
    }

    Ok(Category {
        category: name,
        items,
    })
}

fn validate_item(value: &Value, parent: &str, ii: usize) -> Result<NewsItem> {
    let path = format!("{parent}.items[{ii}]");
    let object = value
        .as_object()
        .ok_or_else(|| violation(&path, "must be an object"))?;

    let title = require_string(
        object.get("title").unwrap_or(&Value::Null),
        &format!("{path}.title"),
    )?;
    let content = require_string(
        object.get("content").unwrap_or(&Value::Null),
        &format!("{path}.content"),
    )?;

    // links are optional; when present they must be an array of valid Links.
    let links = match object.get("links") {
        None | Some(Value::Null) => None,
        Some(raw_links) => {
            let array = raw_links
                .as_array()
                .ok_or_else(|| violation(format!("{path}.links"), "must be an array"))?;
            let mut links = Vec::with_capacity(array.len());
            for (li, raw_link) in array.iter().enumerate() {
                links.push(validate_link(raw_link, &path, li)?);
            }
            Some(links)
        }
    };

    Ok(NewsItem {
        title,
        content,
        links,
    })
}

fn validate_link(value: &Value, parent: &str, li: usize) -> Result<Link> {
    let path = format!("{parent}.links[{li}]");
    let object = value
        .as_object()
        .ok_or_else(|| violation(&path, "must be an object"))?;

    Ok(Link {
        text: require_string(
            object.get("text").unwrap_or(&Value::Null),
            &format!("{path}.text"),
        )?,
        url: require_string(
            object.get("url").unwrap_or(&Value::Null),
            &format!("{path}.url"),
        )?,
    })
}

/// Validate the second model call's payload as a [`DigestSummary`].
///
/// Unlike digest validation, a failure here is recoverable: the orchestrator
/// logs it and skips the index update.
pub fn validate_summary(value: &Value) -> Result<DigestSummary> {
    let object = value
        .as_object()
        .ok_or_else(|| violation("$", "summary must be an object"))?;

    let title = require_string(object.get("title").unwrap_or(&Value::Null), "$.title")?;

    let raw_tags = object
        .get("tags")
        .and_then(Value::as_array)
        .ok_or_else(|| violation("$.tags", "must be an array of strings"))?;

    let mut tags = Vec::with_capacity(raw_tags.len());
    for (ti, raw_tag) in raw_tags.iter().enumerate() {
        let tag = raw_tag
            .as_str()
            .ok_or_else(|| violation(format!("$.tags[{ti}]"), "must be a string"))?;
        tags.push(tag.to_string());
    }

    Ok(DigestSummary { title, tags })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn offending_path(err: Error) -> String {
        match err {
            Error::SchemaValidation { path, .. } => path,
            other => panic!("expected SchemaValidation, got {other:?}"),
        }
    }

    #[test]
    fn test_conforming_digest_passes() {
        let value = json!([
            {
                "category": "Models",
                "items": [
                    {
                        "title": "GPT-5",
                        "content": "OpenAI released a new model.",
                        "links": [{"text": "Announcement", "url": "https://example.com"}]
                    },
                    {"title": "Llama", "content": "Weights updated."}
                ]
            },
            {"category": "Tools", "items": []}
        ]);

        let digest = validate_digest(&value).unwrap();
        assert_eq!(digest.0.len(), 2);
        assert_eq!(digest.0[0].items.len(), 2);
        assert_eq!(digest.0[0].items[1].links, None);
        assert_eq!(digest.0[1].items.len(), 0);
    }

    #[test]
    fn test_top_level_must_be_array() {
        let err = validate_digest(&json!({"category": "Models"})).unwrap_err();
        assert_eq!(offending_path(err), "$");
    }

    #[test]
    fn test_empty_title_fails_with_path() {
        let value = json!([
            {"category": "Models", "items": [{"title": "", "content": "x"}]}
        ]);
        let err = validate_digest(&value).unwrap_err();
        assert_eq!(offending_path(err), "categories[0].items[0].title");
    }

    #[test]
    fn test_missing_content_fails() {
        let value = json!([
            {"category": "Models", "items": [{"title": "GPT-5"}]}
        ]);
        let err = validate_digest(&value).unwrap_err();
        assert_eq!(offending_path(err), "categories[0].items[0].content");
    }

    #[test]
    fn test_missing_items_fails() {
        let value = json!([{"category": "Models"}]);
        let err = validate_digest(&value).unwrap_err();
        assert_eq!(offending_path(err), "categories[0].items");
    }

    #[test]
    fn test_link_missing_url_fails_with_full_path() {
        let value = json!([
            {
                "category": "Models",
                "items": [
                    {"title": "A", "content": "a"},
                    {
                        "title": "B",
                        "content": "b",
                        "links": [
                            {"text": "ok", "url": "https://example.com"},
                            {"text": "broken"}
                        ]
                    }
                ]
            }
        ]);
        let err = validate_digest(&value).unwrap_err();
        assert_eq!(offending_path(err), "categories[0].items[1].links[1].url");
    }

    #[test]
    fn test_fail_fast_reports_first_violation_only() {
        // Both categories are bad; only the first must be reported.
        let value = json!([
            {"category": "", "items": []},
            {"category": "Tools", "items": [{"title": "", "content": ""}]}
        ]);
        let err = validate_digest(&value).unwrap_err();
        assert_eq!(offending_path(err), "categories[0].category");
    }

    #[test]
    fn test_null_links_treated_as_absent() {
        let value = json!([
            {"category": "Models", "items": [{"title": "A", "content": "a", "links": null}]}
        ]);
        let digest = validate_digest(&value).unwrap();
        assert_eq!(digest.0[0].items[0].links, None);
    }

    #[test]
    fn test_empty_links_array_is_valid() {
        let value = json!([
            {"category": "Models", "items": [{"title": "A", "content": "a", "links": []}]}
        ]);
        let digest = validate_digest(&value).unwrap();
        assert_eq!(digest.0[0].items[0].links, Some(vec![]));
    }

    #[test]
    fn test_valid_summary_passes() {
        let summary =
            validate_summary(&json!({"title": "AI Daily", "tags": ["llm", "models"]})).unwrap();
        assert_eq!(summary.title, "AI Daily");
        assert_eq!(summary.tags, vec!["llm", "models"]);
    }

    #[test]
    fn test_summary_missing_title_fails() {
        let err = validate_summary(&json!({"tags": ["llm"]})).unwrap_err();
        assert_eq!(offending_path(err), "$.title");
    }

    #[test]
    fn test_summary_missing_tags_fails() {
        let err = validate_summary(&json!({"title": "AI Daily"})).unwrap_err();
        assert_eq!(offending_path(err), "$.tags");
    }

    #[test]
    fn test_summary_non_string_tag_fails() {
        let err = validate_summary(&json!({"title": "AI Daily", "tags": ["ok", 3]})).unwrap_err();
        assert_eq!(offending_path(err), "$.tags[1]");
    }
}
