//! Data models for the digest document and the persistent index.
//!
//! This module defines the structures the rest of the pipeline moves around:
//! - [`Link`], [`NewsItem`], [`Category`]: the categorized-digest schema the
//!   first model call must produce
//! - [`DigestDocument`]: one run's fully validated digest
//! - [`DigestSummary`]: the title/tags pair the second model call produces
//! - [`IndexEntry`]: one record of the persistent date-keyed index
//!
//! Instances of these types only exist after schema validation has accepted
//! the model's JSON (see [`crate::validate`]); construction from untrusted
//! input never bypasses the validator.

use serde::{Deserialize, Serialize};

/// A related link attached to a news item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Link {
    /// Display text of the link.
    pub text: String,
    /// Target URL.
    pub url: String,
}

/// A single news item inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsItem {
    /// Item headline.
    pub title: String,
    /// Item body text.
    pub content: String,
    /// Optional related links, rendered on their own line when non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
}

/// A named category and its ordered items.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    /// Category display name.
    pub category: String,
    /// Items in render order. May be empty.
    pub items: Vec<NewsItem>,
}

/// The full digest for one run: an ordered sequence of categories.
///
/// Never persisted as JSON — only its Markdown projection (see
/// [`crate::outputs::markdown`]) is written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestDocument(pub Vec<Category>);

/// Title and tags derived from the rendered digest by the second model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestSummary {
    pub title: String,
    pub tags: Vec<String>,
}

/// One record of the persistent index, keyed by `date`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IndexEntry {
    /// Natural key, `YYYY-MM-DD`.
    pub date: String,
    pub title: String,
    pub tags: Vec<String>,
}

impl IndexEntry {
    pub fn new(date: impl Into<String>, summary: DigestSummary) -> Self {
        Self {
            date: date.into(),
            title: summary.title,
            tags: summary.tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_item_omits_absent_links() {
        let item = NewsItem {
            title: "GPT-5".to_string(),
            content: "OpenAI released a new model.".to_string(),
            links: None,
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("links"));
    }

    #[test]
    fn test_category_deserialization() {
        let json = r#"{
            "category": "Models",
            "items": [
                {"title": "GPT-5", "content": "Released.", "links": [{"text": "Post", "url": "https://example.com"}]}
            ]
        }"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.category, "Models");
        assert_eq!(category.items.len(), 1);
        assert_eq!(
            category.items[0].links.as_ref().unwrap()[0].url,
            "https://example.com"
        );
    }

    #[test]
    fn test_index_entry_from_summary() {
        let entry = IndexEntry::new(
            "2024-01-02",
            DigestSummary {
                title: "AI Daily".to_string(),
                tags: vec!["llm".to_string()],
            },
        );
        assert_eq!(entry.date, "2024-01-02");
        assert_eq!(entry.title, "AI Daily");
        assert_eq!(entry.tags, vec!["llm"]);
    }

    #[test]
    fn test_index_entry_roundtrip() {
        let json = r#"{"date": "2024-01-02", "title": "A", "tags": ["x", "y"]}"#;
        let entry: IndexEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.tags.len(), 2);
        let back = serde_json::to_string(&entry).unwrap();
        assert!(back.contains("2024-01-02"));
    }
}
