//! Markdown rendering for a validated digest.
//!
//! Pure functions, no I/O: the same [`DigestDocument`] always renders to the
//! same bytes. The rendered file is what humans read and diff, so the format
//! is pinned down exactly:
//!
//! ```text
//! #### **Models**
//!
//! ##### GPT-5
//!
//! OpenAI released a new model.
//!
//! > 相关链接：[Announcement](https://example.com)｜[Blog](https://example.com/blog)
//!
//! ---
//! ```
//!
//! Categories are separated by a blank line; every category block closes with
//! a horizontal rule, so the document always ends on one.

use std::fmt::Write;

use crate::models::{Category, DigestDocument, NewsItem};

/// Render the full digest to Markdown.
pub fn render_digest(digest: &DigestDocument) -> String {
    let blocks: Vec<String> = digest.0.iter().map(render_category).collect();
    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

fn render_category(category: &Category) -> String {
    let mut block = String::new();
    write!(block, "#### **{}**", category.category).unwrap();
    for item in &category.items {
        block.push_str("\n\n");
        block.push_str(&render_item(item));
    }
    block.push_str("\n\n---");
    block
}

fn render_item(item: &NewsItem) -> String {
    let mut block = String::new();
    write!(block, "##### {}\n\n{}", item.title, item.content).unwrap();

    if let Some(links) = &item.links {
        if !links.is_empty() {
            let rendered: Vec<String> = links
                .iter()
                .map(|link| format!("[{}]({})", link.text, link.url))
                .collect();
            write!(block, "\n\n> 相关链接：{}", rendered.join("｜")).unwrap();
        }
    }
    block
}
