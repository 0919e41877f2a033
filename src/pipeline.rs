//! Run orchestration: the fetch-to-digest cycle.
//!
//! Two phases with different failure policies:
//!
//! 1. **Digest phase** — fetch, sanitize, first model call, extract,
//!    validate, render, store. Any failure is fatal and nothing is persisted
//!    before validation passes.
//! 2. **Index phase** — second model call over the rendered Markdown,
//!    extract, validate, upsert. Any failure here is logged and the upsert is
//!    skipped; the digest file is already durable, so the run still succeeds.
//!
//! Everything is strictly sequential. No stage starts before the previous
//! one finishes, and no network call is retried.

use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use reqwest::Client;
use tokio::fs;
use tracing::{info, instrument, warn};

use crate::api::ModelClient;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::extract::{extract_json, Extracted};
use crate::models::IndexEntry;
use crate::outputs::{index, markdown, store};
use crate::scrape::{fetch_source, sanitize_html};
use crate::utils::truncate_for_log;
use crate::validate::{validate_digest, validate_summary};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Prompt assembly: opaque template text, two newlines, then the content.
pub(crate) fn build_prompt(template: &str, content: &str) -> String {
    format!("{template}\n\n{content}")
}

/// One pipeline invocation's driver.
pub struct Pipeline {
    config: Config,
    model: ModelClient,
    fetcher: Client,
}

impl Pipeline {
    pub fn new(config: Config, model: ModelClient) -> Result<Self> {
        let fetcher = Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self {
            config,
            model,
            fetcher,
        })
    }

    /// Run one full fetch-to-digest cycle. Returns the digest file path.
    #[instrument(level = "info", skip_all, fields(source = %self.config.source_url))]
    pub async fn run(&self) -> Result<PathBuf> {
        let date = Local::now().date_naive().to_string();

        // ---- Digest phase: everything here is fatal ----
        let digest_template = fs::read_to_string(&self.config.digest_prompt).await?;
        let html = fetch_source(&self.fetcher, &self.config.source_url).await?;
        let content = sanitize_html(&html);
        info!(bytes = content.len(), "Sanitized source content");

        let response = self
            .model
            .chat(&build_prompt(&digest_template, &content), None)
            .await?;

        let value = match extract_json(&response) {
            Extracted::Parsed(value) => value,
            Extracted::Unparseable => {
                return Err(Error::MalformedResponse(format!(
                    "no JSON found in digest response: {}",
                    truncate_for_log(&response, 300)
                )));
            }
        };

        let digest = validate_digest(&value)?;
        info!(categories = digest.0.len(), "Digest validated");

        let rendered = markdown::render_digest(&digest);
        let path = store::write_digest(&self.config.digest_dir, &date, &rendered).await?;

        // ---- Index phase: failures are recoverable ----
        match self.index_phase(&rendered, &date).await {
            Ok(()) => info!("Index updated"),
            Err(e) => warn!(error = %e, "Index phase failed; digest saved, skipping index update"),
        }

        Ok(path)
    }

    /// Derive title and tags from the rendered digest and upsert the index.
    async fn index_phase(&self, rendered: &str, date: &str) -> Result<()> {
        let summary_template = fs::read_to_string(&self.config.summary_prompt).await?;
        let response = self
            .model
            .chat(&build_prompt(&summary_template, rendered), None)
            .await?;

        let value = match extract_json(&response) {
            Extracted::Parsed(value) => value,
            Extracted::Unparseable => {
                return Err(Error::MalformedResponse(format!(
                    "no JSON found in summary response: {}",
                    truncate_for_log(&response, 300)
                )));
            }
        };

        let summary = validate_summary(&value)?;
        index::upsert_entry(&self.config.index_file, IndexEntry::new(date, summary)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_joins_with_blank_line() {
        assert_eq!(
            build_prompt("Extract the news.", "<p>hello</p>"),
            "Extract the news.\n\n<p>hello</p>"
        );
    }
}
