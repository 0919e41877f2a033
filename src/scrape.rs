//! Source fetching and HTML sanitation.
//!
//! One configured source per run. The fetch is a single GET with no retry;
//! anything other than a 2xx response is fatal. The sanitizer reduces the
//! page to the fragment the model actually needs: `<script>` elements are
//! dropped wholesale and the `<body>` contents are isolated when present.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use tracing::{info, instrument, warn};
use url::Url;

use crate::error::{Error, Result};

static SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script>").unwrap());
static BODY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<body[^>]*>(.*)</body>").unwrap());

/// Fetch the raw HTML of the configured source.
///
/// Non-success statuses are reported with the status line so the operator can
/// tell a 403 from a 503 without re-running with more logging.
#[instrument(level = "info", skip_all, fields(url = %url))]
pub async fn fetch_source(client: &Client, url: &Url) -> Result<String> {
    let response = client.get(url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Network(format!(
            "source {url} returned {status}"
        )));
    }
    let html = response.text().await?;
    info!(bytes = html.len(), "Fetched source HTML");
    Ok(html)
}

/// Strip `<script>` elements and isolate the `<body>` contents.
///
/// Pages without a `<body>` element are passed through script-stripped with a
/// warning; that is a degraded input for the model, not a failure.
pub fn sanitize_html(html: &str) -> String {
    let stripped = SCRIPT_RE.replace_all(html, "");

    match BODY_RE.captures(&stripped) {
        Some(caps) => caps[1].trim().to_string(),
        None => {
            warn!("No <body> element found; using full script-stripped HTML");
            stripped.trim().to_string()
        }
    }
}
