//! # Daily AI Digest
//!
//! A single-source news digestion pipeline: fetch one configured page,
//! sanitize it, have a generative model extract categorized news items,
//! validate the result against a fixed schema, render it to Markdown, and
//! keep a date-keyed index of digests up to date.
//!
//! ## Usage
//!
//! ```sh
//! export DIGEST_API_KEY=sk-...
//! export SOURCE_URL=https://news.example.com/ai
//! daily_ai_digest -o ./digests --index-file ./digests/index.json
//! ```
//!
//! ## Architecture
//!
//! One invocation is one fetch-to-digest cycle, strictly sequential:
//! 1. **Fetch & sanitize**: download the source, strip scripts, isolate body
//! 2. **Digest**: first model call, defensive JSON extraction, fail-fast
//!    schema validation, deterministic Markdown rendering, file write
//! 3. **Index**: second model call derives a title and tags; the summary is
//!    upserted into `index.json` by date (failures here do not fail the run)

use std::error::Error;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod api;
mod cli;
mod config;
mod error;
mod extract;
mod models;
mod outputs;
mod pipeline;
mod scrape;
mod utils;
mod validate;

use api::ModelClient;
use cli::Cli;
use config::Config;
use pipeline::Pipeline;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("daily_ai_digest starting up");

    let args = Cli::parse();
    let config = match Config::from_cli(args) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Configuration invalid");
            return Err(e.into());
        }
    };
    info!(source = %config.source_url, model = %config.model, "Configuration loaded");

    // Early check: fail on a bad output path before any network work.
    let digest_dir = config.digest_dir.display().to_string();
    if let Err(e) = ensure_writable_dir(&digest_dir).await {
        error!(
            path = %digest_dir,
            error = %e,
            "Digest output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let model = ModelClient::new(&config)?;
    let pipeline = Pipeline::new(config, model)?;

    match pipeline.run().await {
        Ok(path) => {
            let elapsed = start_time.elapsed();
            info!(
                path = %path.display(),
                secs = elapsed.as_secs(),
                millis = elapsed.subsec_millis(),
                "Digest run complete"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Digest run failed");
            Err(e.into())
        }
    }
}
