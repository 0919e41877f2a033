//! Command-line interface definitions for the digest pipeline.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Network endpoints and credentials can be provided via environment
//! variables; pass the API key through `DIGEST_API_KEY` so it stays out of
//! shell history and process listings.

use clap::Parser;
use url::Url;

/// Command-line arguments for one pipeline run.
///
/// These are raw inputs only — they are folded into a single validated
/// [`crate::config::Config`] at startup, which is what the pipeline
/// actually consumes.
///
/// # Examples
///
/// ```sh
/// # Basic usage
/// daily_ai_digest -o ./digests --index-file ./digests/index.json
///
/// # Overriding the model and endpoint
/// daily_ai_digest -o ./digests --model gpt-4o --api-base https://api.example.com/v1
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// URL of the news source to fetch
    #[arg(long, env = "SOURCE_URL", value_parser = Url::parse)]
    pub source_url: Url,

    /// Output directory for the daily digest Markdown files
    #[arg(short = 'o', long, default_value = "digests")]
    pub digest_dir: String,

    /// Path to the persistent digest index JSON file
    #[arg(long, default_value = "digests/index.json")]
    pub index_file: String,

    /// API key for the model endpoint (prefer the environment variable)
    #[arg(long, env = "DIGEST_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "DIGEST_API_BASE", default_value = "https://api.openai.com/v1")]
    pub api_base: String,

    /// Model identifier sent with each chat request
    #[arg(long, env = "DIGEST_MODEL", default_value = "gpt-4o-mini")]
    pub model: String,

    /// Prompt template for the digest-extraction call
    #[arg(long, default_value = "prompts/digest.txt")]
    pub digest_prompt: String,

    /// Prompt template for the title/tags summary call
    #[arg(long, default_value = "prompts/summary.txt")]
    pub summary_prompt: String,

    /// Per-request timeout in seconds; generation can take minutes
    #[arg(long, default_value_t = 300)]
    pub timeout_secs: u64,
}
