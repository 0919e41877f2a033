//! Runtime configuration, assembled once at process start.
//!
//! All environment and CLI inputs are folded into a single [`Config`] that is
//! passed explicitly into the model client and the orchestrator. Nothing else
//! in the pipeline reads the environment.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::cli::Cli;
use crate::error::{Error, Result};

/// Validated configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct Config {
    /// News source to fetch.
    pub source_url: Url,
    /// Directory that receives `<YYYY-MM-DD>.md` digest files.
    pub digest_dir: PathBuf,
    /// Persistent index JSON file.
    pub index_file: PathBuf,
    /// API key for the model endpoint.
    pub api_key: String,
    /// Base URL of the OpenAI-compatible API, without trailing slash.
    pub api_base: String,
    /// Default model identifier.
    pub model: String,
    /// Prompt template for the digest-extraction call.
    pub digest_prompt: PathBuf,
    /// Prompt template for the title/tags summary call.
    pub summary_prompt: PathBuf,
    /// Per-request timeout for model calls.
    pub request_timeout: Duration,
}

impl Config {
    /// Fold CLI arguments into a validated configuration.
    ///
    /// The only hard requirement beyond what `clap` already enforces is the
    /// API key: a missing or empty `DIGEST_API_KEY` is [`Error::Auth`], fatal
    /// before any network work starts.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let api_key = match cli.api_key {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Err(Error::Auth("DIGEST_API_KEY is not set")),
        };

        Ok(Self {
            source_url: cli.source_url,
            digest_dir: PathBuf::from(cli.digest_dir),
            index_file: PathBuf::from(cli.index_file),
            api_key,
            api_base: cli.api_base.trim_end_matches('/').to_string(),
            model: cli.model,
            digest_prompt: PathBuf::from(cli.digest_prompt),
            summary_prompt: PathBuf::from(cli.summary_prompt),
            request_timeout: Duration::from_secs(cli.timeout_secs),
        })
    }
}
