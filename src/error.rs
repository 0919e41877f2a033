//! Error taxonomy for the digest pipeline.
//!
//! Every fatal failure surfaces as one of these variants. Note that a model
//! response we cannot extract JSON from is *not* represented here — the
//! extractor returns [`crate::extract::Extracted::Unparseable`] and the
//! orchestrator decides whether that is fatal (digest phase) or merely a
//! warning (index phase).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure, non-success HTTP status, or timeout.
    #[error("network error: {0}")]
    Network(String),

    /// A required credential was missing when configuration was assembled.
    #[error("missing credential: {0}")]
    Auth(&'static str),

    /// The model endpoint answered, but the response is missing the expected
    /// completion field.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    /// Parsed JSON does not satisfy the digest or summary schema. `path`
    /// names the first offending location.
    #[error("schema validation failed at {path}: {reason}")]
    SchemaValidation { path: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::Network(format!("request timed out: {e}"))
        } else {
            Error::Network(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
