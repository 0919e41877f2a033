//! Model endpoint client.
//!
//! A thin client over an OpenAI-compatible `/chat/completions` endpoint.
//! Each call is attempted exactly once: generation latency is minutes, the
//! pipeline runs on a schedule, and a failed run is rerun whole rather than
//! papered over with retries. The request timeout therefore comes from
//! configuration and defaults to five minutes.

use std::time::Instant;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::error::{Error, Result};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Client for the generative model endpoint.
///
/// Holds the shared HTTP client (with the long per-request timeout already
/// applied), the endpoint base, the credential, and the default model id.
#[derive(Debug, Clone)]
pub struct ModelClient {
    http: Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl ModelClient {
    /// Build the client from configuration.
    ///
    /// The credential is already guaranteed non-empty by
    /// [`Config::from_cli`](crate::config::Config::from_cli).
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    /// Send one prompt and return the first completion's text.
    ///
    /// `model_override` substitutes the configured model id for this call
    /// only. Exactly one request is made; any failure is returned to the
    /// caller, which decides whether it is fatal.
    #[instrument(level = "info", skip_all, fields(prompt_bytes = prompt.len()))]
    pub async fn chat(&self, prompt: &str, model_override: Option<&str>) -> Result<String> {
        let model = model_override.unwrap_or(&self.model);
        let body = ChatRequest {
            model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let t0 = Instant::now();
        let response = self
            .http
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, elapsed_ms = t0.elapsed().as_millis() as u64, "Model endpoint returned non-success status");
            return Err(Error::Network(format!(
                "model endpoint returned {status}: {body}"
            )));
        }

        let payload: Value = response.json().await?;
        let content = payload
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|choice| choice.pointer("/message/content"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::MalformedResponse(
                    "response has no choices[0].message.content field".to_string(),
                )
            })?
            .to_string();

        info!(
            model,
            elapsed_ms = t0.elapsed().as_millis() as u64,
            response_bytes = content.len(),
            "Model call completed"
        );
        Ok(content)
    }
}
