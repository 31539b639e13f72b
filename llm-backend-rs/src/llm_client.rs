// llm-backend-rs/src/llm_client.rs
//
// HTTP client for the OpenAI Responses API
//
// - One POST per attempt with {model, temperature, input}
// - Exponential backoff with jitter on transient failures
// - Status codes classified into BackendError so the retry loop can decide
// - Output text gathered from every `output_text` part of every `message` item

use async_trait::async_trait;
use backoff::{backoff::Backoff, ExponentialBackoff, ExponentialBackoffBuilder};
use rand::Rng;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use config_rs::BackendConfig;
use drafting_rs::{BackendError, GenerativeBackend};

/// `meta.backend_mode` reported for this backend.
pub const OPENAI_MODE: &str = "openai";

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    temperature: f32,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    content: Option<Vec<ContentPart>>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

// Joins every output_text fragment with newlines, then trims
fn extract_output_text(response: &ResponsesResponse) -> String {
    let fragments: Vec<&str> = response
        .output
        .iter()
        .filter(|item| item.kind == "message")
        .flat_map(|item| item.content.iter().flatten())
        .filter(|part| part.kind == "output_text")
        .filter_map(|part| part.text.as_deref())
        .collect();

    fragments.join("\n").trim().to_string()
}

fn classify_status(status: StatusCode, body: &str) -> BackendError {
    match status.as_u16() {
        400 => BackendError::InvalidRequest(format!("Bad request: {}", body)),
        401 => BackendError::InvalidRequest(format!("Unauthorized: {}", body)),
        403 => BackendError::InvalidRequest(format!("Forbidden: {}", body)),
        404 => BackendError::InvalidRequest(format!("Not found: {}", body)),
        429 => BackendError::RateLimited(body.to_string()),
        code if (500..600).contains(&code) => {
            BackendError::Server(format!("({}): {}", status, body))
        }
        _ => BackendError::InvalidRequest(format!("Unexpected status ({}): {}", status, body)),
    }
}

fn classify_transport(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        BackendError::Timeout(format!("Request timed out: {}", err))
    } else if err.is_connect() {
        BackendError::Network(format!("Connection failed: {}", err))
    } else {
        BackendError::Network(err.to_string())
    }
}

pub struct OpenAiClient {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
    temperature: f32,
    max_retries: u32,
    initial_retry_delay_ms: u64,
    max_retry_delay_ms: u64,
    max_elapsed: Duration,
}

impl fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl OpenAiClient {
    /// Builds a client from configuration.
    ///
    /// Fails with [`BackendError::NotConfigured`] when no API key is set or
    /// the HTTP client cannot be constructed.
    pub fn from_config(config: &BackendConfig) -> Result<Self, BackendError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| BackendError::NotConfigured("OPENAI_API_KEY is not set".to_string()))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BackendError::NotConfigured(format!("HTTP client: {}", e)))?;

        log::info!(
            "OpenAI backend initialized (model: {}, endpoint: {})",
            config.model,
            config.api_url
        );

        Ok(Self {
            client,
            api_key,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_retries: config.max_retries,
            initial_retry_delay_ms: config.initial_retry_delay_ms,
            max_retry_delay_ms: config.max_retry_delay_ms,
            max_elapsed: config.timeout,
        })
    }

    fn create_backoff(&self) -> ExponentialBackoff {
        ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_millis(self.initial_retry_delay_ms))
            .with_max_interval(Duration::from_millis(self.max_retry_delay_ms))
            .with_multiplier(2.0)
            .with_max_elapsed_time(Some(self.max_elapsed))
            .with_randomization_factor(0.5)
            .build()
    }

    /// Sends `prompt` as the Responses API `input`, retrying transient failures.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, BackendError> {
        let mut backoff = self.create_backoff();
        let mut attempt = 0;

        let request_body = ResponsesRequest {
            model: &self.model,
            temperature: self.temperature,
            input: prompt,
        };

        log::debug!(
            "Preparing Responses request to {} (model: {})",
            self.api_url,
            self.model
        );

        loop {
            attempt += 1;

            if attempt > 1 {
                log::info!("Retry attempt {} for Responses request", attempt);
            }

            match self.execute_request(&request_body).await {
                Ok(text) => return Ok(text),
                Err(err) => {
                    if !err.is_retryable() || attempt > self.max_retries {
                        log::warn!("Responses request failed after {} attempts: {}", attempt, err);
                        return Err(err);
                    }

                    match backoff.next_backoff() {
                        Some(delay) => {
                            log::warn!("Retryable error: {}. Retrying in {:?}", err, delay);
                            let jitter = rand::thread_rng().gen_range(0..=200);
                            tokio::time::sleep(delay + Duration::from_millis(jitter)).await;
                        }
                        None => {
                            log::warn!("Exceeded maximum backoff time: {}", err);
                            return Err(err);
                        }
                    }
                }
            }
        }
    }

    async fn execute_request(
        &self,
        request_body: &ResponsesRequest<'_>,
    ) -> Result<String, BackendError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(request_body)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &text));
        }

        let data: ResponsesResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(format!("Failed to parse response: {}", e)))?;

        let text = extract_output_text(&data);
        if text.is_empty() {
            return Err(BackendError::Empty);
        }
        Ok(text)
    }
}

#[async_trait]
impl GenerativeBackend for OpenAiClient {
    fn mode(&self) -> &str {
        OPENAI_MODE
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        self.generate_text(prompt).await
    }
}
