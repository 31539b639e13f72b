//! Interface to an optional text-generation backend.
//!
//! The pipeline treats the backend as best-effort: any [`BackendError`] is
//! absorbed by the orchestrator and the templated draft is used instead.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("Backend not configured: {0}")]
    NotConfigured(String),

    /// 400, 401, 403, 404
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// 5xx
    #[error("Server error: {0}")]
    Server(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Backend returned no text")]
    Empty,
}

impl BackendError {
    /// Transient failures worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited(_) | Self::Server(_) | Self::Network(_) | Self::Timeout(_)
        )
    }
}

/// Produce text from a prompt, failing with [`BackendError`] on any problem.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Reported as `meta.backend_mode`, e.g. "openai"
    fn mode(&self) -> &str;

    fn model(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, BackendError>;
}
