//! Request pipeline: sanitize, optionally generate, compose, format.
//!
//! Each call to [`GenerationOrchestrator::generate`] walks
//! `received -> sanitizing -> [generating] -> composing -> formatting -> responded`
//! and always ends with a [`GenerationResult`]. The generating step is only
//! entered when a backend is configured, and any failure there drops
//! straight into composing with the templated draft.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use redaction_rs::RedactionNote;

use crate::backend::{BackendError, GenerativeBackend};
use crate::cadence::resolve_next_update;
use crate::composer::{compose, Drafts};
use crate::export::{format_exports, ExportBundle};
use crate::facts::IncidentFacts;
use crate::prompt::build_prompt;

/// `meta.backend_mode` when no backend is configured.
pub const TEMPLATE_MODE: &str = "template";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guardrails {
    pub notes: Vec<RedactionNote>,
    /// Input is only ever redacted, never rejected
    pub blocked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationMeta {
    pub severity: String,
    pub next_update: String,
    pub stage: String,
    pub backend_mode: String,
    pub backend_used: bool,
    /// Set only when the backend's text made it into the drafts
    pub backend_model: Option<String>,
}

/// Response envelope for one generate request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub drafts: Drafts,
    pub exports: ExportBundle,
    pub guardrails: Guardrails,
    pub meta: GenerationMeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Received,
    Sanitizing,
    Generating,
    Composing,
    Formatting,
    Responded,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Received => "received",
            Self::Sanitizing => "sanitizing",
            Self::Generating => "generating",
            Self::Composing => "composing",
            Self::Formatting => "formatting",
            Self::Responded => "responded",
        };
        write!(f, "{}", name)
    }
}

fn advance(from: PipelineState, to: PipelineState) -> PipelineState {
    log::debug!("generation pipeline: {} -> {}", from, to);
    to
}

/// Stateless between requests; safe to share behind an `Arc`.
#[derive(Clone)]
pub struct GenerationOrchestrator {
    backend: Option<Arc<dyn GenerativeBackend>>,
    backend_timeout: Duration,
}

impl fmt::Debug for GenerationOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationOrchestrator")
            .field("backend_mode", &self.backend_mode())
            .field("backend_timeout", &self.backend_timeout)
            .finish()
    }
}

impl GenerationOrchestrator {
    pub fn new(backend: Option<Arc<dyn GenerativeBackend>>, backend_timeout: Duration) -> Self {
        Self {
            backend,
            backend_timeout,
        }
    }

    /// Deterministic templates only
    pub fn template_only() -> Self {
        Self::new(None, Duration::ZERO)
    }

    pub fn backend_mode(&self) -> &str {
        self.backend
            .as_deref()
            .map(|backend| backend.mode())
            .unwrap_or(TEMPLATE_MODE)
    }

    pub async fn generate(&self, facts: IncidentFacts) -> GenerationResult {
        let mut state = PipelineState::Received;

        state = advance(state, PipelineState::Sanitizing);
        let next_update = resolve_next_update(&facts.severity, facts.next_update.as_deref());
        let (clean, notes) = facts.sanitized();

        let mut generated = None;
        if let Some(backend) = self.backend.as_deref() {
            state = advance(state, PipelineState::Generating);
            let prompt = build_prompt(&clean, &next_update);
            generated = match self.consult(backend, &prompt).await {
                Ok(text) => Some(text),
                Err(err) => {
                    log::warn!("Backend generation failed, using template: {}", err);
                    None
                }
            };
        }

        state = advance(state, PipelineState::Composing);
        let drafts = compose(&clean, &next_update, generated.as_deref());

        state = advance(state, PipelineState::Formatting);
        let exports = format_exports(clean.stage_kind(), &drafts.standard, &next_update);

        let backend_used = generated.is_some();
        let backend_model = match (&self.backend, backend_used) {
            (Some(backend), true) => Some(backend.model().to_string()),
            _ => None,
        };

        advance(state, PipelineState::Responded);
        log::info!(
            "Generated drafts: stage={}, severity={}, notes={}, backend_used={}",
            clean.stage,
            clean.severity,
            notes.len(),
            backend_used
        );

        GenerationResult {
            drafts,
            exports,
            guardrails: Guardrails {
                notes,
                blocked: false,
            },
            meta: GenerationMeta {
                severity: clean.severity,
                next_update,
                stage: clean.stage,
                backend_mode: self.backend_mode().to_string(),
                backend_used,
                backend_model,
            },
        }
    }

    // Bounded call; blank output counts as a failure
    async fn consult(
        &self,
        backend: &dyn GenerativeBackend,
        prompt: &str,
    ) -> Result<String, BackendError> {
        let text = tokio::time::timeout(self.backend_timeout, backend.generate(prompt))
            .await
            .map_err(|_| {
                BackendError::Timeout(format!("no response within {:?}", self.backend_timeout))
            })??;

        let text = text.trim();
        if text.is_empty() {
            return Err(BackendError::Empty);
        }
        Ok(text.to_string())
    }
}
