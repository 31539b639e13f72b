//! # Drafting
//!
//! Turns structured incident facts into customer-facing status updates.
//!
//! - `facts`: request defaulting and the sanitized working copy
//! - `cadence`: severity to next-update interval
//! - `prompt`: instruction text for an optional generative backend
//! - `composer`: short / standard / detailed drafts
//! - `export`: status-page and email layouts
//! - `orchestrator`: the per-request pipeline tying it together

pub mod backend;
pub mod cadence;
pub mod composer;
pub mod export;
pub mod facts;
pub mod orchestrator;
pub mod prompt;

pub use backend::{BackendError, GenerativeBackend};
pub use cadence::{default_cadence, resolve_next_update, Severity};
pub use composer::{compose, Drafts};
pub use export::{format_exports, ExportBundle};
pub use facts::{GenerateRequest, IncidentFacts, Stage};
pub use orchestrator::{GenerationMeta, GenerationOrchestrator, GenerationResult, Guardrails};
pub use prompt::build_prompt;

pub use redaction_rs::{RedactionAction, RedactionNote};
