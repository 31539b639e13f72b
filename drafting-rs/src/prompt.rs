//! Instruction text for the generative backend.
//!
//! The rendered prompt is only ever sent to the backend; nothing in the
//! pipeline parses it back.

use crate::facts::IncidentFacts;

/// Fixed tone and disclosure policy placed at the top of every prompt.
pub const TONE_AND_POLICY: &str = "You are an assistant drafting customer-facing incident updates. \
Be clear, empathetic, and non-speculative. \
Avoid internal details, stack traces, hostnames, IPs, and employee names. \
Use simple language, keep within the length bound, and conclude with an explicit next-update time.";

/// Render the prompt for already-sanitized facts.
pub fn build_prompt(facts: &IncidentFacts, next_update: &str) -> String {
    let word_budget = facts.stage_kind().word_budget();

    format!(
        "Tone & Policy: {tone}\n\n\
         Stage: {stage}\n\
         Severity: {severity}\n\
         Next-Update: {next_update}\n\
         MitigationStatus: {mitigation}\n\
         Impact: {impact}\n\
         Summary: {summary}\n\n\
         Length bound: <= {word_budget} words.\n\
         Output plain text suitable for customers.",
        tone = TONE_AND_POLICY,
        stage = facts.stage,
        severity = facts.severity,
        next_update = next_update,
        mitigation = facts.mitigation.trim(),
        impact = facts.impact.trim(),
        summary = facts.summary.trim(),
        word_budget = word_budget,
    )
}
