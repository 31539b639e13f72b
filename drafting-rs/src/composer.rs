//! Three-variant draft assembly.
//!
//! `short`, `standard` and `detailed` share one templated opening sentence.
//! Only the `standard` slot can be replaced by backend text; the other two
//! are always templated.

use serde::{Deserialize, Serialize};

use crate::facts::IncidentFacts;

pub const STANDARD_CLOSING: &str = "We will provide further details as they are verified.";
pub const DETAILED_CLOSING: &str =
    "Resolution steps are underway; we will share a full summary post-resolution.";

/// Stand-in used when the caller gave no impact.
pub const UNSPECIFIED_IMPACT: &str = "unspecified scope";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drafts {
    pub short: String,
    pub standard: String,
    pub detailed: String,
}

fn opening(facts: &IncidentFacts, next_update: &str) -> String {
    let impact = match facts.impact.trim() {
        "" => UNSPECIFIED_IMPACT,
        impact => impact,
    };

    format!(
        "We are {} an issue impacting {}. Severity: {}. Next update in {}. Summary: {}",
        facts.mitigation,
        impact,
        facts.severity,
        next_update,
        facts.summary.trim()
    )
}

/// Build all three variants. `generated` is the backend's text for the
/// standard slot, if any; blank text counts as no text.
pub fn compose(facts: &IncidentFacts, next_update: &str, generated: Option<&str>) -> Drafts {
    let short = opening(facts, next_update);

    let standard = match generated.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => format!("{} {}", short, STANDARD_CLOSING),
    };
    let detailed = format!("{} {}", short, DETAILED_CLOSING);

    Drafts {
        short,
        standard,
        detailed,
    }
}
