//! Incident facts as supplied by the caller, and their defaulting rules.

use serde::{Deserialize, Serialize};
use std::fmt;

use redaction_rs::{sanitize, RedactionNote};

pub const DEFAULT_MITIGATION: &str = "investigating";
pub const DEFAULT_SEVERITY: &str = "SEV3";
pub const DEFAULT_STAGE: &str = "ongoing";

/// Lifecycle phase of the incident communication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Initial,
    Ongoing,
    Resolution,
}

impl Stage {
    /// Case-insensitive. Anything unrecognized is treated as an ongoing update.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "initial" => Self::Initial,
            "resolution" => Self::Resolution,
            _ => Self::Ongoing,
        }
    }

    /// Word-count target handed to the generative backend
    pub fn word_budget(self) -> usize {
        match self {
            Self::Initial => 150,
            Self::Ongoing => 200,
            Self::Resolution => 250,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => write!(f, "initial"),
            Self::Ongoing => write!(f, "ongoing"),
            Self::Resolution => write!(f, "resolution"),
        }
    }
}

/// Body of a generate request. Every key is optional; JSON `null` and a
/// missing key are equivalent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateRequest {
    pub summary: Option<String>,
    pub impact: Option<String>,
    pub mitigation: Option<String>,
    pub severity: Option<String>,
    pub next_update: Option<String>,
    pub stage: Option<String>,
}

/// Structured incident input with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentFacts {
    pub summary: String,
    pub impact: String,
    pub mitigation: String,
    /// As given by the caller; compared case-insensitively downstream
    pub severity: String,
    /// Lower-cased stage string, echoed back in the response metadata
    pub stage: String,
    /// Explicit cadence override. Wins over the severity policy when present.
    pub next_update: Option<String>,
}

impl Default for IncidentFacts {
    fn default() -> Self {
        Self {
            summary: String::new(),
            impact: String::new(),
            mitigation: DEFAULT_MITIGATION.to_string(),
            severity: DEFAULT_SEVERITY.to_string(),
            stage: DEFAULT_STAGE.to_string(),
            next_update: None,
        }
    }
}

// Only the empty string counts as absent; whitespace is a value like any other
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<GenerateRequest> for IncidentFacts {
    fn from(request: GenerateRequest) -> Self {
        Self {
            summary: request.summary.unwrap_or_default(),
            impact: request.impact.unwrap_or_default(),
            mitigation: request
                .mitigation
                .unwrap_or_else(|| DEFAULT_MITIGATION.to_string()),
            // An empty severity is kept and falls through to the unknown-severity cadence
            severity: request
                .severity
                .unwrap_or_else(|| DEFAULT_SEVERITY.to_string()),
            stage: present(request.stage)
                .map(|s| s.to_lowercase())
                .unwrap_or_else(|| DEFAULT_STAGE.to_string()),
            next_update: present(request.next_update),
        }
    }
}

impl IncidentFacts {
    pub fn stage_kind(&self) -> Stage {
        Stage::parse(&self.stage)
    }

    /// Copy with the free-text fields sanitized, plus the notes gathered in
    /// field order (summary, impact, mitigation). `self` is left untouched.
    pub fn sanitized(&self) -> (IncidentFacts, Vec<RedactionNote>) {
        let mut notes = Vec::new();
        let mut clean = |text: &str| {
            let result = sanitize(text);
            notes.extend(result.notes);
            result.text
        };

        let facts = IncidentFacts {
            summary: clean(&self.summary),
            impact: clean(&self.impact),
            mitigation: clean(&self.mitigation),
            ..self.clone()
        };

        (facts, notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("initial", Stage::Initial ; "initial")]
    #[test_case("RESOLUTION", Stage::Resolution ; "upper case")]
    #[test_case("ongoing", Stage::Ongoing ; "ongoing")]
    #[test_case("postmortem", Stage::Ongoing ; "unknown")]
    fn test_stage_parse(raw: &str, expected: Stage) {
        assert_eq!(Stage::parse(raw), expected);
    }

    #[test]
    fn test_word_budget() {
        assert_eq!(Stage::Initial.word_budget(), 150);
        assert_eq!(Stage::Ongoing.word_budget(), 200);
        assert_eq!(Stage::Resolution.word_budget(), 250);
        assert_eq!(Stage::parse("whatever").word_budget(), 200);
    }

    #[test]
    fn test_empty_request_gets_defaults() {
        let facts = IncidentFacts::from(GenerateRequest::default());
        assert_eq!(facts, IncidentFacts::default());
        assert_eq!(facts.mitigation, "investigating");
        assert_eq!(facts.severity, "SEV3");
        assert_eq!(facts.stage, "ongoing");
        assert_eq!(facts.next_update, None);
    }

    #[test]
    fn test_request_from_json_with_nulls() {
        let request: GenerateRequest = serde_json::from_str(
            r#"{"summary": "Checkout errors", "stage": "Initial", "next_update": "", "impact": null}"#,
        )
        .unwrap();
        let facts = IncidentFacts::from(request);

        assert_eq!(facts.summary, "Checkout errors");
        assert_eq!(facts.impact, "");
        assert_eq!(facts.stage, "initial");
        assert_eq!(facts.stage_kind(), Stage::Initial);
        assert_eq!(facts.next_update, None);
    }

    #[test]
    fn test_blank_values_only_default_when_empty() {
        let facts = IncidentFacts::from(GenerateRequest {
            mitigation: Some(String::new()),
            next_update: Some("  ".to_string()),
            stage: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(facts.mitigation, "");
        assert_eq!(facts.next_update.as_deref(), Some("  "));
        assert_eq!(facts.stage, "ongoing");

        let override_wins = IncidentFacts::from(GenerateRequest {
            next_update: Some(" after the deploy ".to_string()),
            ..Default::default()
        });
        assert_eq!(override_wins.next_update.as_deref(), Some(" after the deploy "));
    }

    #[test]
    fn test_empty_severity_is_kept() {
        let facts = IncidentFacts::from(GenerateRequest {
            severity: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(facts.severity, "");
    }

    #[test]
    fn test_sanitized_copy_collects_notes_in_field_order() {
        let facts = IncidentFacts {
            summary: "Errors from 10.2.3.4".to_string(),
            impact: "Users of status.example.com".to_string(),
            mitigation: "rolling back id: deploy-4471".to_string(),
            ..Default::default()
        };

        let (clean, notes) = facts.sanitized();

        assert_eq!(clean.summary, "Errors from [redacted-ip]");
        assert_eq!(clean.impact, "Users of [redacted-host]");
        assert_eq!(clean.mitigation, "rolling back [redacted-id]");
        let kinds: Vec<&str> = notes.iter().map(|n| n.token_kind.as_str()).collect();
        assert_eq!(kinds, vec!["ip", "hostname", "internal-id"]);

        // input is not mutated
        assert_eq!(facts.summary, "Errors from 10.2.3.4");
    }
}
