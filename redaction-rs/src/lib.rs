//! # Redaction
//!
//! Scrubs internal operational details out of free text before it is used in a
//! customer-facing incident update. Two passes run in a fixed order:
//!
//! 1. [`redactor`] substitutes addresses, hostnames and internal identifiers
//!    with placeholder tokens, one rule at a time.
//! 2. [`stack_trace`] drops whole lines that look like exception output.
//!
//! Every action is recorded as a [`RedactionNote`] so callers can surface an
//! audit trail next to the sanitized text.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod redactor;
pub mod stack_trace;

pub use redactor::{redact, RedactionRule, RULES};
pub use stack_trace::{filter_stack_traces, STACK_TRACE_LABEL};

/// What happened to the matched content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedactionAction {
    /// Replaced in place by a placeholder token
    Redacted,
    /// Line dropped from the output
    Removed,
}

impl fmt::Display for RedactionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redacted => write!(f, "redacted"),
            Self::Removed => write!(f, "removed"),
        }
    }
}

/// One audit entry. Serialized as `{"token": ..., "action": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionNote {
    #[serde(rename = "token")]
    pub token_kind: String,
    pub action: RedactionAction,
}

impl RedactionNote {
    pub fn redacted(token_kind: impl Into<String>) -> Self {
        Self {
            token_kind: token_kind.into(),
            action: RedactionAction::Redacted,
        }
    }

    pub fn removed(token_kind: impl Into<String>) -> Self {
        Self {
            token_kind: token_kind.into(),
            action: RedactionAction::Removed,
        }
    }
}

/// Sanitized text plus the ordered notes describing how it was produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizedText {
    pub text: String,
    pub notes: Vec<RedactionNote>,
}

impl SanitizedText {
    /// Text that needed no changes
    pub fn unchanged(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            notes: Vec::new(),
        }
    }

    pub fn is_modified(&self) -> bool {
        !self.notes.is_empty()
    }
}

/// Run both passes: substitution first, then line removal.
///
/// A stack-trace line that also carries an address is therefore redacted
/// before it is dropped, and both notes are emitted.
pub fn sanitize(input: &str) -> SanitizedText {
    let redacted = redact(input);
    let filtered = filter_stack_traces(&redacted.text);

    let mut notes = redacted.notes;
    notes.extend(filtered.notes);

    if !notes.is_empty() {
        log::debug!("Sanitized field with {} guardrail note(s)", notes.len());
    }

    SanitizedText {
        text: filtered.text,
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_wire_shape() {
        let note = RedactionNote::redacted("ip");
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json, serde_json::json!({"token": "ip", "action": "redacted"}));

        let removed = serde_json::to_value(RedactionNote::removed(STACK_TRACE_LABEL)).unwrap();
        assert_eq!(removed["action"], "removed");
        assert_eq!(removed["token"], "stack-trace-line");
    }

    #[test]
    fn test_sanitize_redacts_before_dropping_lines() {
        let input = "Checkout failing for some users\nTraceback from 10.0.0.12 worker\nRetries enabled";
        let result = sanitize(input);

        assert_eq!(result.text, "Checkout failing for some users\nRetries enabled");
        assert_eq!(
            result.notes,
            vec![
                RedactionNote::redacted("ip"),
                RedactionNote::removed("stack-trace-line"),
            ]
        );
    }

    #[test]
    fn test_sanitize_plain_text_is_untouched() {
        let result = sanitize("Customers may see slow page loads");
        assert_eq!(result, SanitizedText::unchanged("Customers may see slow page loads"));
        assert!(!result.is_modified());
    }

    #[test]
    fn test_sanitize_empty_input() {
        let result = sanitize("");
        assert_eq!(result.text, "");
        assert!(result.notes.is_empty());
    }
}
