//! Ordered placeholder substitution.
//!
//! Rules run in sequence against the progressively redacted text. Each rule
//! that matches replaces every occurrence and records a single note, however
//! many occurrences there were. The order is part of the contract: emails are
//! replaced before the hostname rule runs, so `user@example.com` is reported
//! as an email and never again as a host.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{RedactionNote, SanitizedText};

/// A single substitution rule.
#[derive(Debug)]
pub struct RedactionRule {
    /// Label recorded in the note, e.g. "ip"
    pub label: &'static str,
    /// Placeholder written in place of every match
    pub replacement: &'static str,
    pub pattern: Regex,
}

impl RedactionRule {
    fn new(label: &'static str, replacement: &'static str, pattern: &str) -> Self {
        // Case-insensitive for every rule
        let pattern = Regex::new(&format!("(?i){}", pattern)).unwrap();
        Self {
            label,
            replacement,
            pattern,
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// The fixed rule set, in application order.
pub static RULES: Lazy<Vec<RedactionRule>> = Lazy::new(|| {
    vec![
        RedactionRule::new("ip", "[redacted-ip]", r"\b(?:\d{1,3}\.){3}\d{1,3}\b"),
        RedactionRule::new(
            "email",
            "[redacted-email]",
            r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}",
        ),
        RedactionRule::new(
            "hostname",
            "[redacted-host]",
            r"\b[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)+\b",
        ),
        RedactionRule::new(
            "internal-id",
            "[redacted-id]",
            r"\b(?:id|internal[-_ ]?id)[#: ]?\s*[A-Za-z0-9_-]{6,}\b",
        ),
    ]
});

/// Apply every rule in order.
pub fn redact(input: &str) -> SanitizedText {
    let mut text = input.to_string();
    let mut notes = Vec::new();

    for rule in RULES.iter() {
        if !rule.is_match(&text) {
            continue;
        }
        text = rule
            .pattern
            .replace_all(&text, rule.replacement)
            .into_owned();
        notes.push(RedactionNote::redacted(rule.label));
    }

    SanitizedText { text, notes }
}
