//! Severity-driven update cadence.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cadence promised when the severity is missing or not recognized.
pub const DEFAULT_CADENCE: &str = "60 minutes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Sev1,
    Sev2,
    Sev3,
    Sev4,
}

impl Severity {
    /// Case-insensitive match on "SEV1".."SEV4"
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_uppercase().as_str() {
            "SEV1" => Some(Self::Sev1),
            "SEV2" => Some(Self::Sev2),
            "SEV3" => Some(Self::Sev3),
            "SEV4" => Some(Self::Sev4),
            _ => None,
        }
    }

    pub fn cadence(self) -> &'static str {
        match self {
            Self::Sev1 => "30 minutes",
            Self::Sev2 => "60 minutes",
            Self::Sev3 => "2 hours",
            Self::Sev4 => "daily or on meaningful change",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sev1 => write!(f, "SEV1"),
            Self::Sev2 => write!(f, "SEV2"),
            Self::Sev3 => write!(f, "SEV3"),
            Self::Sev4 => write!(f, "SEV4"),
        }
    }
}

pub fn default_cadence(severity: &str) -> &'static str {
    Severity::parse(severity)
        .map(Severity::cadence)
        .unwrap_or(DEFAULT_CADENCE)
}

/// The caller's override when given, otherwise the policy cadence.
pub fn resolve_next_update(severity: &str, next_update: Option<&str>) -> String {
    match next_update {
        Some(explicit) => explicit.to_string(),
        None => default_cadence(severity).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("SEV1", "30 minutes" ; "sev1")]
    #[test_case("sev2", "60 minutes" ; "sev2 lower case")]
    #[test_case("Sev3", "2 hours" ; "sev3 mixed case")]
    #[test_case("SEV4", "daily or on meaningful change" ; "sev4")]
    #[test_case("SEV9", "60 minutes" ; "unknown")]
    #[test_case("", "60 minutes" ; "empty")]
    fn test_default_cadence(severity: &str, expected: &str) {
        assert_eq!(default_cadence(severity), expected);
    }

    #[test]
    fn test_override_wins_unmodified() {
        assert_eq!(resolve_next_update("SEV1", None), "30 minutes");
        assert_eq!(
            resolve_next_update("SEV1", Some("  at 14:00 UTC ")),
            "  at 14:00 UTC "
        );
    }

    #[test]
    fn test_severity_display_round_trips_parse() {
        for sev in [Severity::Sev1, Severity::Sev2, Severity::Sev3, Severity::Sev4] {
            assert_eq!(Severity::parse(&sev.to_string()), Some(sev));
        }
    }
}
