//! Status-page and email renderings of the chosen draft.

use serde::{Deserialize, Serialize};

use crate::facts::Stage;

/// Hard cap on the status-page rendering, in characters.
pub const STATUSPAGE_MAX_CHARS: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportBundle {
    pub statuspage: String,
    pub email: String,
}

pub fn statuspage_title(stage: Stage) -> &'static str {
    match stage {
        Stage::Initial => "Service Degradation – Update",
        Stage::Resolution => "Incident Resolved – Summary",
        Stage::Ongoing => "Incident Update – Progress",
    }
}

pub fn email_subject(stage: Stage) -> &'static str {
    match stage {
        Stage::Initial => "[Incident] Initial Notice",
        Stage::Resolution => "[Incident] Resolved",
        Stage::Ongoing => "[Incident] Update",
    }
}

fn layout(heading: &str, draft: &str, next_update: &str) -> String {
    let footer = format!("Next update: {}", next_update);
    [heading, "", draft, "", footer.as_str()].join("\n")
}

// Plain character cut, not word-aware
fn truncate_chars(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text,
    }
}

pub fn format_exports(stage: Stage, draft: &str, next_update: &str) -> ExportBundle {
    let statuspage = layout(statuspage_title(stage), draft, next_update);
    let email = layout(email_subject(stage), draft, next_update);

    ExportBundle {
        statuspage: truncate_chars(statuspage, STATUSPAGE_MAX_CHARS),
        email,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Stage::Initial, "Service Degradation – Update", "[Incident] Initial Notice" ; "initial")]
    #[test_case(Stage::Ongoing, "Incident Update – Progress", "[Incident] Update" ; "ongoing")]
    #[test_case(Stage::Resolution, "Incident Resolved – Summary", "[Incident] Resolved" ; "resolution")]
    fn test_headings_by_stage(stage: Stage, title: &str, subject: &str) {
        let bundle = format_exports(stage, "Draft body.", "2 hours");

        assert_eq!(
            bundle.statuspage,
            format!("{}\n\nDraft body.\n\nNext update: 2 hours", title)
        );
        assert_eq!(
            bundle.email,
            format!("{}\n\nDraft body.\n\nNext update: 2 hours", subject)
        );
    }

    #[test]
    fn test_statuspage_is_capped_email_is_not() {
        let draft = "a".repeat(3000);
        let bundle = format_exports(Stage::Ongoing, &draft, "30 minutes");

        assert_eq!(bundle.statuspage.chars().count(), STATUSPAGE_MAX_CHARS);
        assert!(bundle.statuspage.starts_with("Incident Update – Progress\n\naaa"));
        assert!(!bundle.statuspage.contains("Next update"));
        assert!(bundle.email.contains(&draft));
        assert!(bundle.email.ends_with("Next update: 30 minutes"));
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let text = "é".repeat(2500);
        let cut = truncate_chars(text, STATUSPAGE_MAX_CHARS);
        assert_eq!(cut.chars().count(), STATUSPAGE_MAX_CHARS);

        let short = truncate_chars("short".to_string(), STATUSPAGE_MAX_CHARS);
        assert_eq!(short, "short");
    }
}
