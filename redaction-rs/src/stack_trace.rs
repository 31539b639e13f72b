//! Line-level removal of stack traces and exception output.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{RedactionNote, SanitizedText};

pub const STACK_TRACE_LABEL: &str = "stack-trace-line";

// Case-sensitive: "Error:" is a marker, "error" in prose is not.
static STACK_TRACE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Traceback|Exception|Error:| at /| at \\|Caused by:").unwrap()
});

static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\r|\n").unwrap());

/// Split on `\n`, `\r\n` or a lone `\r`. A trailing break does not start a new line.
fn split_lines(input: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = LINE_BREAK.split(input).collect();
    if lines.len() > 1 && lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

pub fn is_stack_trace_line(line: &str) -> bool {
    STACK_TRACE_LINE.is_match(line)
}

/// Drop every stack-trace line, one note per dropped line.
///
/// Surviving lines keep their order and are rejoined with `\n`.
pub fn filter_stack_traces(input: &str) -> SanitizedText {
    let mut kept = Vec::new();
    let mut notes = Vec::new();

    for line in split_lines(input) {
        if is_stack_trace_line(line) {
            notes.push(RedactionNote::removed(STACK_TRACE_LABEL));
            continue;
        }
        kept.push(line);
    }

    SanitizedText {
        text: kept.join("\n"),
        notes,
    }
}
