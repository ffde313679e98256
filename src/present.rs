//! Presentation helpers
//!
//! Small formatting functions sitting between the filtered releases and the
//! page: date rendering and the hints the code highlighter needs.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use tracing::warn;

/// Language used when a code block carries no `language-*` class
pub const DEFAULT_CODE_LANGUAGE: &str = "plaintext";

/// Timestamp layouts accepted besides RFC 3339, read as UTC
const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];

// == Dates ==
/// How a publication date is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `August 20, 2024`
    Long,
    /// `Aug 20, 2024, 8:46:11 PM`
    ShortDateTime,
}

impl DateStyle {
    fn pattern(self) -> &'static str {
        match self {
            DateStyle::Long => "%B %-d, %Y",
            DateStyle::ShortDateTime => "%b %-d, %Y, %-I:%M:%S %p",
        }
    }
}

/// Formats an ISO-8601 timestamp in UTC.
///
/// Accepts RFC 3339, a date-time without offset, or a bare date. Anything
/// else is logged and rendered as an empty string.
pub fn format_date(iso: &str, style: DateStyle) -> String {
    match parse_iso(iso) {
        Some(date) => date.format(style.pattern()).to_string(),
        None => {
            warn!(iso, "encountered invalid date");
            String::new()
        }
    }
}

fn parse_iso(iso: &str) -> Option<DateTime<Utc>> {
    let iso = iso.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(iso) {
        return Some(date.with_timezone(&Utc));
    }

    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(iso, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(iso, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| Utc.from_utc_datetime(&naive))
}

// == Code Blocks ==
/// A fenced code block from a release body, ready for the highlighter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    /// Highlighter language
    pub language: String,
    /// Rendered as a themed block rather than inline
    pub multiline: bool,
    /// Block content, each line newline-terminated
    pub code: String,
}

/// Extracts the highlighter language from a code element's class list.
///
/// Takes the word characters following the first `language-` in the class,
/// so `language-c++` yields `c`.
pub fn code_language(class: Option<&str>) -> &str {
    let Some(class) = class else {
        return DEFAULT_CODE_LANGUAGE;
    };

    class
        .match_indices("language-")
        .find_map(|(start, marker)| {
            let rest = &class[start + marker.len()..];
            let end = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(rest.len());
            (end > 0).then(|| &rest[..end])
        })
        .unwrap_or(DEFAULT_CODE_LANGUAGE)
}

/// Code spanning several lines is rendered as a themed block, anything else inline.
pub fn is_multiline(code: &str) -> bool {
    code.contains('\n')
}

/// Opening fence of a code block: marker character and run length
#[derive(Debug, Clone, Copy)]
struct Fence {
    marker: char,
    len: usize,
}

/// Splits a line into its fence and the rest, if it starts with one.
fn fence_prefix(line: &str) -> Option<(Fence, &str)> {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return None;
    }
    let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = trimmed.chars().take_while(|c| *c == marker).count();
    (len >= 3).then(|| (Fence { marker, len }, &trimmed[len..]))
}

fn opening_fence(line: &str) -> Option<(Fence, &str)> {
    let (fence, info) = fence_prefix(line)?;
    let info = info.trim();
    if fence.marker == '`' && info.contains('`') {
        return None;
    }
    Some((fence, info))
}

fn closes(line: &str, open: Fence) -> bool {
    fence_prefix(line).is_some_and(|(fence, rest)| {
        fence.marker == open.marker && fence.len >= open.len && rest.trim().is_empty()
    })
}

/// Collects the fenced code blocks of a Markdown document.
///
/// The class given to the highlighter is `language-<first info word>`, as
/// Markdown renderers emit it. An unclosed fence runs to the end of the text.
pub fn code_blocks(markdown: &str) -> Vec<CodeBlock> {
    let mut blocks = Vec::new();
    let mut lines = markdown.lines();

    while let Some(line) = lines.next() {
        let Some((fence, info)) = opening_fence(line) else {
            continue;
        };

        let mut code = String::new();
        for line in lines.by_ref() {
            if closes(line, fence) {
                break;
            }
            code.push_str(line);
            code.push('\n');
        }

        let class = info
            .split_whitespace()
            .next()
            .map(|word| format!("language-{}", word));
        blocks.push(CodeBlock {
            language: code_language(class.as_deref()).to_string(),
            multiline: is_multiline(&code),
            code,
        });
    }

    blocks
}
