//! Display conversions for leak logs: fallback labels, truncation and
//! search-term highlighting.

use regex::RegexBuilder;
use serde::Serialize;

use super::types::LeakLog;

pub const UNKNOWN: &str = "Unknown";
pub const ANONYMOUS: &str = "Anonymous";
pub const GENERAL: &str = "General";
pub const NO_CONTENT: &str = "No content available";

pub const LIST_PREVIEW_CHARS: usize = 200;
pub const SEARCH_PREVIEW_CHARS: usize = 300;

fn or_fallback(value: &Option<String>, fallback: &str) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

/// A leak log with every field resolved to a printable string.
#[derive(Debug, Clone, Serialize)]
pub struct LeakLogView {
    pub id: i64,
    pub channel: String,
    pub source: String,
    pub content: String,
    pub author: String,
    pub detection_date: String,
    #[serde(rename = "type")]
    pub log_type: String,
    pub created_at: String,
}

impl From<&LeakLog> for LeakLogView {
    fn from(log: &LeakLog) -> Self {
        Self {
            id: log.id,
            channel: or_fallback(&log.channel, UNKNOWN),
            source: or_fallback(&log.source, UNKNOWN),
            content: log.content.clone().unwrap_or_default(),
            author: or_fallback(&log.author, ANONYMOUS),
            detection_date: or_fallback(&log.detection_date, UNKNOWN),
            log_type: or_fallback(&log.log_type, GENERAL),
            created_at: if log.created_at.is_empty() { UNKNOWN.to_string() } else { log.created_at.clone() },
        }
    }
}

/// Cut `text` to at most `max` characters, appending `...` when shortened.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// HTML-escape `content` and wrap case-insensitive matches of `query` in `<mark>`.
/// The matched text keeps its original casing.
pub fn highlight(content: &str, query: &str) -> String {
    let query = query.trim();
    if query.is_empty() {
        return escape_html(content);
    }
    let Ok(re) = RegexBuilder::new(&regex::escape(query)).case_insensitive(true).build() else {
        return escape_html(content);
    };

    let mut out = String::with_capacity(content.len() + 16);
    let mut last = 0;
    for m in re.find_iter(content) {
        out.push_str(&escape_html(&content[last..m.start()]));
        out.push_str("<mark>");
        out.push_str(&escape_html(m.as_str()));
        out.push_str("</mark>");
        last = m.end();
    }
    out.push_str(&escape_html(&content[last..]));
    out
}

/// Flatten line breaks so a value stays on one CSV line.
pub fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
