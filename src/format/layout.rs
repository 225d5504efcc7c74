//! Field lookups and fixed-width text helpers shared by the formatters.
//!
//! Vendor payloads vary by sport and endpoint, so every lookup is optional
//! and every caller supplies its own placeholder.

use chrono::DateTime;
use serde_json::Value;

/// Walk `path` through nested objects.
pub fn value_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |node, key| node.get(*key))
}

/// Scalar rendered as text. Objects, arrays and null have no text form.
pub fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Text at `path`, treating empty strings as absent.
pub fn text_at(value: &Value, path: &[&str]) -> Option<String> {
    value_at(value, path)
        .and_then(display_value)
        .filter(|s| !s.is_empty())
}

pub fn text_or(value: &Value, path: &[&str], fallback: &str) -> String {
    text_at(value, path).unwrap_or_else(|| fallback.to_string())
}

/// Array at `path`, empty when missing or not an array.
pub fn array_at<'a>(value: &'a Value, path: &[&str]) -> &'a [Value] {
    value_at(value, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// First `max` chars.
pub fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Shorten a team name to `max_len`, keeping the last word (the nickname)
/// when there is room for it.
pub fn shorten_name(name: &str, max_len: usize) -> String {
    let len = name.chars().count();
    if len <= max_len {
        return name.to_string();
    }
    let words: Vec<&str> = name.split_whitespace().collect();
    if let Some((last, first)) = words.split_last() {
        let last_len = last.chars().count();
        if !first.is_empty() && last_len + 3 <= max_len {
            let remaining = max_len - last_len - 1;
            let first_part = first.join(" ");
            let keep = remaining.saturating_sub(3);
            return format!("{}... {}", truncate(&first_part, keep), last);
        }
    }
    format!("{}...", truncate(name, max_len.saturating_sub(3)))
}

/// Truncate then left-justify to exactly `width` chars.
pub fn fit(s: &str, width: usize) -> String {
    format!("{:<width$}", truncate(s, width), width = width)
}

/// `│<content centered in inner>│`
pub fn centered_row(content: &str, inner: usize) -> String {
    format!("│{:^inner$}│", truncate(content, inner), inner = inner)
}

/// `│<content left-justified in inner>│`
pub fn left_row(content: &str, inner: usize) -> String {
    format!("│{}│", fit(content, inner))
}

pub fn blank_row(inner: usize) -> String {
    format!("│{}│", " ".repeat(inner))
}

pub fn top_border(inner: usize) -> String {
    format!("┌{}┐", "─".repeat(inner))
}

pub fn divider(inner: usize) -> String {
    format!("├{}┤", "─".repeat(inner))
}

pub fn bottom_border(inner: usize) -> String {
    format!("└{}┘", "─".repeat(inner))
}

/// Reformat an ISO-8601 timestamp; `None` when it does not parse.
pub fn format_time(raw: &str, pattern: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.format(pattern).to_string())
}

/// Greedy word wrap at `width` chars. Words longer than a line are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word = word.to_string();
        while word.chars().count() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(truncate(&word, width));
            word = word.chars().skip(width).collect();
        }
        if word.is_empty() {
            continue;
        }
        let needed = (if current.is_empty() { 0 } else { 1 }) + word.chars().count();
        if current.chars().count() + needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Drop `<...>` markup; recap stories arrive as HTML.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
