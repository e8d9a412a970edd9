//! HTML escaping for message content.
//!
//! This is the only sanitization step between server-provided text and the
//! rendered markup.

/// Replace `& < > " '` with their HTML entities. Every other character is
/// copied unchanged. Not idempotent: escaping twice double-escapes `&`.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// [`escape_html`] for nullable fields: absent input yields an empty string.
#[must_use]
pub fn escape_optional(raw: Option<&str>) -> String {
    raw.map(escape_html).unwrap_or_default()
}

#[cfg(test)]
#[path = "escape_test.rs"]
mod tests;
