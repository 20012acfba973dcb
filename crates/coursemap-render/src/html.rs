//! Escaping helpers for text, attributes and inline `<script>` data.

use serde::Serialize;

/// Escapes text for use in element content or a quoted attribute value.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
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

/// Serializes `value` as JSON that can sit inside a `<script>` element.
///
/// `</` is written as `<\/` so no string value can close the element.
///
/// # Errors
///
/// Returns the underlying serializer error.
pub fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}
