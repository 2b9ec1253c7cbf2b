//! Escaping for values interpolated into single-line templates.

use std::borrow::Cow;

use serde_json::Value;

/// Two-character replacement written in place of each line break.
const ESCAPED_NEWLINE: &str = "\\n";

/// Sanitise a textual value for interpolation.
///
/// Returns `None` for anything other than a JSON string; callers stringify
/// values before sanitising.
pub fn sanitize(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(escape_line_breaks(s).into_owned()),
        _ => None,
    }
}

/// Replace every line break with a literal `\n` escape.
///
/// LF, CR, and CRLF each count as one line break. Input without line breaks
/// is returned borrowed.
pub fn escape_line_breaks(text: &str) -> Cow<'_, str> {
    if !text.contains(['\r', '\n']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                chars.next_if_eq(&'\n');
                out.push_str(ESCAPED_NEWLINE);
            }
            '\n' => out.push_str(ESCAPED_NEWLINE),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}
