//! Query-string encoding for GET requests.
//!
//! Uses `+` for spaces to match `application/x-www-form-urlencoded`, which
//! most log collectors accept on their query endpoints.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde_json::Value;

/// Characters to percent-encode in query keys and values (excluding space).
///
/// Leaves RFC 3986 unreserved characters (alphanumeric, `-`, `_`, `.`, `~`)
/// alone. Space is mapped to `+` by [`url_encode`].
const QUERY_ENCODE_SET_NO_SPACE: &AsciiSet = &CONTROLS
    .add(b'"')
    .add(b'#')
    .add(b'$')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b',')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}')
    .add(b'\'');

/// Key used when a non-object payload is sent in a query string.
pub(super) const PAYLOAD_KEY: &str = "payload";

/// URL-encode a string using `+` for spaces.
pub(super) fn url_encode(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for (i, chunk) in s.split(' ').enumerate() {
        if i > 0 {
            result.push('+');
        }
        result.extend(utf8_percent_encode(chunk, QUERY_ENCODE_SET_NO_SPACE));
    }
    result
}

/// Encode one query parameter. Strings are used as-is, other values as JSON.
fn encode_pair(key: &str, value: &Value) -> String {
    let text = match value {
        Value::String(s) => url_encode(s),
        other => url_encode(&other.to_string()),
    };
    format!("{}={}", url_encode(key), text)
}

/// Encode `value` as query parameters.
///
/// Objects contribute one parameter per member. Any other value is
/// JSON-encoded under [`PAYLOAD_KEY`].
pub(super) fn query_pairs(value: &Value) -> Vec<String> {
    match value {
        Value::Object(map) => map.iter().map(|(k, v)| encode_pair(k, v)).collect(),
        other => vec![encode_pair(PAYLOAD_KEY, other)],
    }
}

/// Append encoded `pairs` to `url`, respecting an existing query string.
pub(super) fn append_query(url: &str, pairs: &[String]) -> String {
    if pairs.is_empty() {
        return url.to_owned();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{}", pairs.join("&"))
}
