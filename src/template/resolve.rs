//! Dotted-path lookup into structured records.

use serde_json::Value;

/// Separator between path segments.
const PATH_DELIMITER: char = '.';

/// Resolve `path` against `document`, returning the value it names.
///
/// `None` signals that the path has no usable value: a segment is missing,
/// an intermediate value is not a container, or a value along the way is
/// falsy (`null`, `false`, numeric zero, or the empty string). Arrays are
/// indexed with decimal segments, so `"frames.0.file"` walks into the first
/// element of `frames`.
pub fn resolve<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    if !path.contains(PATH_DELIMITER) {
        return lookup(document, path).filter(|v| is_truthy(v));
    }
    path.split(PATH_DELIMITER).try_fold(document, |current, segment| {
        lookup(current, segment).filter(|v| is_truthy(v))
    })
}

fn lookup<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Coarse truthiness used by the resolver.
///
/// Containers are truthy even when empty.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
