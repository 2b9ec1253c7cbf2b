//! Tokenizer for the `{{path}}` placeholder grammar.
//!
//! A placeholder is `{{`, one or more path characters (`A-Z`, `a-z`, `0-9`,
//! `-`, `.`), then `}}`. Anything else, including an unterminated or empty
//! `{{`, is literal text. Scanning is left to right and never overlaps.

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// One piece of a scanned schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Text copied to the output unchanged.
    Literal(String),
    /// A dotted path to resolve against the record.
    Placeholder(String),
}

fn is_path_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '.'
}

/// Length in bytes of the placeholder path starting at `rest`, if `rest`
/// begins with a well-formed `path}}` sequence.
fn placeholder_len(rest: &str) -> Option<usize> {
    let path_len = rest
        .char_indices()
        .find(|&(_, c)| !is_path_char(c))
        .map_or(rest.len(), |(i, _)| i);
    (path_len > 0 && rest[path_len..].starts_with(CLOSE)).then_some(path_len)
}

/// Split `schema` into literal and placeholder segments.
///
/// Adjacent literal text is coalesced into a single segment.
pub fn scan(schema: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = schema;

    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start + OPEN.len()..];
        match placeholder_len(after_open) {
            Some(len) => {
                literal.push_str(&rest[..start]);
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Placeholder(after_open[..len].to_owned()));
                rest = &after_open[len + CLOSE.len()..];
            }
            None => {
                // Keep one brace and rescan from the next, so `{{{x}}` still
                // yields a placeholder for `x`.
                literal.push_str(&rest[..=start]);
                rest = &rest[start + 1..];
            }
        }
    }
    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}
