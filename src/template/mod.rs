//! Template rendering for reshaping records before transmission.
//!
//! A schema is a string with `{{path}}` placeholders. Each placeholder is
//! replaced by the value found at `path` in the record (see [`resolve`]),
//! converted to text and passed through [`escape_line_breaks`] so multi-line
//! values cannot break a single-line JSON template. Missing or falsy values
//! render as the empty string.
//!
//! Schemas are scanned once into a [`Template`]; rendering borrows the
//! template immutably, so a single instance can be shared across threads.

mod resolve;
mod sanitize;
mod scanner;


use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

pub use resolve::resolve;
pub use sanitize::{escape_line_breaks, sanitize};
pub use scanner::{Segment, scan};

/// A schema scanned into literal and placeholder segments.
#[derive(Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Scan `schema` into a reusable template.
    pub fn parse(schema: impl Into<String>) -> Self {
        let source = schema.into();
        let segments = scan(&source);
        Self { source, segments }
    }

    /// The schema text this template was built from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Scanned segments in schema order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Iterate over the placeholder paths in schema order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(path) => Some(path.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute every placeholder using values from `document`.
    pub fn render(&self, document: &Value) -> String {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(path) => {
                    if let Some(value) = resolve(document, path) {
                        out.push_str(&escape_line_breaks(&textual_form(value)));
                    }
                }
            }
        }
        out
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("source", &self.source)
            .field("placeholders", &self.placeholders().count())
            .finish()
    }
}

/// Render `schema` against `document` in one step.
///
/// Prefer [`Template::parse`] when the same schema is rendered repeatedly.
pub fn render(schema: &str, document: &Value) -> String {
    Template::parse(schema).render(document)
}

/// Text substituted for a resolved value.
///
/// Strings are used verbatim; everything else uses its compact JSON form.
fn textual_form(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}
