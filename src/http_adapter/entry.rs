//! Records accepted by the adapter.

use serde_json::{Map, Value};

use crate::log_record::FemtoLogRecord;

use super::error::DispatchError;

/// One log entry handed to [`FemtoHTTPAdapter::accept`](super::FemtoHTTPAdapter::accept).
#[derive(Clone, Debug, PartialEq)]
pub enum LogEntry {
    /// Serialized JSON text, parsed before use.
    Raw(String),
    /// An already-structured document.
    Structured(Value),
}

impl LogEntry {
    /// Produce the structured document for this entry.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::RecordParse`] when raw text is not valid JSON.
    pub fn into_document(self) -> Result<Value, DispatchError> {
        match self {
            Self::Raw(text) => serde_json::from_str(&text).map_err(DispatchError::RecordParse),
            Self::Structured(value) => Ok(value),
        }
    }
}

impl From<String> for LogEntry {
    fn from(value: String) -> Self {
        Self::Raw(value)
    }
}

impl From<&str> for LogEntry {
    fn from(value: &str) -> Self {
        Self::Raw(value.to_owned())
    }
}

impl From<Value> for LogEntry {
    fn from(value: Value) -> Self {
        Self::Structured(value)
    }
}

impl From<Map<String, Value>> for LogEntry {
    fn from(value: Map<String, Value>) -> Self {
        Self::Structured(Value::Object(value))
    }
}

impl From<&FemtoLogRecord> for LogEntry {
    fn from(record: &FemtoLogRecord) -> Self {
        Self::Structured(record.to_document())
    }
}

impl From<FemtoLogRecord> for LogEntry {
    fn from(record: FemtoLogRecord) -> Self {
        Self::from(&record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn raw_text_is_parsed() {
        let entry = LogEntry::from("  {\"level\":\"info\",\"msg\":\"hello\"}\n");
        assert_eq!(
            entry.into_document().expect("valid json"),
            json!({"level": "info", "msg": "hello"})
        );
    }

    #[rstest]
    fn structured_documents_pass_through() {
        let doc = json!({"nested": {"deep": [1, 2, 3]}});
        assert_eq!(LogEntry::from(doc.clone()).into_document().expect("structured"), doc);
    }

    #[rstest]
    #[case("not json")]
    #[case("{\"unterminated\":")]
    #[case("")]
    fn malformed_text_is_a_parse_error(#[case] text: &str) {
        let err = LogEntry::from(text).into_document().expect_err("must fail");
        assert!(matches!(err, DispatchError::RecordParse(_)));
    }
}
