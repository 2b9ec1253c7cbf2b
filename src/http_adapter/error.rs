//! Per-record failures absorbed by the adapter.

use std::io;

use thiserror::Error;

use super::transport::TransportError;

/// Failure while turning one record into a delivered request.
///
/// None of these reach the producer; [`FemtoHTTPAdapter`](super::FemtoHTTPAdapter)
/// hands each one to its [`DiagnosticSink`](crate::diagnostics::DiagnosticSink)
/// and moves on to the next record.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A raw text record was not valid JSON; the record was dropped.
    #[error("failed to parse log record: {0}")]
    RecordParse(#[source] serde_json::Error),
    /// The schema rendered to text that is not valid JSON; the record was dropped.
    #[error("rendered schema is not valid JSON: {source}")]
    TemplateParse {
        #[source]
        source: serde_json::Error,
        /// Output of the renderer that failed to parse.
        rendered: String,
    },
    /// The transport failed before a response arrived.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] TransportError),
    /// The endpoint answered with a non-2xx status.
    #[error("HTTP endpoint responded with {status} {status_text}")]
    Status { status: u16, status_text: String },
    /// No thread could be started to perform the send.
    #[error("failed to start HTTP send thread: {0}")]
    Spawn(#[source] io::Error),
}

impl DispatchError {
    /// Short machine-readable name of the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RecordParse(_) => "record_parse",
            Self::TemplateParse { .. } => "template_parse",
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::Spawn(_) => "spawn",
        }
    }

    /// Whether the failure happened while delivering rather than preparing
    /// the request.
    pub fn is_delivery_failure(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. } | Self::Spawn(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn status_message_includes_code_and_text() {
        let err = DispatchError::Status {
            status: 500,
            status_text: "Internal Server Error".into(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP endpoint responded with 500 Internal Server Error"
        );
        assert_eq!(err.kind(), "status");
        assert!(err.is_delivery_failure());
    }

    #[rstest]
    fn parse_failures_are_not_delivery_failures() {
        let source = serde_json::from_str::<serde_json::Value>("{").expect_err("invalid json");
        let err = DispatchError::RecordParse(source);
        assert!(err.to_string().starts_with("failed to parse log record: "));
        assert!(!err.is_delivery_failure());
    }
}
