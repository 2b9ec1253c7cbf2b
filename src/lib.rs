//! HTTP log transport for femtologging pipelines.
//!
//! [`FemtoHTTPAdapter`] accepts log records one at a time, as raw JSON text,
//! structured [`serde_json::Value`] documents, or [`FemtoLogRecord`]s, and
//! forwards each one to a configured endpoint. An optional `{{path}}`
//! [`Template`] reshapes records before they are sent.
//!
//! Construction is the only step that can fail the caller:
//!
//! ```no_run
//! use femtologging_http::{HTTPAdapterBuilder, HandlerBuilderTrait};
//! use serde_json::json;
//!
//! let adapter = HTTPAdapterBuilder::from_value(&json!({
//!     "endpoint": "https://logs.example.test/ingest",
//!     "headers": {"Authorization": "Bearer token"},
//!     "schema": "{\"host\":\"{{hostname}}\",\"message\":\"{{msg}}\"}",
//! }))
//! .build_inner()
//! .expect("valid configuration");
//!
//! adapter.accept(json!({"hostname": "box1", "msg": "started"}));
//! adapter.accept(r#"{"hostname":"box1","msg":"ready"}"#);
//! ```
//!
//! After that, parse and delivery failures go to a
//! [`DiagnosticSink`](diagnostics::DiagnosticSink) and never reach the producer.

pub mod diagnostics;
pub mod handler;
pub mod handlers;
pub mod http_adapter;
pub mod level;
pub mod log_record;
pub mod template;

pub use diagnostics::{DiagnosticSink, LogSink, StderrSink};
#[cfg(feature = "tracing-compat")]
pub use diagnostics::TracingSink;
pub use handler::FemtoHandler;
pub use handlers::{HTTPAdapterBuilder, HandlerBuildError, HandlerBuilderTrait};
pub use http_adapter::{
    AdapterConfig, DispatchError, FemtoHTTPAdapter, HTTPMethod, HttpResponse, HttpTransport,
    LogEntry, OutboundRequest, TransportError, UreqTransport,
};
pub use level::FemtoLevel;
pub use log_record::{FemtoLogRecord, RecordMetadata};
pub use template::Template;
