//! HTTP log-transport adapter.
//!
//! This module defines [`FemtoHTTPAdapter`], which turns each accepted log
//! record into one HTTP request against a configured endpoint.
//!
//! # Request shaping
//!
//! Raw text records are parsed as JSON first. When a schema is configured the
//! record is rendered through it (see [`crate::template`]) and the result is
//! parsed again to form the body; otherwise the parsed record is the body.
//!
//! # Failure handling
//!
//! Construction errors are returned synchronously by the builder. After that,
//! every failure is reported to a [`DiagnosticSink`](crate::diagnostics::DiagnosticSink):
//!
//! - **Unparseable record or rendered schema**: record dropped, nothing sent.
//! - **Network errors**: reported once, never retried.
//! - **Non-2xx status**: reported once with status code and text.

mod config;
mod entry;
mod error;
mod handler;
mod request;
mod transport;
mod url_encoding;


pub use config::{AdapterConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_WRITE_TIMEOUT, HTTPMethod};
pub use entry::LogEntry;
pub use error::DispatchError;
pub use handler::FemtoHTTPAdapter;
pub use request::OutboundRequest;
pub use transport::{
    EXTRA_QUERY, EXTRA_TIMEOUT_MS, HttpResponse, HttpTransport, TransportError, UreqTransport,
};
