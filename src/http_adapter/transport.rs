//! HTTP transport used to deliver outbound requests.
//!
//! The adapter only depends on [`HttpTransport`]. [`UreqTransport`] is the
//! default implementation: it keeps a `ureq::Agent` for connection pooling and
//! performs one blocking request per call on the adapter's send thread.

use std::time::Duration;

use thiserror::Error;
use ureq::{Agent, AgentBuilder};

use super::config::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_WRITE_TIMEOUT, HTTPMethod};
use super::request::OutboundRequest;
use super::url_encoding::{append_query, query_pairs};

/// Extra field holding a per-request timeout in milliseconds.
pub const EXTRA_TIMEOUT_MS: &str = "timeout";
/// Extra field holding an object of additional query parameters.
pub const EXTRA_QUERY: &str = "query";

/// Opaque failure raised before a response was received.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    /// Create an error from a human-readable description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<ureq::Transport> for TransportError {
    fn from(err: ureq::Transport) -> Self {
        Self::new(err.to_string())
    }
}

/// Status line of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
}

impl HttpResponse {
    pub fn new(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

impl From<&ureq::Response> for HttpResponse {
    fn from(response: &ureq::Response) -> Self {
        Self::new(response.status(), response.status_text())
    }
}

/// Capability to execute one HTTP request.
///
/// Implementations are called from the adapter's send threads, possibly
/// several at once. A non-2xx status is a successful exchange here; the
/// adapter decides how to report it.
pub trait HttpTransport: Send + Sync {
    /// Deliver `request` and return the response status.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no response was received (connection
    /// refused, DNS failure, timeout, and so on).
    fn send(&self, request: &OutboundRequest) -> Result<HttpResponse, TransportError>;
}

/// [`HttpTransport`] backed by a pooled `ureq` agent.
///
/// `POST` sends the payload as a JSON body. `GET` appends the payload's
/// top-level members to the query string. Two extra fields are honoured:
/// [`EXTRA_TIMEOUT_MS`] overrides the request timeout and [`EXTRA_QUERY`]
/// adds query parameters to either method.
#[derive(Clone, Debug)]
pub struct UreqTransport {
    agent: Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    /// Create a transport using the default timeouts.
    pub fn new() -> Self {
        Self::with_timeouts(DEFAULT_CONNECT_TIMEOUT, DEFAULT_WRITE_TIMEOUT)
    }

    /// Create a transport with explicit connect and request timeouts.
    pub fn with_timeouts(connect_timeout: Duration, write_timeout: Duration) -> Self {
        let agent = AgentBuilder::new()
            .timeout_connect(connect_timeout)
            .timeout(write_timeout)
            .build();
        Self { agent }
    }

    fn build_get_request(
        &self,
        request: &OutboundRequest,
    ) -> Result<ureq::Response, Box<ureq::Error>> {
        let mut pairs = query_pairs(&request.body);
        pairs.extend(extra_query_pairs(request));
        let url = append_query(&request.endpoint, &pairs);
        self.prepare(HTTPMethod::GET, &url, request)
            .call()
            .map_err(Box::new)
    }

    fn build_post_request(
        &self,
        request: &OutboundRequest,
    ) -> Result<ureq::Response, Box<ureq::Error>> {
        let url = append_query(&request.endpoint, &extra_query_pairs(request));
        self.prepare(HTTPMethod::POST, &url, request)
            .send_string(&request.body.to_string())
            .map_err(Box::new)
    }

    fn prepare(&self, method: HTTPMethod, url: &str, request: &OutboundRequest) -> ureq::Request {
        let mut req = self.agent.request(method.as_str(), url);
        if method == HTTPMethod::POST {
            req = req.set("Content-Type", "application/json");
        }
        for (key, value) in &request.headers {
            req = req.set(key, value);
        }
        if let Some(ms) = request.extra(EXTRA_TIMEOUT_MS).and_then(|v| v.as_u64()) {
            req = req.timeout(Duration::from_millis(ms));
        }
        req
    }
}

fn extra_query_pairs(request: &OutboundRequest) -> Vec<String> {
    match request.extra(EXTRA_QUERY) {
        Some(query @ serde_json::Value::Object(_)) => query_pairs(query),
        _ => Vec::new(),
    }
}

impl HttpTransport for UreqTransport {
    fn send(&self, request: &OutboundRequest) -> Result<HttpResponse, TransportError> {
        let result = match request.method {
            HTTPMethod::GET => self.build_get_request(request),
            HTTPMethod::POST => self.build_post_request(request),
        };

        match result {
            Ok(response) => Ok(HttpResponse::from(&response)),
            Err(err) => match *err {
                ureq::Error::Status(_, response) => Ok(HttpResponse::from(&response)),
                ureq::Error::Transport(transport_err) => Err(transport_err.into()),
            },
        }
    }
}
