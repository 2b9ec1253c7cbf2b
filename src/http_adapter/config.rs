//! Configuration consumed by the HTTP adapter.
//!
//! [`HTTPAdapterBuilder`](crate::handlers::HTTPAdapterBuilder) validates input
//! and produces an [`AdapterConfig`]; nothing else can construct one, so every
//! adapter holds a configuration that passed validation.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde_json::{Map, Value};

use crate::template::Template;

/// Default connection timeout applied when establishing HTTP connections.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Default write/request timeout applied to HTTP requests.
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP methods supported by the adapter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HTTPMethod {
    /// HTTP GET method - appends payload to URL query string.
    GET,
    /// HTTP POST method - sends payload in request body.
    #[default]
    POST,
}

impl HTTPMethod {
    /// Convert to the string representation used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GET => "GET",
            Self::POST => "POST",
        }
    }
}

impl fmt::Display for HTTPMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HTTPMethod {
    type Err = ();

    /// Parse an exact, upper-case method name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Self::GET),
            "POST" => Ok(Self::POST),
            _ => Err(()),
        }
    }
}

/// Validated, immutable adapter configuration.
#[derive(Clone, Debug)]
pub struct AdapterConfig {
    pub(crate) endpoint: String,
    pub(crate) method: HTTPMethod,
    pub(crate) headers: BTreeMap<String, String>,
    pub(crate) extra_fields: Map<String, Value>,
    pub(crate) schema: Option<Template>,
}

impl AdapterConfig {
    /// Target URL for HTTP requests.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// HTTP method used for every request.
    pub fn method(&self) -> HTTPMethod {
        self.method
    }

    /// Headers attached to every request.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Caller-defined fields carried alongside each request.
    pub fn extra_fields(&self) -> &Map<String, Value> {
        &self.extra_fields
    }

    /// Template applied to each record, if one was configured.
    pub fn schema(&self) -> Option<&Template> {
        self.schema.as_ref()
    }
}
