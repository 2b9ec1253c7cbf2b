//! Builder for [`FemtoHTTPAdapter`](crate::http_adapter::FemtoHTTPAdapter).
//!
//! Accepts typed setters or a loosely-typed JSON configuration object and
//! validates both the same way: a non-blank endpoint is required, the method
//! must be `GET` or `POST` (default `POST`), and malformed `headers` or
//! `extraFields` are ignored rather than rejected.

use std::{collections::BTreeMap, fmt, sync::Arc, time::Duration};

use serde_json::{Map, Value};

use crate::diagnostics::{DiagnosticSink, StderrSink};
use crate::http_adapter::{
    AdapterConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_WRITE_TIMEOUT, FemtoHTTPAdapter, HTTPMethod,
    HttpTransport, UreqTransport,
};
use crate::template::Template;

use super::{HandlerBuildError, HandlerBuilderTrait};

/// Configuration keys recognised by [`HTTPAdapterBuilder::from_value`].
const KEY_ENDPOINT: &str = "endpoint";
const KEY_METHOD: &str = "method";
const KEY_HEADERS: &str = "headers";
const KEY_EXTRA_FIELDS: &str = "extraFields";
const KEY_SCHEMA: &str = "schema";

macro_rules! ensure_positive {
    ($value:expr, $field:expr) => {{
        if $value == 0 {
            Err(HandlerBuildError::InvalidConfiguration(format!(
                "{} must be greater than zero",
                $field
            )))
        } else {
            Ok($value)
        }
    }};
}

macro_rules! option_setter {
    ($(#[$meta:meta])* $fn_name:ident, $field:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $fn_name(mut self, value: $ty) -> Self {
            self.$field = Some(value);
            self
        }
    };
}

/// Builder for constructing [`FemtoHTTPAdapter`] instances.
#[derive(Clone, Default)]
pub struct HTTPAdapterBuilder {
    endpoint: Option<String>,
    method: Option<String>,
    headers: BTreeMap<String, String>,
    extra_fields: Map<String, Value>,
    schema: Option<String>,
    connect_timeout_ms: Option<u64>,
    write_timeout_ms: Option<u64>,
    transport: Option<Arc<dyn HttpTransport>>,
    sink: Option<Arc<dyn DiagnosticSink>>,
}

impl HTTPAdapterBuilder {
    /// Create a new builder with no endpoint configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate a builder from a JSON configuration object.
    ///
    /// Recognised keys are `endpoint`, `method`, `headers`, `extraFields`, and
    /// `schema`. Unknown keys are ignored. Validation happens at build time,
    /// so a missing endpoint or unsupported method surfaces from
    /// [`build_config`](Self::build_config).
    pub fn from_value(config: &Value) -> Self {
        let mut builder = Self::new();
        let Some(obj) = config.as_object() else {
            return builder;
        };
        builder.endpoint = obj
            .get(KEY_ENDPOINT)
            .and_then(Value::as_str)
            .map(str::to_owned);
        builder.method = match obj.get(KEY_METHOD) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            // Kept verbatim so validation rejects it.
            Some(other) => Some(other.to_string()),
        };
        if let Some(Value::Object(headers)) = obj.get(KEY_HEADERS) {
            builder.headers = headers
                .iter()
                .filter_map(|(k, v)| header_value(v).map(|v| (k.clone(), v)))
                .collect();
        }
        if let Some(Value::Object(extra)) = obj.get(KEY_EXTRA_FIELDS) {
            builder.extra_fields = extra.clone();
        }
        builder.schema = obj
            .get(KEY_SCHEMA)
            .and_then(Value::as_str)
            .map(str::to_owned);
        builder
    }

    /// Set the target endpoint URL (required).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the HTTP method. Defaults to POST.
    pub fn with_method(mut self, method: HTTPMethod) -> Self {
        self.method = Some(method.as_str().to_owned());
        self
    }

    /// Set the HTTP method by name; anything but `GET` or `POST` fails the build.
    pub fn with_method_str(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Replace all custom HTTP headers.
    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Add a single custom HTTP header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Replace all extra fields carried with each request.
    pub fn with_extra_fields(mut self, fields: Map<String, Value>) -> Self {
        self.extra_fields = fields;
        self
    }

    /// Add a single extra field.
    pub fn with_extra_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra_fields.insert(key.into(), value);
        self
    }

    /// Reshape each record through `schema` before sending.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    option_setter!(
        #[doc = "Set the connect timeout in milliseconds for the default transport."]
        with_connect_timeout_ms,
        connect_timeout_ms,
        u64
    );
    option_setter!(
        #[doc = "Set the request timeout in milliseconds for the default transport."]
        with_write_timeout_ms,
        write_timeout_ms,
        u64
    );

    /// Deliver requests through `transport` instead of the default `ureq` agent.
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Report failures to `sink` instead of standard error.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    fn validate(&self) -> Result<(), HandlerBuildError> {
        self.validate_endpoint()?;
        self.validate_timeouts()?;
        Ok(())
    }

    fn validate_endpoint(&self) -> Result<(), HandlerBuildError> {
        match &self.endpoint {
            Some(endpoint) if !endpoint.trim().is_empty() => Ok(()),
            _ => Err(HandlerBuildError::InvalidConfiguration(
                "endpoint required".into(),
            )),
        }
    }

    fn resolve_method(&self) -> Result<HTTPMethod, HandlerBuildError> {
        match &self.method {
            None => Ok(HTTPMethod::default()),
            Some(name) => name
                .parse()
                .map_err(|()| HandlerBuildError::InvalidConfiguration("invalid method".into())),
        }
    }

    fn validate_timeouts(&self) -> Result<(), HandlerBuildError> {
        if let Some(timeout) = self.connect_timeout_ms {
            ensure_positive!(timeout, "connect_timeout_ms")?;
        }
        if let Some(timeout) = self.write_timeout_ms {
            ensure_positive!(timeout, "write_timeout_ms")?;
        }
        Ok(())
    }

    /// Validate the builder and produce the adapter configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerBuildError::InvalidConfiguration`] when the endpoint is
    /// missing or blank, the method is not `GET` or `POST`, or a timeout is zero.
    pub fn build_config(&self) -> Result<AdapterConfig, HandlerBuildError> {
        self.validate()?;
        let method = self.resolve_method()?;

        Ok(AdapterConfig {
            endpoint: self.endpoint.clone().unwrap_or_default(),
            method,
            headers: self.headers.clone(),
            extra_fields: self.extra_fields.clone(),
            schema: self
                .schema
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(Template::parse),
        })
    }

    fn default_transport(&self) -> Arc<dyn HttpTransport> {
        let connect = self
            .connect_timeout_ms
            .map_or(DEFAULT_CONNECT_TIMEOUT, Duration::from_millis);
        let write = self
            .write_timeout_ms
            .map_or(DEFAULT_WRITE_TIMEOUT, Duration::from_millis);
        Arc::new(UreqTransport::with_timeouts(connect, write))
    }
}

/// Header values pass through as strings; numbers and booleans are
/// stringified and anything else is dropped.
fn header_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl HandlerBuilderTrait for HTTPAdapterBuilder {
    type Handler = FemtoHTTPAdapter;

    fn build_inner(&self) -> Result<Self::Handler, HandlerBuildError> {
        let config = self.build_config()?;
        let transport = self
            .transport
            .clone()
            .unwrap_or_else(|| self.default_transport());
        let sink = self
            .sink
            .clone()
            .unwrap_or_else(|| Arc::new(StderrSink) as Arc<dyn DiagnosticSink>);
        Ok(FemtoHTTPAdapter::new(config, transport, sink))
    }
}

impl fmt::Debug for HTTPAdapterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HTTPAdapterBuilder")
            .field("endpoint", &self.endpoint)
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("extra_fields", &self.extra_fields)
            .field("schema", &self.schema)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("write_timeout_ms", &self.write_timeout_ms)
            .field("custom_transport", &self.transport.is_some())
            .field("custom_sink", &self.sink.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn invalid_message(err: HandlerBuildError) -> String {
        match err {
            HandlerBuildError::InvalidConfiguration(msg) => msg,
        }
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({"endpoint": ""}))]
    #[case(json!({"endpoint": "   "}))]
    #[case(json!({"endpoint": 42}))]
    #[case(json!({"endpoint": null}))]
    #[case(json!("https://example.test/log"))]
    fn endpoint_is_required(#[case] config: Value) {
        let err = HTTPAdapterBuilder::from_value(&config)
            .build_config()
            .expect_err("must fail");
        assert_eq!(invalid_message(err), "endpoint required");
    }

    #[rstest]
    #[case(json!("PUT"))]
    #[case(json!("get"))]
    #[case(json!(""))]
    #[case(json!(1))]
    #[case(json!(["GET"]))]
    fn unsupported_methods_are_rejected(#[case] method: Value) {
        let config = json!({"endpoint": "https://example.test/log", "method": method});
        let err = HTTPAdapterBuilder::from_value(&config)
            .build_config()
            .expect_err("must fail");
        assert_eq!(invalid_message(err), "invalid method");
    }

    #[rstest]
    #[case(json!({"endpoint": "https://e.test"}), HTTPMethod::POST)]
    #[case(json!({"endpoint": "https://e.test", "method": null}), HTTPMethod::POST)]
    #[case(json!({"endpoint": "https://e.test", "method": "POST"}), HTTPMethod::POST)]
    #[case(json!({"endpoint": "https://e.test", "method": "GET"}), HTTPMethod::GET)]
    fn resolves_method(#[case] config: Value, #[case] expected: HTTPMethod) {
        let config = HTTPAdapterBuilder::from_value(&config)
            .build_config()
            .expect("valid config");
        assert_eq!(config.method(), expected);
    }

    #[rstest]
    fn malformed_maps_are_ignored() {
        let config = HTTPAdapterBuilder::from_value(&json!({
            "endpoint": "https://e.test",
            "headers": "X-Nope: 1",
            "extraFields": [1, 2, 3],
        }))
        .build_config()
        .expect("lenient");
        assert!(config.headers().is_empty());
        assert!(config.extra_fields().is_empty());
    }

    #[rstest]
    fn header_values_are_normalised() {
        let config = HTTPAdapterBuilder::from_value(&json!({
            "endpoint": "https://e.test",
            "headers": {
                "X-Str": "a",
                "X-Num": 5,
                "X-Bool": true,
                "X-Obj": {"k": 1},
                "X-Null": null,
            },
        }))
        .build_config()
        .expect("valid config");
        let headers: Vec<(&str, &str)> = config
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(headers, [("X-Bool", "true"), ("X-Num", "5"), ("X-Str", "a")]);
    }

    #[rstest]
    #[case(json!({"endpoint": "https://e.test"}), false)]
    #[case(json!({"endpoint": "https://e.test", "schema": ""}), false)]
    #[case(json!({"endpoint": "https://e.test", "schema": 7}), false)]
    #[case(json!({"endpoint": "https://e.test", "schema": "{\"m\":\"{{msg}}\"}"}), true)]
    fn schema_activates_only_when_non_empty(#[case] config: Value, #[case] active: bool) {
        let config = HTTPAdapterBuilder::from_value(&config)
            .build_config()
            .expect("valid config");
        assert_eq!(config.schema().is_some(), active);
    }

    #[rstest]
    fn zero_timeouts_are_rejected() {
        let err = HTTPAdapterBuilder::new()
            .with_endpoint("https://e.test")
            .with_connect_timeout_ms(0)
            .build_config()
            .expect_err("must fail");
        assert_eq!(invalid_message(err), "connect_timeout_ms must be greater than zero");
    }

    #[rstest]
    fn typed_setters_match_json_input() {
        let typed = HTTPAdapterBuilder::new()
            .with_endpoint("https://e.test/log")
            .with_method(HTTPMethod::GET)
            .with_header("X-Key", "k")
            .with_extra_field("timeout", json!(100))
            .with_schema("{{msg}}")
            .build_config()
            .expect("typed");
        let loose = HTTPAdapterBuilder::from_value(&json!({
            "endpoint": "https://e.test/log",
            "method": "GET",
            "headers": {"X-Key": "k"},
            "extraFields": {"timeout": 100},
            "schema": "{{msg}}",
        }))
        .build_config()
        .expect("loose");

        assert_eq!(typed.endpoint(), loose.endpoint());
        assert_eq!(typed.method(), loose.method());
        assert_eq!(typed.headers(), loose.headers());
        assert_eq!(typed.extra_fields(), loose.extra_fields());
        assert_eq!(typed.schema(), loose.schema());
    }
}
