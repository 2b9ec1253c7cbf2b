//! Per-record request descriptions handed to the transport.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::config::{AdapterConfig, HTTPMethod};

/// Everything the transport needs to deliver one record.
///
/// Built fresh for each record and moved into the send thread. `endpoint`,
/// `method`, and `headers` always come from validated configuration; extra
/// fields ride along in `extra` and can never replace them.
#[derive(Clone, Debug, PartialEq)]
pub struct OutboundRequest {
    pub method: HTTPMethod,
    pub endpoint: String,
    pub headers: BTreeMap<String, String>,
    pub extra: Map<String, Value>,
    pub body: Value,
}

impl OutboundRequest {
    /// Combine `config` with the final payload for one record.
    pub fn new(config: &AdapterConfig, body: Value) -> Self {
        Self {
            method: config.method,
            endpoint: config.endpoint.clone(),
            headers: config.headers.clone(),
            extra: config.extra_fields.clone(),
            body,
        }
    }

    /// Look up a caller-defined extra field.
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Flatten into a single JSON object.
    ///
    /// Extra fields are written first and the validated fields last, so an
    /// extra named `endpoint`, `method`, `headers`, or `body` is overwritten.
    pub fn describe(&self) -> Value {
        let mut merged = self.extra.clone();
        merged.insert("endpoint".into(), Value::String(self.endpoint.clone()));
        merged.insert("method".into(), Value::String(self.method.as_str().into()));
        merged.insert(
            "headers".into(),
            Value::Object(
                self.headers
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect(),
            ),
        );
        merged.insert("body".into(), self.body.clone());
        Value::Object(merged)
    }
}
