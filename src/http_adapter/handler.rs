//! Public adapter type exported by the crate.

use std::{fmt, sync::Arc, thread};

use log::debug;
use serde_json::Value;

use crate::{diagnostics::DiagnosticSink, handler::FemtoHandler, log_record::FemtoLogRecord};

use super::{
    config::{AdapterConfig, HTTPMethod},
    entry::LogEntry,
    error::DispatchError,
    request::OutboundRequest,
    transport::HttpTransport,
};

/// Name given to the threads that perform sends.
const SEND_THREAD_NAME: &str = "femto-http-send";

/// Adapter forwarding each log record to an HTTP endpoint.
///
/// [`accept`](Self::accept) parses the record, applies the optional schema,
/// and hands the request to a detached send thread before returning. Every
/// failure after construction goes to the [`DiagnosticSink`]; nothing is
/// retried, queued, or raised to the caller.
///
/// Build instances with [`HTTPAdapterBuilder`](crate::handlers::HTTPAdapterBuilder).
pub struct FemtoHTTPAdapter {
    config: Arc<AdapterConfig>,
    transport: Arc<dyn HttpTransport>,
    sink: Arc<dyn DiagnosticSink>,
}

impl FemtoHTTPAdapter {
    pub(crate) fn new(
        config: AdapterConfig,
        transport: Arc<dyn HttpTransport>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            sink,
        }
    }

    /// Validated configuration held for the adapter's lifetime.
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// HTTP method used for every request.
    pub fn method(&self) -> HTTPMethod {
        self.config.method()
    }

    /// Forward one record without waiting for delivery.
    pub fn accept(&self, entry: impl Into<LogEntry>) {
        match self.prepare(entry) {
            Ok(request) => self.dispatch(request),
            Err(err) => self.sink.report(&err),
        }
    }

    /// Build the request for `entry` without sending it.
    ///
    /// # Errors
    ///
    /// * [`DispatchError::RecordParse`] - raw text is not valid JSON
    /// * [`DispatchError::TemplateParse`] - the rendered schema is not valid JSON
    pub fn prepare(&self, entry: impl Into<LogEntry>) -> Result<OutboundRequest, DispatchError> {
        let document = entry.into().into_document()?;
        let body = self.shape(document)?;
        Ok(OutboundRequest::new(&self.config, body))
    }

    fn shape(&self, document: Value) -> Result<Value, DispatchError> {
        let Some(schema) = self.config.schema() else {
            return Ok(document);
        };
        let rendered = schema.render(&document);
        serde_json::from_str(&rendered)
            .map_err(|source| DispatchError::TemplateParse { source, rendered })
    }

    fn dispatch(&self, request: OutboundRequest) {
        let transport = Arc::clone(&self.transport);
        let sink = Arc::clone(&self.sink);
        let spawned = thread::Builder::new()
            .name(SEND_THREAD_NAME.into())
            .spawn(move || send_and_report(transport.as_ref(), sink.as_ref(), &request));
        // The join handle is dropped: sends run detached.
        if let Err(err) = spawned {
            self.sink.report(&DispatchError::Spawn(err));
        }
    }
}

fn send_and_report(
    transport: &dyn HttpTransport,
    sink: &dyn DiagnosticSink,
    request: &OutboundRequest,
) {
    match transport.send(request) {
        Ok(response) if response.is_success() => {
            debug!(
                "FemtoHTTPAdapter delivered record to {} ({})",
                request.endpoint, response.status
            );
        }
        Ok(response) => sink.report(&DispatchError::Status {
            status: response.status,
            status_text: response.status_text,
        }),
        Err(err) => sink.report(&DispatchError::Transport(err)),
    }
}

impl FemtoHandler for FemtoHTTPAdapter {
    fn handle(&self, record: FemtoLogRecord) {
        self.accept(&record);
    }
}

impl fmt::Debug for FemtoHTTPAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FemtoHTTPAdapter")
            .field("endpoint", &self.config.endpoint())
            .field("method", &self.config.method())
            .field("schema", &self.config.schema().map(|s| s.source()))
            .finish_non_exhaustive()
    }
}
