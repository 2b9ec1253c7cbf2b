//! Test doubles standing in for the HTTP transport and the diagnostic sink.
//!
//! Both forward what they see over `mpsc` channels so tests can wait for the
//! adapter's detached send threads with `recv_timeout`.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, mpsc};
use std::time::Duration;

use femtologging_http::{
    DiagnosticSink, DispatchError, HttpResponse, HttpTransport, OutboundRequest, TransportError,
};

/// Upper bound on waiting for a send thread.
pub const WAIT: Duration = Duration::from_secs(5);
/// How long to wait before concluding nothing else will arrive.
pub const QUIET: Duration = Duration::from_millis(200);

/// Transport that records each request and answers with a fixed outcome.
pub struct RecordingTransport {
    outcome: Result<HttpResponse, TransportError>,
    tx: mpsc::Sender<OutboundRequest>,
    gate: Option<Mutex<mpsc::Receiver<()>>>,
}

impl RecordingTransport {
    /// Answer every request with `status`.
    pub fn with_status(
        status: u16,
        status_text: &str,
    ) -> (Arc<Self>, mpsc::Receiver<OutboundRequest>) {
        Self::with_outcome(Ok(HttpResponse::new(status, status_text)))
    }

    /// Fail every request with a transport error.
    pub fn failing(message: &str) -> (Arc<Self>, mpsc::Receiver<OutboundRequest>) {
        Self::with_outcome(Err(TransportError::new(message)))
    }

    fn with_outcome(
        outcome: Result<HttpResponse, TransportError>,
    ) -> (Arc<Self>, mpsc::Receiver<OutboundRequest>) {
        let (tx, rx) = mpsc::channel();
        let transport = Self {
            outcome,
            tx,
            gate: None,
        };
        (Arc::new(transport), rx)
    }

    /// Answer `200 OK`, but only after the returned sender releases each request.
    pub fn gated() -> (
        Arc<Self>,
        mpsc::Receiver<OutboundRequest>,
        mpsc::Sender<()>,
    ) {
        let (tx, rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let transport = Self {
            outcome: Ok(HttpResponse::new(200, "OK")),
            tx,
            gate: Some(Mutex::new(release_rx)),
        };
        (Arc::new(transport), rx, release_tx)
    }
}

impl HttpTransport for RecordingTransport {
    fn send(&self, request: &OutboundRequest) -> Result<HttpResponse, TransportError> {
        if let Some(gate) = &self.gate {
            let _ = gate.lock().expect("gate mutex poisoned").recv_timeout(WAIT);
        }
        let _ = self.tx.send(request.clone());
        self.outcome.clone()
    }
}

/// A report captured by [`recording_sink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub kind: &'static str,
    pub message: String,
}

/// Sink forwarding every report over a channel.
pub fn recording_sink() -> (Arc<dyn DiagnosticSink>, mpsc::Receiver<Report>) {
    let (tx, rx) = mpsc::channel();
    let sink = move |err: &DispatchError| {
        let _ = tx.send(Report {
            kind: err.kind(),
            message: err.to_string(),
        });
    };
    (Arc::new(sink), rx)
}

/// Collect everything that arrives on `rx` until it stays quiet for [`QUIET`].
pub fn drain<T>(rx: &mpsc::Receiver<T>) -> Vec<T> {
    let mut items = Vec::new();
    while let Ok(item) = rx.recv_timeout(QUIET) {
        items.push(item);
    }
    items
}
