//! Diagnostic sinks receiving per-record failures.
//!
//! The adapter never surfaces a per-record failure to the producer. Instead it
//! reports it to a [`DiagnosticSink`], a write-only channel supplied by the
//! integrator. [`StderrSink`] is used when none is configured.

use std::io::{self, Write};

use log::{error, warn};

use crate::http_adapter::DispatchError;

/// Write-only channel for non-fatal adapter failures.
///
/// Sinks are shared between the caller's thread and send threads, so they
/// must be `Send + Sync`. Any `Fn(&DispatchError)` closure is a sink.
pub trait DiagnosticSink: Send + Sync {
    /// Report a failure. Must not panic.
    fn report(&self, error: &DispatchError);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&DispatchError) + Send + Sync,
{
    fn report(&self, error: &DispatchError) {
        self(error)
    }
}

/// Writes one line per failure to the process standard error stream.
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn report(&self, error: &DispatchError) {
        let mut stderr = io::stderr().lock();
        // Nowhere left to report a failed write to stderr.
        let _ = writeln!(stderr, "femtologging_http: {error}");
    }
}

/// Forwards failures to the `log` facade.
///
/// Delivery failures are logged at `warn`, preparation failures at `error`.
/// Avoid installing this sink when the adapter itself backs the `log`
/// facade, as each report would feed another record into the adapter.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, err: &DispatchError) {
        if err.is_delivery_failure() {
            warn!("FemtoHTTPAdapter {}: {err}", err.kind());
        } else {
            error!("FemtoHTTPAdapter {}: {err}", err.kind());
        }
    }
}

/// Emits failures as `tracing` events with the failure kind as a field.
#[cfg(feature = "tracing-compat")]
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

#[cfg(feature = "tracing-compat")]
impl DiagnosticSink for TracingSink {
    fn report(&self, err: &DispatchError) {
        if err.is_delivery_failure() {
            tracing::warn!(kind = err.kind(), error = %err, "log record delivery failed");
        } else {
            tracing::error!(kind = err.kind(), error = %err, "log record dropped");
        }
    }
}
