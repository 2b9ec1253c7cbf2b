use crate::log_record::FemtoLogRecord;

/// Trait implemented by all log handlers.
///
/// Handlers are shared between producer threads, so they must be
/// `Send + Sync`. Implementations must not block the caller on I/O or
/// surface delivery failures through `handle`.
pub trait FemtoHandler: Send + Sync {
    /// Dispatch a log record for handling.
    fn handle(&self, record: FemtoLogRecord);
}
