//! Log record representation handed over by host logging pipelines.
//!
//! `FemtoLogRecord` captures a log event along with its contextual metadata
//! such as timestamp, source location, and thread information, and converts
//! into the JSON document the HTTP adapter sends.

use std::collections::BTreeMap;
use std::fmt;
use std::thread::{self, ThreadId};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{Map, Value};

use crate::level::FemtoLevel;

/// Additional context associated with a log record.
#[derive(Clone, Debug)]
pub struct RecordMetadata {
    /// Rust module path where the log call originated.
    pub module_path: String,
    /// Source file name for the log call.
    pub filename: String,
    /// Line number in the source file.
    pub line_number: u32,
    /// Time the record was created.
    pub timestamp: SystemTime,
    /// ID of the thread that created the record.
    pub thread_id: ThreadId,
    /// Name of the thread that created the record (if any).
    pub thread_name: Option<String>,
    /// Structured key-value pairs attached to the record.
    pub key_values: BTreeMap<String, String>,
}

impl RecordMetadata {
    /// Capture timestamp and thread info from the current execution context.
    fn capture_runtime() -> (SystemTime, ThreadId, Option<String>) {
        let current = thread::current();
        (
            SystemTime::now(),
            current.id(),
            current.name().map(ToString::to_string),
        )
    }
}

impl Default for RecordMetadata {
    fn default() -> Self {
        let (timestamp, thread_id, thread_name) = Self::capture_runtime();
        Self {
            module_path: String::new(),
            filename: String::new(),
            line_number: 0,
            timestamp,
            thread_id,
            thread_name,
            key_values: BTreeMap::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FemtoLogRecord {
    /// Name of the logger that created this record.
    pub logger: String,
    /// Severity of the record.
    pub level: FemtoLevel,
    /// The log message content.
    pub message: String,
    /// Contextual metadata for the record.
    pub metadata: RecordMetadata,
}

impl FemtoLogRecord {
    /// Construct a new log record from logger `name`, `level`, and `message`.
    pub fn new(logger: &str, level: FemtoLevel, message: &str) -> Self {
        Self {
            logger: logger.to_owned(),
            level,
            message: message.to_owned(),
            metadata: RecordMetadata::default(),
        }
    }

    /// Construct a log record with explicit source location and key-values.
    pub fn with_metadata(
        logger: &str,
        level: FemtoLevel,
        message: &str,
        mut metadata: RecordMetadata,
    ) -> Self {
        let (timestamp, thread_id, thread_name) = RecordMetadata::capture_runtime();
        metadata.timestamp = timestamp;
        metadata.thread_id = thread_id;
        metadata.thread_name = thread_name;
        Self {
            logger: logger.to_owned(),
            level,
            message: message.to_owned(),
            metadata,
        }
    }

    /// Build the JSON document sent for this record.
    ///
    /// Field names follow the `logging.LogRecord` attribute names collectors
    /// already understand (`name`, `levelname`, `msg`, `created`, ...).
    /// Key-values are merged at the top level but never replace those fields.
    pub fn to_document(&self) -> Value {
        let metadata = &self.metadata;
        let created = metadata
            .timestamp
            .duration_since(UNIX_EPOCH)
            .map(|dur| dur.as_secs_f64())
            .unwrap_or_default();

        let mut doc = Map::new();
        for (k, v) in &metadata.key_values {
            doc.insert(k.clone(), Value::String(v.clone()));
        }
        doc.insert("name".into(), self.logger.clone().into());
        doc.insert("levelname".into(), self.level.as_str().into());
        doc.insert("msg".into(), self.message.clone().into());
        doc.insert("created".into(), created.into());
        doc.insert("filename".into(), metadata.filename.clone().into());
        doc.insert("lineno".into(), metadata.line_number.into());
        doc.insert("module".into(), metadata.module_path.clone().into());
        doc.insert("thread".into(), format!("{:?}", metadata.thread_id).into());
        if let Some(name) = &metadata.thread_name {
            doc.insert("threadName".into(), name.clone().into());
        }
        Value::Object(doc)
    }
}

impl fmt::Display for FemtoLogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.logger, self.level, self.message)
    }
}
