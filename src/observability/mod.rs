//! OpenTelemetry-based observability with file-based trace export.
//!
//! Spans recorded with `tracing` are bridged into OpenTelemetry and written
//! as JSON lines to a rotating file for offline inspection:
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! # Configuration
//!
//! - `trace_level`: `EnvFilter` directive, default `"info"`
//! - `trace_file`: export path, default `<data dir>/cinelist-otlp.json`
//!
//! Files rotate at 10 MB and three backups are kept.
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `tracer`: Tracer provider with the file exporter
//! - `span_formatter`: Span to JSON conversion
//! - `file_writer`: Size-rotated line writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use file_writer::FileWriter;
pub use init::{init_tracing, trace_file_path, TRACE_FILE_NAME};
