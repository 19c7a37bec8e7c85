//! Tracing/logging setup shared by binaries.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use crate::tracing::LogFormat;

/// Initialize process-wide logging as JSON lines on stderr.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    init_with(LogFormat::Json);
}

/// Initialize process-wide logging on stderr in the given format.
pub fn init_with(format: LogFormat) {
    tracing::init(format);
}
