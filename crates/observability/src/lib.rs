//! Tracing/logging setup shared by the binaries.

/// Initialize process-wide logging in the given format.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat) {
    tracing::init(format);
}

pub use self::tracing::LogFormat;

/// Tracing configuration (filters, layers).
pub mod tracing;
