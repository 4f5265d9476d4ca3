//! Tracing/logging setup shared by binaries.

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use self::tracing::LogSettings;

/// Initialize process-wide diagnostic logging.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(settings: &LogSettings) {
    tracing::init(settings);
}
