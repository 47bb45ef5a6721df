//! Tracing/logging setup shared by binaries and black-box tests.

pub mod subscriber;

pub use subscriber::LogFormat;

/// Initialize process-wide tracing in the given format.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat) {
    subscriber::init(format);
}
