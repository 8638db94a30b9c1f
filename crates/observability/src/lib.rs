//! Tracing/logging setup shared by the service binaries.

/// Initialize process-wide tracing (JSON logs, `RUST_LOG` filter).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;
