use crate::domains::logger::{DomainLogger, DynLogger};
use std::sync::Arc;

/// Forwards domain messages to `tracing`, so they end up wherever the
/// subscriber installed by the binary writes.
struct TracingBridge;

impl DomainLogger for TracingBridge {
    fn info(&self, msg: &str) {
        tracing::info!(target: "domain", "{}", msg);
    }

    fn warn(&self, msg: &str) {
        tracing::warn!(target: "domain", "{}", msg);
    }

    fn error(&self, msg: &str) {
        tracing::error!(target: "domain", "{}", msg);
    }
}

pub fn init_console_logger() -> DynLogger {
    Arc::new(TracingBridge)
}
