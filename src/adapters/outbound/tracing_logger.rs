use crate::domains::logger::DomainLogger;
use std::sync::Arc;

/// Forwards domain log lines as `tracing` events under the `weather_clusters::pipeline` target.
struct TracingBridge;

impl DomainLogger for TracingBridge {
    fn info(&self, msg: &str) {
        tracing::info!(target: "weather_clusters::pipeline", "{}", msg);
    }

    fn warn(&self, msg: &str) {
        tracing::warn!(target: "weather_clusters::pipeline", "{}", msg);
    }

    fn error(&self, msg: &str) {
        tracing::error!(target: "weather_clusters::pipeline", "{}", msg);
    }

    fn debug(&self, msg: &str) {
        tracing::debug!(target: "weather_clusters::pipeline", "{}", msg);
    }
}

pub fn init_tracing_logger() -> Arc<dyn DomainLogger> {
    Arc::new(TracingBridge)
}
