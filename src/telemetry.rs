use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::ObservabilityConfig;

/// Initialize structured logging.
/// RUST_LOG wins over the configured level when set.
pub fn init_telemetry(settings: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))?;

    let registry = tracing_subscriber::registry().with(filter);
    if settings.json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }

    tracing::info!("CoolieConnect telemetry initialized");
    Ok(())
}

/// Generate a correlation ID linking every call a page makes
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Create a span carrying the flow name and its correlation id
pub fn create_flow_span(flow: &'static str, correlation_id: &str) -> tracing::Span {
    tracing::info_span!("flow", flow = flow, correlation.id = correlation_id)
}

/// Shutdown telemetry gracefully
pub fn shutdown_telemetry() {
    tracing::info!("CoolieConnect telemetry shutdown complete");
}
