use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::LogFormat;

/// Install the global tracing subscriber. `RUST_LOG` wins over `level`.
pub fn init_telemetry(level: &str, format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .context("Invalid log level configuration")?;

    let registry = Registry::default().with(env_filter);

    let installed = match format {
        LogFormat::Pretty => registry.with(fmt::layer().pretty().with_target(true)).try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true).flatten_event(true))
            .try_init(),
        LogFormat::Compact => registry.with(fmt::layer().compact().with_target(false)).try_init(),
    };
    installed.context("Failed to install tracing subscriber")?;

    tracing::info!(log_level = %level, log_format = ?format, "Telemetry initialized");
    Ok(())
}
