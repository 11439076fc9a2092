//! Logging setup
//!
//! The portal logs through `tracing`. The binary installs a `tracing-subscriber`
//! fmt subscriber once at startup; library code only emits events.

use crate::config::LoggingConfig;
use crate::utils::error::{PortalError, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the filter for the given configuration.
///
/// `RUST_LOG` takes precedence over the configured level so operators can turn
/// on per-module debugging without editing the config file.
pub fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    let level = config.level.to_lowercase();
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bi_portal={level},portal={level}")))
}

/// Install the global subscriber
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = build_env_filter(config);
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false),
            )
            .try_init()
    };

    result.map_err(|e| PortalError::internal(format!("Failed to initialize logging: {}", e)))
}
