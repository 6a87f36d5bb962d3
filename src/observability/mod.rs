//! # Observability Infrastructure
//!
//! Structured logging for the checkout form pipeline.

pub mod logging;

pub use logging::{init_logging, log_config_info};

use crate::config::AppConfig;
use crate::errors::Result;
use tracing::info;

/// Initialize logging and report the effective configuration
pub fn init_observability(config: &AppConfig) -> Result<()> {
    init_logging(&config.observability)?;

    info!(
        service_name = %config.observability.service_name,
        log_level = %config.observability.log_level,
        json_logging = config.observability.json_logging,
        "Observability initialized successfully"
    );
    log_config_info(config);

    Ok(())
}
