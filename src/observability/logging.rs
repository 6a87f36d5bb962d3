//! # Structured Logging
//!
//! Subscriber setup and span helpers built on the tracing ecosystem.
//!
//! `RUST_LOG` wins over the configured level when it is set, so a single run
//! can be made more verbose without touching the configuration file.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{AppConfig, ObservabilityConfig};
use crate::errors::{CheckoutError, Result};

/// Create a tracing span for one validation pass over a form.
///
/// ```rust,ignore
/// let span = form_span!("submit", fields = form.len());
/// ```
#[macro_export]
macro_rules! form_span {
    ($phase:expr) => {
        tracing::debug_span!("checkout_form", phase = %$phase)
    };
    ($phase:expr, $($field:tt)*) => {
        tracing::debug_span!("checkout_form", phase = %$phase, $($field)*)
    };
}

/// Build the env filter, preferring `RUST_LOG` over the configured level
fn build_filter(config: &ObservabilityConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|e| {
            CheckoutError::config_with_source(
                format!("Invalid log level '{}'", config.log_level),
                Box::new(e),
            )
        }),
    }
}

/// Install the global tracing subscriber, writing to stderr so command
/// output on stdout stays machine-readable.
///
/// Installing twice is not an error: the second call leaves the first
/// subscriber in place (integration tests share one process).
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    let filter = build_filter(config)?;

    let installed = if config.json_logging {
        tracing::subscriber::set_global_default(
            fmt()
                .json()
                .with_current_span(true)
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish(),
        )
    } else {
        tracing::subscriber::set_global_default(
            fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .finish(),
        )
    };

    if let Err(e) = installed {
        tracing::debug!(error = %e, "Tracing subscriber already installed, keeping it");
    }
    Ok(())
}

/// Log configuration at startup
pub fn log_config_info(config: &AppConfig) {
    tracing::info!(
        service_name = %config.observability.service_name,
        company_field = %config.form.company_field_id,
        subdomain_field = %config.form.subdomain_field_id,
        terms_field = %config.form.terms_field_id,
        subdomain_min_length = config.form.subdomain_min_length,
        subdomain_max_length = config.form.subdomain_max_length,
        json_logging = config.observability.json_logging,
        "Checkout form configuration"
    );
}
