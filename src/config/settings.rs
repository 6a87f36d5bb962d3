//! # Configuration Settings
//!
//! Defines the configuration structure for the checkout form pipeline.

use crate::errors::{CheckoutError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use validator::Validate;

/// Environment variable prefix, e.g. `CHECKOUT_FORM__SUBDOMAIN_MIN_LENGTH=4`
pub const ENV_PREFIX: &str = "CHECKOUT";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Form field ids and rule limits
    #[validate(nested)]
    pub form: FormConfig,

    /// Logging configuration
    #[validate(nested)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from an optional TOML file, then `CHECKOUT_*`
    /// environment overrides, and validate the result.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(CheckoutError::config(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(CheckoutError::from)?;
        self.validate_custom()?;
        Ok(())
    }

    /// Cross-field checks the validator derive cannot express
    fn validate_custom(&self) -> Result<()> {
        let form = &self.form;

        if form.subdomain_min_length > form.subdomain_max_length {
            return Err(CheckoutError::validation(format!(
                "Subdomain min length ({}) cannot exceed max length ({})",
                form.subdomain_min_length, form.subdomain_max_length
            )));
        }

        let ids = [&form.company_field_id, &form.subdomain_field_id, &form.terms_field_id];
        for (i, id) in ids.iter().enumerate() {
            if ids[i + 1..].contains(id) {
                return Err(CheckoutError::validation_field(
                    format!("Field id '{}' is configured for more than one role", id),
                    id.as_str(),
                ));
            }
        }

        if form.instance_base_domain.starts_with('.') || form.instance_base_domain.ends_with('.') {
            return Err(CheckoutError::validation(
                "Instance base domain must not start or end with '.'",
            ));
        }

        Ok(())
    }
}

/// Checkout form configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FormConfig {
    /// Id of the company-name input
    #[validate(length(min = 1, message = "Company field id cannot be empty"))]
    pub company_field_id: String,

    /// Id of the preferred-subdomain input
    #[validate(length(min = 1, message = "Subdomain field id cannot be empty"))]
    pub subdomain_field_id: String,

    /// Id of the terms checkbox
    #[validate(length(min = 1, message = "Terms field id cannot be empty"))]
    pub terms_field_id: String,

    /// Minimum accepted subdomain length
    #[validate(range(min = 1, max = 63, message = "Subdomain min length must be between 1 and 63"))]
    pub subdomain_min_length: usize,

    /// Maximum accepted subdomain length, also the derivation cut-off
    #[validate(range(min = 1, max = 63, message = "Subdomain max length must be between 1 and 63"))]
    pub subdomain_max_length: usize,

    /// Seconds before a disabled submit button is re-enabled
    #[validate(range(min = 1, max = 300, message = "Submit reset must be between 1 and 300 seconds"))]
    pub submit_reset_seconds: u64,

    /// Label shown on the submit button while a submission is in flight
    #[validate(length(min = 1, message = "Processing label cannot be empty"))]
    pub processing_label: String,

    /// Domain appended to the subdomain to build the instance URL
    #[validate(length(min = 3, message = "Instance base domain is too short"))]
    pub instance_base_domain: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            company_field_id: "company_name".to_string(),
            subdomain_field_id: "preferred_subdomain".to_string(),
            terms_field_id: "terms_agreed".to_string(),
            subdomain_min_length: 3,
            subdomain_max_length: 20,
            submit_reset_seconds: 10,
            processing_label: "Processing...".to_string(),
            instance_base_domain: "saas.com".to_string(),
        }
    }
}

impl FormConfig {
    /// Get the submit button reset delay as Duration
    pub fn submit_reset(&self) -> Duration {
        Duration::from_secs(self.submit_reset_seconds)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Service name attached to log output
    #[validate(length(min = 1, message = "Service name cannot be empty"))]
    pub service_name: String,

    /// Log level (trace, debug, info, warn, error)
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Enable JSON structured logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "checkout-form".to_string(),
            log_level: "info".to_string(),
            json_logging: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validation() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_form_config_defaults() {
        let config = FormConfig::default();
        assert_eq!(config.company_field_id, "company_name");
        assert_eq!(config.subdomain_field_id, "preferred_subdomain");
        assert_eq!(config.terms_field_id, "terms_agreed");
        assert_eq!(config.subdomain_min_length, 3);
        assert_eq!(config.subdomain_max_length, 20);
        assert_eq!(config.submit_reset(), Duration::from_secs(10));
    }

    #[test]
    fn test_config_validation_errors() {
        let mut config = AppConfig::default();
        config.form.subdomain_min_length = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.observability.log_level = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_min_length_cannot_exceed_max_length() {
        let mut config = AppConfig::default();
        config.form.subdomain_min_length = 21;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cannot exceed max length"));
    }

    #[test]
    fn test_field_ids_must_be_distinct() {
        let mut config = AppConfig::default();
        config.form.terms_field_id = "company_name".to_string();
        let err = config.validate().unwrap_err();
        assert_eq!(err.field(), Some("company_name"));
    }

    #[test]
    fn test_base_domain_edges() {
        let mut config = AppConfig::default();
        config.form.instance_base_domain = ".saas.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let result = AppConfig::load(Some(Path::new("/definitely/not/here.toml")));
        assert!(matches!(result, Err(CheckoutError::Config { .. })));
    }
}
