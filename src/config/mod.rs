//! # Configuration Management
//!
//! Settings for the checkout form pipeline. Values come from defaults, an
//! optional TOML file and `CHECKOUT_*` environment variables, in that order.

pub mod settings;

pub use settings::{AppConfig, FormConfig, ObservabilityConfig, ENV_PREFIX};
