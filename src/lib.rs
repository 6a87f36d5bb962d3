//! # Checkout Form
//!
//! Validation and submission pipeline for the checkout form of a SaaS signup
//! flow. Forms are plain data: a [`CheckoutForm`] is built from its fields,
//! events are fed to a [`FormController`], and each field carries the
//! presentation state (error marker, message, auto-generated hint) that a
//! page would render.
//!
//! ## Architecture
//!
//! ```text
//! FormEvent → FormController → FormValidator → ValidationResult
//!                  ↓                 ↓
//!           SubmitButton    AutoGenerationWatcher → derive_subdomain
//! ```
//!
//! The server side re-checks a posted [`CheckoutSubmission`] with the same
//! rules and resolves a unique subdomain.
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_form::{CheckoutForm, FormConfig, FormController, FormField};
//! use std::time::Instant;
//!
//! let form = CheckoutForm::from_fields(vec![
//!     FormField::text("company_name").required(),
//!     FormField::email("contact_email").required(),
//!     FormField::text("preferred_subdomain"),
//!     FormField::checkbox("terms_agreed"),
//! ])?;
//! let mut controller = FormController::new(form, &FormConfig::default());
//!
//! controller.input("company_name", "Acme Corp!")?;
//! controller.input("contact_email", "jane@acme.com")?;
//! controller.toggle("terms_agreed", true)?;
//!
//! assert!(controller.submit(Instant::now()).is_proceed());
//! assert_eq!(controller.form().field("preferred_subdomain").unwrap().value, "acmecorp");
//! # Ok::<(), checkout_form::CheckoutError>(())
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod observability;
pub mod services;
pub mod validation;

// Re-export commonly used types and traits
pub use config::{AppConfig, FormConfig};
pub use domain::{CheckoutForm, FieldKind, FormField, Validity};
pub use errors::{CheckoutError, Error, Result};
pub use services::{FormController, FormEvent, SubdomainState, SubmitOutcome};
pub use validation::{derive_subdomain, CheckoutSubmission, FormValidator, ValidationResult};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
