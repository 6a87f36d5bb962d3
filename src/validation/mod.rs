//! # Validation Module
//!
//! Validation for the checkout form, in three layers:
//! 1. Pure rules: patterns, the subdomain derivation and its checks
//! 2. Field and form validators that annotate [`FormField`] presentation
//! 3. Server-side re-checks of a posted submission (`validator` derive)
//!
//! The submit-time and live-typing paths both derive subdomains through
//! [`derive_subdomain_with_limit`], so the two can never disagree.
//!
//! [`FormField`]: crate::domain::FormField

use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use validator::ValidationError;

pub mod field;
pub mod form;
pub mod result;
pub mod submission;

pub use field::{check_field, validate_field};
pub use form::FormValidator;
pub use result::{FieldError, ValidationResult};
pub use submission::{unique_subdomain, BillingPeriod, CheckoutSubmission, ResolvedCheckout};

lazy_static! {
    /// Email: something@something.tld, no whitespace, one `@`
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .expect("EMAIL_REGEX should be a valid regex pattern");

    /// Phone: optional leading `+`, then digits and common separators
    static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9][0-9 ().-]*[0-9]$")
        .expect("PHONE_REGEX should be a valid regex pattern");

    /// Subdomain: letters, digits and hyphens
    static ref SUBDOMAIN_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9-]+$")
        .expect("SUBDOMAIN_REGEX should be a valid regex pattern");
}

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const PHONE_MESSAGE: &str = "Please enter a valid phone number";
pub const SUBDOMAIN_MESSAGE: &str =
    "Subdomain can only contain letters, numbers, and hyphens (3-20 characters)";
pub const TERMS_MESSAGE: &str = "You must agree to the terms and conditions";

/// Default subdomain length bounds
pub const SUBDOMAIN_MIN_LENGTH: usize = 3;
pub const SUBDOMAIN_MAX_LENGTH: usize = 20;

/// Phone numbers need at least this many digits
const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

/// Derive a subdomain from a company name: ASCII letters and digits only,
/// lowercased, at most 20 characters.
pub fn derive_subdomain(company_name: &str) -> String {
    derive_subdomain_with_limit(company_name, SUBDOMAIN_MAX_LENGTH)
}

/// Same as [`derive_subdomain`] with a configurable cut-off
pub fn derive_subdomain_with_limit(company_name: &str, max_length: usize) -> String {
    company_name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .take(max_length)
        .collect()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    if !PHONE_REGEX.is_match(phone) {
        return false;
    }
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

/// Pattern and length check for a subdomain within the given bounds
pub fn is_valid_subdomain_within(subdomain: &str, min_length: usize, max_length: usize) -> bool {
    let length = subdomain.chars().count();
    SUBDOMAIN_REGEX.is_match(subdomain) && (min_length..=max_length).contains(&length)
}

pub fn is_valid_subdomain(subdomain: &str) -> bool {
    is_valid_subdomain_within(subdomain, SUBDOMAIN_MIN_LENGTH, SUBDOMAIN_MAX_LENGTH)
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_email").with_message(Cow::from(EMAIL_MESSAGE)))
    }
}

/// Validate an optional email; empty is accepted
pub fn validate_optional_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Ok(());
    }
    validate_email(email.trim())
}

/// Validate an optional phone number; empty is accepted
pub fn validate_optional_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.trim().is_empty() || is_valid_phone(phone.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_phone").with_message(Cow::from(PHONE_MESSAGE)))
    }
}

/// Validate the characters of an optional subdomain; empty is accepted.
///
/// Length bounds come from [`FormConfig`](crate::config::FormConfig) and are
/// checked by the caller.
pub fn validate_optional_subdomain(subdomain: &str) -> Result<(), ValidationError> {
    if subdomain.is_empty() || SUBDOMAIN_REGEX.is_match(subdomain) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_subdomain").with_message(Cow::from(SUBDOMAIN_MESSAGE)))
    }
}
