//! Whole-form validation run on submit.

use tracing::{debug, warn};

use super::field::validate_field;
use super::result::ValidationResult;
use super::{
    is_valid_email, is_valid_phone, is_valid_subdomain_within, EMAIL_MESSAGE, PHONE_MESSAGE,
    SUBDOMAIN_MESSAGE, TERMS_MESSAGE,
};
use crate::config::FormConfig;
use crate::domain::{CheckoutForm, FieldKind, Validity};
use crate::form_span;
use crate::services::AutoGenerationWatcher;

/// Validates a checkout form: every required field, the subdomain rules,
/// email and phone patterns, and the terms checkbox.
#[derive(Debug, Clone)]
pub struct FormValidator {
    watcher: AutoGenerationWatcher,
    subdomain_field_id: String,
    terms_field_id: String,
    subdomain_min_length: usize,
    subdomain_max_length: usize,
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::new(&FormConfig::default())
    }
}

impl FormValidator {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            watcher: AutoGenerationWatcher::new(config),
            subdomain_field_id: config.subdomain_field_id.clone(),
            terms_field_id: config.terms_field_id.clone(),
            subdomain_min_length: config.subdomain_min_length,
            subdomain_max_length: config.subdomain_max_length,
        }
    }

    pub fn watcher(&self) -> &AutoGenerationWatcher {
        &self.watcher
    }

    /// Run a full validation pass.
    ///
    /// Annotations from any earlier pass are cleared first, so the form ends
    /// up showing exactly the failures in the returned result. The result is
    /// valid only if every check passed.
    pub fn validate(&self, form: &mut CheckoutForm) -> ValidationResult {
        let span = form_span!("submit", fields = form.len());
        let _enter = span.enter();

        let mut result = ValidationResult::new();
        for field in form.fields_mut() {
            field.clear_error();
        }

        // Fill before the required pass so an auto-filled subdomain counts
        if self.watcher.fill_if_empty(form) {
            debug!(field = %self.subdomain_field_id, "Subdomain filled from company name at submit");
        }

        for field in form.fields_mut().filter(|f| f.required) {
            if let Validity::Invalid(message) = validate_field(field) {
                result.reject(field.id.clone(), message);
            }
        }

        if let Some(subdomain) = form.field_mut(&self.subdomain_field_id) {
            if !subdomain.value.is_empty()
                && !is_valid_subdomain_within(
                    &subdomain.value,
                    self.subdomain_min_length,
                    self.subdomain_max_length,
                )
            {
                subdomain.show_error(SUBDOMAIN_MESSAGE);
                result.reject(subdomain.id.clone(), SUBDOMAIN_MESSAGE);
            }
        }

        for field in form.fields_mut() {
            let value = field.trimmed_value();
            let message = match field.kind {
                FieldKind::Email if !value.is_empty() && !is_valid_email(value) => EMAIL_MESSAGE,
                FieldKind::Tel if !value.is_empty() && !is_valid_phone(value) => PHONE_MESSAGE,
                _ => continue,
            };
            field.show_error(message);
            result.reject(field.id.clone(), message);
        }

        if let Some(terms) = form.field_mut(&self.terms_field_id) {
            if !terms.checked {
                terms.show_error(TERMS_MESSAGE);
                result.reject(terms.id.clone(), TERMS_MESSAGE);
            }
        }

        if result.is_valid() {
            debug!("Form passed validation");
        } else {
            warn!(
                failed_fields = ?result.failed_fields(),
                "Form failed validation, submission blocked"
            );
        }
        result
    }
}
