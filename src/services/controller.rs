//! Event handling for one checkout form.
//!
//! Replaces per-element listeners with a single value that owns the form and
//! receives its events: blur and input on fields, checkbox toggles and
//! submit.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

use super::submit_guard::SubmitButton;
use crate::config::FormConfig;
use crate::domain::{CheckoutForm, FieldKind, FormField, Validity};
use crate::errors::{CheckoutError, Result};
use crate::validation::{validate_field, FormValidator, ValidationResult};

/// Label of the submit button when idle
pub const DEFAULT_SUBMIT_LABEL: &str = "Submit";

/// A browser event targeting the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FormEvent {
    Blur { field: String },
    Input { field: String, value: String },
    Toggle { field: String, checked: bool },
    Submit,
}

/// What happened to a submit attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Validation passed; the browser posts these name/value pairs
    Proceed { payload: Vec<(String, String)> },
    /// Validation failed; nothing is sent
    Cancelled { result: ValidationResult },
    /// A submission is already in flight
    Ignored,
}

impl SubmitOutcome {
    pub fn is_proceed(&self) -> bool {
        matches!(self, SubmitOutcome::Proceed { .. })
    }
}

#[derive(Debug, Clone)]
pub struct FormController {
    form: CheckoutForm,
    validator: FormValidator,
    button: SubmitButton,
}

impl FormController {
    pub fn new(form: CheckoutForm, config: &FormConfig) -> Self {
        Self::with_submit_label(form, config, DEFAULT_SUBMIT_LABEL)
    }

    pub fn with_submit_label(form: CheckoutForm, config: &FormConfig, label: &str) -> Self {
        Self {
            form,
            validator: FormValidator::new(config),
            button: SubmitButton::new(label, config),
        }
    }

    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    pub fn button(&self) -> &SubmitButton {
        &self.button
    }

    pub fn into_form(self) -> CheckoutForm {
        self.form
    }

    fn field_mut(&mut self, id: &str) -> Result<&mut FormField> {
        self.form
            .field_mut(id)
            .ok_or_else(|| CheckoutError::validation_field(format!("Unknown field '{}'", id), id))
    }

    /// Field lost focus: required fields are validated on the spot
    pub fn blur(&mut self, id: &str) -> Result<Validity> {
        let field = self.field_mut(id)?;
        if !field.required {
            return Ok(field.validity());
        }
        Ok(validate_field(field))
    }

    /// User typed into a field
    pub fn input(&mut self, id: &str, value: &str) -> Result<()> {
        let field = self.field_mut(id)?;
        if field.kind == FieldKind::Checkbox {
            return Err(CheckoutError::validation_field(
                format!("Field '{}' is a checkbox; toggle it instead", id),
                id,
            ));
        }
        if field.required {
            field.clear_error();
        }

        let watcher = self.validator.watcher();
        if id == watcher.subdomain_field_id() {
            watcher.subdomain_edited(&mut self.form, value);
            return Ok(());
        }

        if let Some(field) = self.form.field_mut(id) {
            field.value = value.to_string();
        }
        if id == watcher.company_field_id() {
            watcher.company_name_changed(&mut self.form);
        }
        Ok(())
    }

    /// User (un)checked a checkbox
    pub fn toggle(&mut self, id: &str, checked: bool) -> Result<()> {
        let field = self.field_mut(id)?;
        if field.kind != FieldKind::Checkbox {
            return Err(CheckoutError::validation_field(
                format!("Field '{}' is not a checkbox", id),
                id,
            ));
        }
        field.checked = checked;
        if checked {
            field.clear_error();
        }
        Ok(())
    }

    /// Submit attempt at `now`
    pub fn submit(&mut self, now: Instant) -> SubmitOutcome {
        self.button.tick(now);
        if self.button.is_disabled() {
            debug!("Submit ignored, submission already in flight");
            return SubmitOutcome::Ignored;
        }

        let result = self.validator.validate(&mut self.form);
        if !result.is_valid() {
            return SubmitOutcome::Cancelled { result };
        }

        self.button.begin(now);
        info!(fields = self.form.len(), "Checkout form submitted");
        SubmitOutcome::Proceed {
            payload: self.form.payload(),
        }
    }

    /// Let the submit button's reset delay run out
    pub fn tick(&mut self, now: Instant) -> bool {
        self.button.tick(now)
    }

    /// Apply one event; only submits produce an outcome
    pub fn dispatch(&mut self, event: &FormEvent, now: Instant) -> Result<Option<SubmitOutcome>> {
        match event {
            FormEvent::Blur { field } => {
                self.blur(field)?;
            }
            FormEvent::Input { field, value } => self.input(field, value)?,
            FormEvent::Toggle { field, checked } => self.toggle(field, *checked)?,
            FormEvent::Submit => return Ok(Some(self.submit(now))),
        }
        Ok(None)
    }
}
