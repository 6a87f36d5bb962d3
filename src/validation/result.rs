//! Outcome of one validation pass over a form.

use serde::Serialize;

/// One failing field and the message rendered next to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Aggregated result of a validation pass.
///
/// Holds at most one error per field; a later failure for the same field
/// replaces the earlier one, the same way the page replaces the message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    valid: bool,
    errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Record a failure for `field`
    pub fn reject(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        self.valid = false;

        match self.errors.iter_mut().find(|e| e.field == field) {
            Some(existing) => existing.message = message,
            None => self.errors.push(FieldError { field, message }),
        }
    }

    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors.iter().find(|e| e.field == field).map(|e| e.message.as_str())
    }

    pub fn failed_fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }
}
