//! Single-field validation.

use tracing::debug;

use super::{is_valid_email, EMAIL_MESSAGE, REQUIRED_MESSAGE};
use crate::domain::{FieldKind, FormField, Validity};

/// Check a field against its own constraints without touching its
/// presentation.
///
/// Required and blank fails with "This field is required"; a non-empty
/// email field must match the email pattern. Everything else passes.
pub fn check_field(field: &FormField) -> Validity {
    if field.required && field.is_blank() {
        return Validity::Invalid(REQUIRED_MESSAGE.to_string());
    }

    let value = field.trimmed_value();
    if field.kind == FieldKind::Email && !value.is_empty() && !is_valid_email(value) {
        return Validity::Invalid(EMAIL_MESSAGE.to_string());
    }

    Validity::Valid
}

/// Check a field and annotate it: invalid fields get the error marker and
/// exactly one message, valid fields have any previous marker cleared.
pub fn validate_field(field: &mut FormField) -> Validity {
    let validity = check_field(field);
    match &validity {
        Validity::Invalid(message) => {
            debug!(field = %field.id, kind = %field.kind, message = %message, "Field failed validation");
            field.show_error(message.clone());
        }
        Validity::Valid => field.clear_error(),
    }
    validity
}
