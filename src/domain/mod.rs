//! Domain types for the checkout form: fields, their presentation state and
//! the form that owns them.

pub mod field;
pub mod form;

pub use field::{FieldKind, FieldPresentation, FormField, Highlight, Validity};
pub use form::{CheckoutForm, FormSnapshot};
