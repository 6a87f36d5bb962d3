//! Form field value type and its presentation state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Input type of a form field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Tel,
    Checkbox,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::Email => write!(f, "email"),
            FieldKind::Tel => write!(f, "tel"),
            FieldKind::Checkbox => write!(f, "checkbox"),
        }
    }
}

/// Outcome of checking one field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum Validity {
    #[default]
    Valid,
    Invalid(String),
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Validity::Valid => None,
            Validity::Invalid(message) => Some(message),
        }
    }
}

/// Border highlight applied to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    /// Green border marking a derived value (`#28a745`)
    Success,
}

impl Highlight {
    pub fn color(&self) -> &'static str {
        match self {
            Highlight::Success => "#28a745",
        }
    }
}

/// What the page shows around a field.
///
/// `feedback` holds at most one message, so repeated annotation can never
/// stack duplicate messages under a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldPresentation {
    /// Error marker (`is-invalid`)
    pub invalid: bool,
    /// Inline error message (`invalid-feedback`)
    pub feedback: Option<String>,
    /// Border highlight
    pub highlight: Option<Highlight>,
    /// "Auto-generated from company name" hint
    pub auto_generated_note: bool,
}

/// A named input of the checkout form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub id: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub value: String,
    /// Checked state; only meaningful for checkboxes
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub presentation: FieldPresentation,
}

impl FormField {
    pub fn new(id: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            kind,
            required: false,
            value: String::new(),
            checked: false,
            presentation: FieldPresentation::default(),
        }
    }

    pub fn text(id: impl Into<String>) -> Self {
        Self::new(id, FieldKind::Text)
    }

    pub fn email(id: impl Into<String>) -> Self {
        Self::new(id, FieldKind::Email)
    }

    pub fn tel(id: impl Into<String>) -> Self {
        Self::new(id, FieldKind::Tel)
    }

    pub fn checkbox(id: impl Into<String>) -> Self {
        Self::new(id, FieldKind::Checkbox)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn trimmed_value(&self) -> &str {
        self.value.trim()
    }

    /// Whether the field counts as empty for the required check
    pub fn is_blank(&self) -> bool {
        match self.kind {
            FieldKind::Checkbox => !self.checked,
            _ => self.trimmed_value().is_empty(),
        }
    }

    /// Current validity as shown on the page
    pub fn validity(&self) -> Validity {
        match (&self.presentation.invalid, &self.presentation.feedback) {
            (true, Some(message)) => Validity::Invalid(message.clone()),
            (true, None) => Validity::Invalid(String::new()),
            _ => Validity::Valid,
        }
    }

    /// Mark the field invalid, replacing any message already shown
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.clear_error();
        self.presentation.invalid = true;
        self.presentation.feedback = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.presentation.invalid = false;
        self.presentation.feedback = None;
    }

    /// Number of inline messages currently rendered for the field
    pub fn feedback_count(&self) -> usize {
        usize::from(self.presentation.feedback.is_some())
    }

    pub fn is_auto_generated(&self) -> bool {
        self.presentation.highlight == Some(Highlight::Success)
    }

    pub(crate) fn mark_auto_generated(&mut self) {
        self.presentation.highlight = Some(Highlight::Success);
        self.presentation.auto_generated_note = true;
    }

    pub(crate) fn clear_auto_generated(&mut self) {
        self.presentation.highlight = None;
        self.presentation.auto_generated_note = false;
    }
}
