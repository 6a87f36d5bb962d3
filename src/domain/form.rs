//! The checkout form: an explicitly constructed set of fields.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::field::{FieldKind, FormField};
use crate::errors::{CheckoutError, Result};

/// Serialized shape of a form, as read from a JSON snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub fields: Vec<FormField>,
}

/// A checkout form and its fields, in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutForm {
    fields: Vec<FormField>,
}

impl CheckoutForm {
    /// Build a form from its fields. Field ids must be unique and non-empty.
    pub fn from_fields(fields: Vec<FormField>) -> Result<Self> {
        for (i, field) in fields.iter().enumerate() {
            if field.id.trim().is_empty() {
                return Err(CheckoutError::validation(format!(
                    "Field at position {} has an empty id",
                    i
                )));
            }
            if fields[..i].iter().any(|other| other.id == field.id) {
                return Err(CheckoutError::validation_field(
                    format!("Duplicate field id '{}'", field.id),
                    field.id.as_str(),
                ));
            }
        }
        Ok(Self { fields })
    }

    pub fn from_snapshot(snapshot: FormSnapshot) -> Result<Self> {
        Self::from_fields(snapshot.fields)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: FormSnapshot = serde_json::from_str(json)
            .map_err(|e| CheckoutError::from(e).with_context("Parsing form snapshot"))?;
        Self::from_snapshot(snapshot)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CheckoutError::from(e).with_context(format!("Reading {}", path.display())))?;
        Self::from_json(&json)
    }

    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> impl Iterator<Item = &mut FormField> {
        self.fields.iter_mut()
    }

    /// Ids of all fields of the given kind, in document order
    pub fn ids_of_kind(&self, kind: FieldKind) -> Vec<String> {
        self.fields.iter().filter(|f| f.kind == kind).map(|f| f.id.clone()).collect()
    }

    /// Ids of all required fields, in document order
    pub fn required_ids(&self) -> Vec<String> {
        self.fields.iter().filter(|f| f.required).map(|f| f.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Name/value pairs the browser would post; unchecked boxes are omitted
    pub fn payload(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .filter_map(|f| match f.kind {
                FieldKind::Checkbox if !f.checked => None,
                FieldKind::Checkbox => Some((f.id.clone(), "on".to_string())),
                _ => Some((f.id.clone(), f.value.clone())),
            })
            .collect()
    }
}
