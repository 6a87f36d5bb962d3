//! Subdomain auto-generation from the company name.
//!
//! The subdomain field moves through three states, read straight off the
//! field so there is nothing to keep in sync:
//!
//! ```text
//! Empty --company input--> AutoFilled --user input--> UserEdited
//!   ^                          |                          |
//!   +--company derives ""------+                          |
//!   +--user clears the field------------------------------+
//! ```
//!
//! Both the live watcher and the submit-time fill go through
//! [`AutoGenerationWatcher::fill_derived`].

use serde::Serialize;
use tracing::debug;

use crate::config::FormConfig;
use crate::domain::{CheckoutForm, FormField};
use crate::validation::derive_subdomain_with_limit;

/// Where the subdomain field's value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubdomainState {
    Empty,
    AutoFilled,
    UserEdited,
}

impl SubdomainState {
    pub fn of(field: &FormField) -> Self {
        if field.value.is_empty() {
            SubdomainState::Empty
        } else if field.is_auto_generated() {
            SubdomainState::AutoFilled
        } else {
            SubdomainState::UserEdited
        }
    }

    /// Whether a company-name change may overwrite the subdomain
    pub fn accepts_derived(&self) -> bool {
        !matches!(self, SubdomainState::UserEdited)
    }
}

/// Mirrors the company name into the subdomain field while the user has not
/// typed a subdomain of their own
#[derive(Debug, Clone)]
pub struct AutoGenerationWatcher {
    company_field_id: String,
    subdomain_field_id: String,
    max_length: usize,
}

impl AutoGenerationWatcher {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            company_field_id: config.company_field_id.clone(),
            subdomain_field_id: config.subdomain_field_id.clone(),
            max_length: config.subdomain_max_length,
        }
    }

    pub fn company_field_id(&self) -> &str {
        &self.company_field_id
    }

    pub fn subdomain_field_id(&self) -> &str {
        &self.subdomain_field_id
    }

    /// Current state of the subdomain field, `None` if the form has none
    pub fn state(&self, form: &CheckoutForm) -> Option<SubdomainState> {
        form.field(&self.subdomain_field_id).map(SubdomainState::of)
    }

    /// Live path: the company name changed.
    ///
    /// An empty or still auto-filled subdomain is recomputed. When the new
    /// derivation is empty an auto-filled value is withdrawn.
    pub fn company_name_changed(&self, form: &mut CheckoutForm) -> Option<SubdomainState> {
        let state = self.state(form)?;
        if !state.accepts_derived() {
            return Some(state);
        }

        if !self.fill_derived(form) && state == SubdomainState::AutoFilled {
            if let Some(subdomain) = form.field_mut(&self.subdomain_field_id) {
                subdomain.value.clear();
                subdomain.clear_auto_generated();
            }
        }
        self.state(form)
    }

    /// Live path: the user typed into the subdomain field.
    ///
    /// Any auto-generated marker and hint go away; clearing the field hands
    /// it back to auto-generation.
    pub fn subdomain_edited(&self, form: &mut CheckoutForm, value: &str) -> Option<SubdomainState> {
        let subdomain = form.field_mut(&self.subdomain_field_id)?;
        subdomain.value = value.to_string();
        subdomain.clear_auto_generated();
        let state = SubdomainState::of(subdomain);
        debug!(field = %subdomain.id, state = ?state, "Subdomain edited by user");
        Some(state)
    }

    /// Submit path: fill the subdomain only if it is empty
    pub fn fill_if_empty(&self, form: &mut CheckoutForm) -> bool {
        match self.state(form) {
            Some(SubdomainState::Empty) => self.fill_derived(form),
            _ => false,
        }
    }

    /// Write the derivation of the company name into the subdomain field and
    /// mark it auto-generated. Writes nothing when the derivation is empty.
    pub fn fill_derived(&self, form: &mut CheckoutForm) -> bool {
        let derived = match form.field(&self.company_field_id) {
            Some(company) => derive_subdomain_with_limit(&company.value, self.max_length),
            None => return false,
        };
        if derived.is_empty() {
            return false;
        }

        match form.field_mut(&self.subdomain_field_id) {
            Some(subdomain) => {
                debug!(field = %subdomain.id, derived = %derived, "Auto-generated subdomain");
                subdomain.value = derived;
                subdomain.mark_auto_generated();
                true
            }
            None => false,
        }
    }
}
