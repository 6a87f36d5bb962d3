//! Submit button state while a submission is in flight.
//!
//! After a passing submit the button is disabled and relabelled. It comes
//! back on its own once the reset delay has elapsed, in case the page never
//! navigates away. Time is passed in by the caller.

use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::FormConfig;

#[derive(Debug, Clone, Serialize)]
pub struct SubmitButton {
    label: String,
    #[serde(skip)]
    idle_label: String,
    #[serde(skip)]
    processing_label: String,
    disabled: bool,
    #[serde(skip)]
    reset_after: Duration,
    #[serde(skip)]
    reset_at: Option<Instant>,
}

impl SubmitButton {
    pub fn new(label: impl Into<String>, config: &FormConfig) -> Self {
        let label = label.into();
        Self {
            idle_label: label.clone(),
            label,
            processing_label: config.processing_label.clone(),
            disabled: false,
            reset_after: config.submit_reset(),
            reset_at: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Disable the button for a submission starting at `now`
    pub fn begin(&mut self, now: Instant) {
        self.disabled = true;
        self.label = self.processing_label.clone();
        self.reset_at = Some(now + self.reset_after);
        debug!(reset_after_secs = self.reset_after.as_secs(), "Submit button disabled");
    }

    /// Re-enable the button if its reset delay has passed. Returns `true`
    /// when this call re-enabled it.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.reset_at {
            Some(deadline) if now >= deadline => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        self.disabled = false;
        self.label = self.idle_label.clone();
        self.reset_at = None;
    }
}
