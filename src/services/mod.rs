//! # Form Services
//!
//! Stateful pieces that sit on top of the validators: the subdomain
//! auto-generation watcher, the submit button guard, and the controller that
//! routes form events to them.

pub mod auto_generation;
pub mod controller;
pub mod submit_guard;

pub use auto_generation::{AutoGenerationWatcher, SubdomainState};
pub use controller::{FormController, FormEvent, SubmitOutcome, DEFAULT_SUBMIT_LABEL};
pub use submit_guard::SubmitButton;
