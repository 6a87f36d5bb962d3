//! # Error Handling
//!
//! Error types for the checkout form crate, defined with `thiserror`.

pub mod types;

pub use types::{CheckoutError, Result};

/// Alias kept for call sites that refer to the crate error generically
pub type Error = CheckoutError;
