//! # Error Types
//!
//! Error types for the checkout form pipeline using `thiserror`.
//!
//! Field-level validation failures are not errors: they are collected into a
//! [`crate::validation::ValidationResult`] and rendered next to the field.
//! The variants here cover operational failures around that pipeline
//! (loading configuration, reading form snapshots, rejected submissions).

/// Custom result type for checkout operations
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Main error type for the checkout form crate
#[derive(thiserror::Error, Debug)]
pub enum CheckoutError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O errors with additional context
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {context}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        context: String,
    },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Internal errors
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl CheckoutError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S: Into<String>>(
        message: S,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a validation error with field information
    pub fn validation_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Prefix the context of I/O and serialization errors
    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        let context = context.into();
        match &mut self {
            CheckoutError::Io { context: ctx, .. }
            | CheckoutError::Serialization { context: ctx, .. } => {
                *ctx = format!("{}: {}", context, ctx);
            }
            _ => {}
        }
        self
    }

    /// Field the error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            CheckoutError::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    /// Process exit code used by the CLI for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CheckoutError::Validation { .. } => 2,
            CheckoutError::Config { .. } => 78,
            CheckoutError::Io { .. } | CheckoutError::Serialization { .. } => 74,
            CheckoutError::Internal { .. } => 70,
        }
    }
}

impl From<std::io::Error> for CheckoutError {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            source: error,
            context: "I/O operation failed".to_string(),
        }
    }
}

impl From<serde_json::Error> for CheckoutError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            source: error,
            context: "JSON serialization failed".to_string(),
        }
    }
}

impl From<config::ConfigError> for CheckoutError {
    fn from(error: config::ConfigError) -> Self {
        Self::config_with_source("Configuration loading failed", Box::new(error))
    }
}

impl From<validator::ValidationErrors> for CheckoutError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .iter()
            .map(|(field, field_errors)| {
                let error_messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| e.message.as_ref().map_or("Invalid value".to_string(), |m| m.to_string()))
                    .collect();
                format!("{}: {}", field, error_messages.join(", "))
            })
            .collect::<Vec<_>>()
            .join("; ");

        match fields.as_slice() {
            [(field, _)] => Self::validation_field(format!("Validation failed: {}", message), field.to_string()),
            _ => Self::validation(format!("Validation failed: {}", message)),
        }
    }
}
