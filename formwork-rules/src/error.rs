//! Errors raised while building a validator

use thiserror::Error;

/// Errors that can occur while parsing rules or selecting a language.
///
/// Invalid *data* is never an error; it is reported through the
/// [`ErrorBag`](crate::ErrorBag). These variants describe a broken schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// Rule name not known to the engine
    #[error("Unknown rule '{rule}' on field '{field}'")]
    UnknownRule { field: String, rule: String },

    /// Rule requires parameters but none were given
    #[error("Rule '{rule}' on field '{field}' requires a parameter")]
    MissingParameter { field: String, rule: String },

    /// Rule parameter could not be parsed
    #[error("Invalid parameter '{param}' for rule '{rule}' on field '{field}'")]
    InvalidParameter {
        field: String,
        rule: String,
        param: String,
    },

    /// Locale tag without a language pack
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),
}

/// Result type for rule engine operations
pub type Result<T> = std::result::Result<T, RuleError>;
