// Strategy errors

use formwork_rules::{ErrorMap, RuleError};
use thiserror::Error;

/// Server-side validation found invalid fields.
///
/// `errors` holds only the fields with at least one message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed{}", message_lines(.errors))]
pub struct ValidationFailure {
    pub errors: ErrorMap,
}

impl ValidationFailure {
    pub fn new(errors: ErrorMap) -> Self {
        Self { errors }
    }

    /// Messages of one field, empty if it passed
    pub fn field_errors(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Names of the failing fields
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// `{"errors": {"field": ["message", ..]}}`
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "errors": self.errors })
    }
}

fn message_lines(errors: &ErrorMap) -> String {
    errors
        .iter()
        .flat_map(|(field, messages)| messages.iter().map(move |m| format!("\n{}: {}", field, m)))
        .collect()
}

impl From<ErrorMap> for ValidationFailure {
    fn from(errors: ErrorMap) -> Self {
        Self::new(errors)
    }
}

/// Errors returned by the server path and the request pipe.
///
/// `E` is the engine's construction error, passed through untouched.
#[derive(Debug, Error)]
pub enum StrategyError<E: std::error::Error + 'static = RuleError> {
    /// Data did not satisfy the schema
    #[error(transparent)]
    Failed(#[from] ValidationFailure),

    /// The engine rejected the schema
    #[error(transparent)]
    Engine(E),

    /// Request body was not valid JSON or did not fit the target type
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl<E: std::error::Error + 'static> StrategyError<E> {
    /// Per-field messages when this is a validation failure
    pub fn errors(&self) -> Option<&ErrorMap> {
        match self {
            StrategyError::Failed(failure) => Some(&failure.errors),
            _ => None,
        }
    }

    pub fn is_validation_failure(&self) -> bool {
        matches!(self, StrategyError::Failed(_))
    }
}
