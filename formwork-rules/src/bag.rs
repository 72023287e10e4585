// Per-field error messages

use std::collections::BTreeMap;
use std::fmt;

/// Field name to ordered messages.
pub type ErrorMap = BTreeMap<String, Vec<String>>;

/// Messages collected by one validation run.
///
/// Only fields with at least one failed rule have an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBag {
    errors: ErrorMap,
}

impl ErrorBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message for a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_default().push(message.into());
    }

    /// Messages for a field, empty if it passed
    pub fn get(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field).first().map(String::as_str)
    }

    pub fn has(&self, field: &str) -> bool {
        !self.get(field).is_empty()
    }

    /// Total number of messages
    pub fn count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// All failing fields and their messages
    pub fn all(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn into_map(self) -> ErrorMap {
        self.errors
    }

    /// `{"field": ["message", ..], ..}`
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self.errors)
    }
}

impl fmt::Display for ErrorBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, messages) in &self.errors {
            for message in messages {
                writeln!(f, "{}: {}", field, message)?;
            }
        }
        Ok(())
    }
}
