// Per-call validation context

use formwork_rules::ErrorMap;

/// What a client-side validation call is about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationContext {
    /// Field just modified; `None` validates every field
    pub key: Option<String>,
    /// Errors reported by the previous call
    pub prev_errors: ErrorMap,
}

impl ValidationContext {
    /// Validate every field of the schema.
    pub fn all() -> Self {
        Self::default()
    }

    /// Validate only `key`.
    pub fn field(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            prev_errors: ErrorMap::new(),
        }
    }

    /// Attach the previous result
    pub fn with_prev_errors(mut self, prev_errors: ErrorMap) -> Self {
        self.prev_errors = prev_errors;
        self
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Previous messages of `field`, empty if none were recorded
    pub fn prev_errors_for(&self, field: &str) -> &[String] {
        self.prev_errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}
