//! Client and server validation runs
//!
//! The client path ([`ValidationStrategy::validate`]) is synchronous and
//! reports invalid data as a result map handed to a callback. The server path
//! ([`ValidationStrategy::validate_server`]) checks every rule regardless of
//! activation and fails with a [`ValidationFailure`].
//!
//! The two paths shape their results differently:
//!
//! - validating one field always yields an entry for that field, empty when
//!   it is clean or not yet active;
//! - validating all fields yields only the fields with messages.

use crate::{Schema, StrategyConfig, StrategyError, ValidationContext, ValidationFailure};
use formwork_log::{debug, trace};
use formwork_rules::{ErrorMap, RuleError, Validator, ValidatorEngine};
use serde_json::Value;
use std::marker::PhantomData;

/// Runs schemas against data with one configuration.
pub struct ValidationStrategy<V = Validator> {
    config: StrategyConfig,
    _engine: PhantomData<fn() -> V>,
}

impl<V> ValidationStrategy<V> {
    pub fn new(config: StrategyConfig) -> Self {
        Self {
            config,
            _engine: PhantomData,
        }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }
}

impl<V> Default for ValidationStrategy<V> {
    fn default() -> Self {
        Self::new(StrategyConfig::default())
    }
}

impl<V> Clone for ValidationStrategy<V> {
    fn clone(&self) -> Self {
        Self::new(self.config.clone())
    }
}

impl<V> std::fmt::Debug for ValidationStrategy<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationStrategy")
            .field("config", &self.config)
            .finish()
    }
}

impl<V: ValidatorEngine> ValidationStrategy<V> {
    /// Build the engine and give the schema hook its one call.
    fn instantiate(&self, data: &Value, schema: &Schema<V>) -> Result<V, V::Error> {
        let mut validator = V::build(
            data,
            schema.rules(),
            schema.messages(),
            &self.config.build_options(),
        )?;
        schema.run_hook(&mut validator);
        Ok(validator)
    }

    /// Client-side validation returning the result map.
    ///
    /// With `context.key` set, the map holds exactly that key. On a gated
    /// schema a field that has not been activated maps to no messages, valid
    /// or not. Without a key every field is checked, activation state is
    /// ignored, and only failing fields appear.
    pub fn check(
        &self,
        data: &Value,
        schema: &Schema<V>,
        context: &ValidationContext,
    ) -> Result<ErrorMap, V::Error> {
        let mut validator = self.instantiate(data, schema)?;
        let passed = validator.passes();

        let mut result = ErrorMap::new();
        match context.key() {
            Some(key) => {
                let errors = if schema.is_active(key) {
                    validator.field_errors(key)
                } else {
                    trace!("field '{}' is not active, reporting it clean", key);
                    Vec::new()
                };
                result.insert(key.to_string(), errors);
            }
            None => {
                for field in schema.rules().keys() {
                    let errors = validator.field_errors(field);
                    if !errors.is_empty() {
                        result.insert(field.clone(), errors);
                    }
                }
            }
        }

        log_transitions(context, &result);
        debug!(
            "client validation of {}: engine {}, {} fields reported",
            context.key().unwrap_or("all fields"),
            if passed { "passed" } else { "failed" },
            result.len()
        );
        Ok(result)
    }

    /// Client-side validation.
    ///
    /// `callback` receives the result map before this returns. Invalid data
    /// is never an `Err`; only a schema the engine cannot build is, and then
    /// the callback is not called.
    pub fn validate<F>(
        &self,
        data: &Value,
        schema: &Schema<V>,
        context: &ValidationContext,
        callback: F,
    ) -> Result<(), V::Error>
    where
        F: FnOnce(ErrorMap),
    {
        let result = self.check(data, schema, context)?;
        callback(result);
        Ok(())
    }

    /// Server-side validation of the whole object.
    ///
    /// Every rule is evaluated regardless of activation state.
    pub async fn validate_server(
        &self,
        data: &Value,
        schema: &Schema<V>,
    ) -> Result<(), StrategyError<V::Error>> {
        let mut validator = self.instantiate(data, schema).map_err(StrategyError::Engine)?;

        if validator.passes() {
            debug!("server validation passed");
            return Ok(());
        }

        let errors: ErrorMap = schema
            .rules()
            .keys()
            .filter_map(|field| {
                let messages = validator.field_errors(field);
                (!messages.is_empty()).then(|| (field.clone(), messages))
            })
            .collect();

        debug!("server validation failed for {} fields", errors.len());
        Err(ValidationFailure::new(errors).into())
    }
}

fn log_transitions(context: &ValidationContext, result: &ErrorMap) {
    if !formwork_log::is_level_enabled(formwork_log::Level::Trace) {
        return;
    }

    let mut fields: Vec<&String> = result.keys().collect();
    if context.key.is_none() {
        fields.extend(context.prev_errors.keys().filter(|f| !result.contains_key(*f)));
    }

    for field in fields {
        let before = context.prev_errors_for(field);
        let after = result.get(field).map(Vec::as_slice).unwrap_or(&[]);
        if before != after {
            trace!(
                "field '{}' went from {} to {} messages",
                field,
                before.len(),
                after.len()
            );
        }
    }
}

/// Client-side validation with the bundled engine and default configuration.
pub fn validate<F>(
    data: &Value,
    schema: &Schema,
    context: &ValidationContext,
    callback: F,
) -> Result<(), RuleError>
where
    F: FnOnce(ErrorMap),
{
    ValidationStrategy::default().validate(data, schema, context, callback)
}

/// Server-side validation with the bundled engine and default configuration.
pub async fn validate_server(data: &Value, schema: &Schema) -> Result<(), StrategyError> {
    ValidationStrategy::default().validate_server(data, schema).await
}
