// Validation pipe for request bodies

use crate::{Schema, StrategyError, ValidationFailure, ValidationStrategy};
use formwork_rules::ValidatorEngine;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parses JSON request bodies and runs server-side validation on them.
pub struct ValidationPipe;

impl ValidationPipe {
    /// Parse `body`, validate it against `schema`, then deserialize it into `T`.
    pub async fn parse<T>(body: &[u8], schema: &Schema) -> Result<T, StrategyError>
    where
        T: DeserializeOwned,
    {
        Self::parse_with(&ValidationStrategy::default(), body, schema).await
    }

    /// [`ValidationPipe::parse`] with an explicit strategy.
    pub async fn parse_with<T, V>(
        strategy: &ValidationStrategy<V>,
        body: &[u8],
        schema: &Schema<V>,
    ) -> Result<T, StrategyError<V::Error>>
    where
        T: DeserializeOwned,
        V: ValidatorEngine,
    {
        let value: Value = serde_json::from_slice(body)?;
        strategy.validate_server(&value, schema).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// JSON response body for a failed validation.
    pub fn error_body(failure: &ValidationFailure) -> Vec<u8> {
        failure.to_json().to_string().into_bytes()
    }
}
