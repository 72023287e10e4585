//! Form validation strategies for formwork
//!
//! Wraps a rule engine to validate forms in two contexts:
//!
//! - **client**: synchronous, one field at a time or the whole form, with
//!   optional progressive activation so untouched fields stay quiet;
//! - **server**: asynchronous, whole object, failing with every invalid
//!   field at once.
//!
//! # Examples
//!
//! ## Progressive client validation
//!
//! ```
//! use formwork_strategy::{ValidationContext, activate_rule, create_inactive_schema, validate};
//! use formwork_rules::rule_map;
//! use serde_json::json;
//!
//! let mut schema = create_inactive_schema(
//!     rule_map([("email", "required|email"), ("name", "required")]),
//!     None,
//!     None,
//! );
//! let data = json!({ "email": "not-an-email" });
//!
//! // Untouched fields report no errors
//! validate(&data, &schema, &ValidationContext::field("email"), |errors| {
//!     assert!(errors["email"].is_empty());
//! })
//! .unwrap();
//!
//! // After the user leaves the field, its rule is active
//! activate_rule(&mut schema, "email");
//! validate(&data, &schema, &ValidationContext::field("email"), |errors| {
//!     assert_eq!(errors["email"], vec!["The email format is invalid.".to_string()]);
//! })
//! .unwrap();
//! ```
//!
//! ## Server validation
//!
//! ```
//! use formwork_strategy::{create_schema, validate_server};
//! use formwork_rules::rule_map;
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let schema = create_schema(rule_map([("name", "required")]), None, None);
//!
//! let err = validate_server(&json!({}), &schema).await.unwrap_err();
//! assert_eq!(err.errors().unwrap()["name"], vec!["The name field is required.".to_string()]);
//! # });
//! ```
//!
//! ## Localized messages
//!
//! ```
//! use formwork_strategy::{Schema, ValidationContext, ValidationStrategy};
//! use formwork_rules::{Lang, Validator, ValidatorEngine};
//! use serde_json::json;
//!
//! let schema: Schema = Schema::always_active([("email", "required")])
//!     .with_hook(|validator: &mut Validator| validator.set_lang(Lang::Ru));
//!
//! let errors = ValidationStrategy::default()
//!     .check(&json!({}), &schema, &ValidationContext::field("email"))
//!     .unwrap();
//! assert_eq!(errors["email"], vec!["Поле email обязательно для заполнения.".to_string()]);
//! ```

mod config;
mod context;
mod error;
mod pipe;
mod runner;
mod schema;

pub use config::{ConfigError, ENV_LOCALE, StrategyConfig};
pub use context::ValidationContext;
pub use error::{StrategyError, ValidationFailure};
pub use pipe::ValidationPipe;
pub use runner::{ValidationStrategy, validate, validate_server};
pub use schema::{
    ActiveFields, Activation, Schema, SchemaHook, activate_rule, create_inactive_schema,
    create_schema,
};

pub use formwork_rules::ErrorMap;
