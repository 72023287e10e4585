//! Rule-expression validation engine for formwork
//!
//! Validates a JSON object against per-field rule expressions such as
//! `"required|email"` or `"integer|between:18,99"`, producing localized
//! messages per field.
//!
//! # Examples
//!
//! ```
//! use formwork_rules::{RuleMap, MessageMap, Validator, ValidatorEngine};
//! use serde_json::json;
//!
//! let rules = RuleMap::from([
//!     ("name".to_string(), "required|min:3".to_string()),
//!     ("email".to_string(), "required|email".to_string()),
//! ]);
//! let messages = MessageMap::from([
//!     ("email.email".to_string(), "Please check your :attribute".to_string()),
//! ]);
//!
//! let data = json!({ "name": "Ada", "email": "ada.example.com" });
//! let mut validator = Validator::new(data, &rules, Some(messages)).unwrap();
//!
//! assert!(validator.fails());
//! assert!(validator.field_errors("name").is_empty());
//! assert_eq!(validator.field_errors("email"), vec!["Please check your email".to_string()]);
//! ```
//!
//! # Rules
//!
//! `required`, `email`, `url`, `alpha`, `alpha_num`, `numeric`, `integer`,
//! `min:n`, `max:n`, `between:a,b`, `in:a,b,..`, `confirmed`.
//!
//! Only `required` runs on missing or blank values; every other rule is
//! skipped for them.
//!
//! # Languages
//!
//! Default messages ship for English, Russian, German, Spanish, French and
//! Italian. See [`Lang`].

mod bag;
mod checks;
mod engine;
mod error;
mod lang;
mod pack;
mod rule;

pub use bag::{ErrorBag, ErrorMap};
pub use engine::{BuildOptions, MessageMap, RuleMap, Validator, ValidatorEngine};
pub use error::{Result, RuleError};
pub use lang::Lang;
pub use pack::{LanguagePack, template};
pub use rule::{Rule, parse_expression};

/// Build a [`RuleMap`] from string pairs.
pub fn rule_map<I, K, V>(pairs: I) -> RuleMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

/// Build a [`MessageMap`] from string pairs.
pub fn message_map<I, K, V>(pairs: I) -> MessageMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}
