//! The validator instance and the engine contract
//!
//! [`ValidatorEngine`] is the capability set the strategy layer relies on:
//! construct from data, rules and messages, optionally switch language, run,
//! then read per-field messages. [`Validator`] is the bundled implementation.

use crate::checks::{self, Size};
use crate::rule::{display_number, parse_expression};
use crate::{ErrorBag, Lang, Result, Rule, RuleError, pack};
use formwork_log::{debug, trace};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Field name to rule expression (`"required|email"`).
pub type RuleMap = BTreeMap<String, String>;

/// Custom messages keyed by `"field.rule"` or by a bare `"rule"`.
pub type MessageMap = HashMap<String, String>;

const FALLBACK_TEMPLATE: &str = "The :attribute is invalid.";

/// Construction-time settings for an engine instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Language of default messages
    pub lang: Lang,
    /// Display names substituted for `:attribute`
    pub attribute_names: HashMap<String, String>,
}

impl BuildOptions {
    pub fn new(lang: Lang) -> Self {
        Self {
            lang,
            attribute_names: HashMap::new(),
        }
    }

    /// Set the display name of a field
    pub fn with_attribute_name(mut self, field: impl Into<String>, name: impl Into<String>) -> Self {
        self.attribute_names.insert(field.into(), name.into());
        self
    }
}

/// Capabilities a rule engine must provide to back a validation strategy.
pub trait ValidatorEngine: Sized {
    /// Raised for malformed schemas; never for invalid data
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build an instance over `data`.
    fn build(
        data: &Value,
        rules: &RuleMap,
        messages: Option<&MessageMap>,
        options: &BuildOptions,
    ) -> std::result::Result<Self, Self::Error>;

    /// Current message language
    fn lang(&self) -> Lang;

    /// Switch the message language; affects the next run
    fn set_lang(&mut self, lang: Lang);

    /// Run every rule. True when no rule failed.
    fn passes(&mut self) -> bool;

    fn fails(&mut self) -> bool {
        !self.passes()
    }

    /// Messages of the last run for one field, empty if it passed
    fn field_errors(&self, field: &str) -> Vec<String>;
}

#[derive(Debug, Clone)]
struct FieldRules {
    field: String,
    rules: Vec<Rule>,
    /// Field carries `numeric` or `integer`
    numeric: bool,
}

/// Rule-expression validator over a JSON object.
///
/// # Examples
///
/// ```
/// use formwork_rules::{Lang, RuleMap, Validator, ValidatorEngine};
/// use serde_json::json;
///
/// let rules = RuleMap::from([("email".to_string(), "required|email".to_string())]);
/// let mut validator = Validator::new(json!({ "email": "" }), &rules, None).unwrap();
/// validator.set_lang(Lang::De);
///
/// assert!(validator.fails());
/// assert_eq!(
///     validator.field_errors("email"),
///     vec!["Das email Feld muss ausgefüllt sein.".to_string()]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    data: Value,
    fields: Vec<FieldRules>,
    messages: MessageMap,
    attribute_names: HashMap<String, String>,
    lang: Lang,
    errors: ErrorBag,
}

impl Validator {
    /// Parse `rules` and bind them to `data`.
    pub fn new(data: Value, rules: &RuleMap, messages: Option<MessageMap>) -> Result<Self> {
        let fields = rules
            .iter()
            .map(|(field, expression)| {
                let rules = parse_expression(field, expression)?;
                let numeric = rules
                    .iter()
                    .any(|rule| matches!(rule, Rule::Numeric | Rule::Integer));
                Ok(FieldRules {
                    field: field.clone(),
                    rules,
                    numeric,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("validator built with {} fields", fields.len());

        Ok(Self {
            data,
            fields,
            messages: messages.unwrap_or_default(),
            attribute_names: HashMap::new(),
            lang: Lang::default(),
            errors: ErrorBag::new(),
        })
    }

    /// Apply language and attribute names from `options`.
    pub fn with_options(mut self, options: &BuildOptions) -> Self {
        self.lang = options.lang;
        self.attribute_names.extend(
            options
                .attribute_names
                .iter()
                .map(|(field, name)| (field.clone(), name.clone())),
        );
        self
    }

    /// Switch language by locale tag (`"fr-FR"`).
    pub fn set_locale(&mut self, tag: &str) -> Result<()> {
        self.lang = Lang::parse(tag)?;
        Ok(())
    }

    /// Display name used for `:attribute`
    pub fn set_attribute_name(&mut self, field: impl Into<String>, name: impl Into<String>) {
        self.attribute_names.insert(field.into(), name.into());
    }

    /// Errors of the last run
    pub fn errors(&self) -> &ErrorBag {
        &self.errors
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Fields with rules, in rule-map order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.field.as_str())
    }

    fn attribute(&self, field: &str) -> String {
        self.attribute_names
            .get(field)
            .cloned()
            .unwrap_or_else(|| field.replace('_', " "))
    }

    fn message(&self, field: &FieldRules, rule: &Rule, value: Option<&Value>) -> String {
        let name = rule.name();
        let custom = self
            .messages
            .get(&format!("{}.{}", field.field, name))
            .or_else(|| self.messages.get(name))
            .map(String::as_str);

        let template = custom.unwrap_or_else(|| {
            let key = if rule.is_size() {
                let numeric = field.numeric
                    || value
                        .and_then(|v| checks::size(v, false))
                        .is_some_and(|size| matches!(size, Size::Numeric(_)));
                format!("{}.{}", name, if numeric { "numeric" } else { "string" })
            } else {
                name.to_string()
            };
            pack::template(self.lang, &key).unwrap_or(FALLBACK_TEMPLATE)
        });

        let mut message = template.replace(":attribute", &self.attribute(&field.field));
        match rule {
            Rule::Min(min) => message = message.replace(":min", &display_number(*min)),
            Rule::Max(max) => message = message.replace(":max", &display_number(*max)),
            Rule::Between(min, max) => {
                message = message
                    .replace(":min", &display_number(*min))
                    .replace(":max", &display_number(*max));
            }
            Rule::In(options) => message = message.replace(":values", &options.join(", ")),
            _ => {}
        }
        message
    }
}

impl ValidatorEngine for Validator {
    type Error = RuleError;

    fn build(
        data: &Value,
        rules: &RuleMap,
        messages: Option<&MessageMap>,
        options: &BuildOptions,
    ) -> Result<Self> {
        Ok(Validator::new(data.clone(), rules, messages.cloned())?.with_options(options))
    }

    fn lang(&self) -> Lang {
        self.lang
    }

    fn set_lang(&mut self, lang: Lang) {
        self.lang = lang;
    }

    fn passes(&mut self) -> bool {
        let mut errors = ErrorBag::new();

        for field in &self.fields {
            let value = checks::lookup(&self.data, &field.field);
            let blank = checks::is_blank(value);

            for rule in &field.rules {
                if blank && !rule.is_implicit() {
                    continue;
                }
                if !checks::check(rule, &field.field, value, &self.data, field.numeric) {
                    trace!("field '{}' failed rule '{}'", field.field, rule.name());
                    errors.add(field.field.clone(), self.message(field, rule, value));
                }
            }
        }

        debug!(
            "validation run in '{}': {} failing fields",
            self.lang,
            errors.all().len()
        );
        self.errors = errors;
        self.errors.is_empty()
    }

    fn field_errors(&self, field: &str) -> Vec<String> {
        self.errors.get(field).to_vec()
    }
}
