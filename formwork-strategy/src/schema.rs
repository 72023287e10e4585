//! Validation schemas
//!
//! A [`Schema`] bundles rule expressions, optional custom messages and an
//! optional hook run on every freshly built validator. Its [`Activation`]
//! decides which fields report errors during single-field validation:
//!
//! - [`Activation::AlwaysActive`]: every rule reports immediately.
//! - [`Activation::Gated`]: a field reports only after it has been activated,
//!   typically on the user's first interaction with it.

use formwork_log::debug;
use formwork_rules::{MessageMap, RuleMap, Validator};
use std::fmt;
use std::sync::Arc;

/// Hook invoked with each validator instance right after construction.
pub type SchemaHook<V = Validator> = Arc<dyn Fn(&mut V) + Send + Sync>;

/// Fields activated on a gated schema, in activation order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveFields(Vec<String>);

impl ActiveFields {
    /// Insert a field. Returns false if it was already active.
    pub fn insert(&mut self, field: impl Into<String>) -> bool {
        let field = field.into();
        if self.contains(&field) {
            return false;
        }
        self.0.push(field);
        true
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|f| f == field)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Which rules of a schema are live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// All rules always apply
    AlwaysActive,
    /// Only activated fields report in single-field validation
    Gated(ActiveFields),
}

/// Rules, messages and activation state for one form.
pub struct Schema<V = Validator> {
    rules: RuleMap,
    messages: Option<MessageMap>,
    hook: Option<SchemaHook<V>>,
    activation: Activation,
}

impl<V> Schema<V> {
    /// Schema whose rules are all active from the start.
    pub fn always_active<I, K, R>(rules: I) -> Self
    where
        I: IntoIterator<Item = (K, R)>,
        K: Into<String>,
        R: Into<String>,
    {
        Self::with_activation(rules, Activation::AlwaysActive)
    }

    /// Schema with no active field until [`Schema::activate`] is called.
    pub fn gated<I, K, R>(rules: I) -> Self
    where
        I: IntoIterator<Item = (K, R)>,
        K: Into<String>,
        R: Into<String>,
    {
        Self::with_activation(rules, Activation::Gated(ActiveFields::default()))
    }

    fn with_activation<I, K, R>(rules: I, activation: Activation) -> Self
    where
        I: IntoIterator<Item = (K, R)>,
        K: Into<String>,
        R: Into<String>,
    {
        let rules: RuleMap = rules
            .into_iter()
            .map(|(field, rule)| (field.into(), rule.into()))
            .collect();

        debug!(
            "schema created with {} rules ({})",
            rules.len(),
            if matches!(activation, Activation::Gated(_)) {
                "gated"
            } else {
                "always active"
            }
        );

        Self {
            rules,
            messages: None,
            hook: None,
            activation,
        }
    }

    /// Use custom messages keyed by `"field.rule"`.
    pub fn with_messages(mut self, messages: MessageMap) -> Self {
        self.messages = Some(messages);
        self
    }

    /// Run `hook` on every validator built for this schema.
    pub fn with_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut V) + Send + Sync + 'static,
    {
        self.hook = Some(Arc::new(hook));
        self
    }

    /// Share an existing hook.
    pub fn with_shared_hook(mut self, hook: SchemaHook<V>) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Activate the rule of `field`.
    ///
    /// Returns true if the field became active by this call. Activating an
    /// already active field, or any field of an always-active schema, changes
    /// nothing.
    pub fn activate(&mut self, field: impl Into<String>) -> bool {
        let field = field.into();
        match &mut self.activation {
            Activation::Gated(active) => {
                let inserted = active.insert(field.clone());
                debug!(
                    "field '{}' {}",
                    field,
                    if inserted { "activated" } else { "already active" }
                );
                inserted
            }
            Activation::AlwaysActive => {
                debug!("ignoring activation of '{}' on an always-active schema", field);
                false
            }
        }
    }

    pub fn rules(&self) -> &RuleMap {
        &self.rules
    }

    pub fn messages(&self) -> Option<&MessageMap> {
        self.messages.as_ref()
    }

    pub fn hook(&self) -> Option<&SchemaHook<V>> {
        self.hook.as_ref()
    }

    pub fn activation(&self) -> &Activation {
        &self.activation
    }

    /// Activated fields; `None` for an always-active schema.
    pub fn active_rules(&self) -> Option<&[String]> {
        match &self.activation {
            Activation::AlwaysActive => None,
            Activation::Gated(active) => Some(active.as_slice()),
        }
    }

    pub fn is_gated(&self) -> bool {
        matches!(self.activation, Activation::Gated(_))
    }

    /// Whether `field` reports errors in single-field validation.
    pub fn is_active(&self, field: &str) -> bool {
        match &self.activation {
            Activation::AlwaysActive => true,
            Activation::Gated(active) => active.contains(field),
        }
    }

    pub(crate) fn run_hook(&self, validator: &mut V) {
        if let Some(hook) = &self.hook {
            hook(validator);
        }
    }
}

impl<V> Clone for Schema<V> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
            messages: self.messages.clone(),
            hook: self.hook.clone(),
            activation: self.activation.clone(),
        }
    }
}

impl<V> fmt::Debug for Schema<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("rules", &self.rules)
            .field("messages", &self.messages)
            .field("hook", &self.hook.as_ref().map(|_| "Fn(&mut V)"))
            .field("activation", &self.activation)
            .finish()
    }
}

/// Create a schema whose rules are always active.
pub fn create_schema<I, K, R>(
    rules: I,
    messages: Option<MessageMap>,
    hook: Option<SchemaHook>,
) -> Schema
where
    I: IntoIterator<Item = (K, R)>,
    K: Into<String>,
    R: Into<String>,
{
    let mut schema = Schema::always_active(rules);
    schema.messages = messages;
    schema.hook = hook;
    schema
}

/// Create a schema whose rules start inactive.
pub fn create_inactive_schema<I, K, R>(
    rules: I,
    messages: Option<MessageMap>,
    hook: Option<SchemaHook>,
) -> Schema
where
    I: IntoIterator<Item = (K, R)>,
    K: Into<String>,
    R: Into<String>,
{
    let mut schema = Schema::gated(rules);
    schema.messages = messages;
    schema.hook = hook;
    schema
}

/// Activate the rule of `field` on `schema`.
pub fn activate_rule<V>(schema: &mut Schema<V>, field: impl Into<String>) {
    schema.activate(field);
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwork_rules::{Lang, ValidatorEngine, rule_map};

    fn rules() -> RuleMap {
        rule_map([("name", "required"), ("email", "required|email")])
    }

    #[test]
    fn test_variants_expose_active_rules() {
        let always = create_schema(rules(), None, None);
        assert_eq!(always.active_rules(), None);
        assert!(!always.is_gated());

        let gated = create_inactive_schema(rules(), None, None);
        assert_eq!(gated.active_rules(), Some(&[][..]));
        assert!(gated.is_gated());
    }

    #[test]
    fn test_activation_keeps_order_and_ignores_repeats() {
        let mut schema = create_inactive_schema(rules(), None, None);
        activate_rule(&mut schema, "email");
        activate_rule(&mut schema, "name");
        activate_rule(&mut schema, "email");

        assert_eq!(
            schema.active_rules(),
            Some(&["email".to_string(), "name".to_string()][..])
        );
        assert!(schema.is_active("name"));
        assert!(!schema.is_active("age"));
    }

    #[test]
    fn test_activate_reports_change() {
        let mut schema: Schema = Schema::gated(rules());
        assert!(schema.activate("name"));
        assert!(!schema.activate("name"));

        let mut always: Schema = Schema::always_active(rules());
        assert!(!always.activate("name"));
        assert_eq!(always.active_rules(), None);
        assert!(always.is_active("anything"));
    }

    #[test]
    fn test_hook_runs_on_validator() {
        let schema: Schema = Schema::always_active(rules()).with_hook(|v: &mut Validator| v.set_lang(Lang::Fr));
        let mut validator = Validator::new(serde_json::json!({}), schema.rules(), None).unwrap();
        schema.run_hook(&mut validator);
        assert_eq!(validator.lang(), Lang::Fr);
    }

    #[test]
    fn test_shared_hook_across_schemas() {
        let hook: SchemaHook = Arc::new(|v: &mut Validator| v.set_lang(Lang::De));
        let signup: Schema = Schema::always_active(rules()).with_shared_hook(Arc::clone(&hook));
        let profile: Schema = Schema::gated(rules()).with_shared_hook(Arc::clone(&hook));
        assert_eq!(Arc::strong_count(&hook), 3);

        for schema in [&signup, &profile] {
            let mut validator = Validator::new(serde_json::json!({}), schema.rules(), None).unwrap();
            schema.run_hook(&mut validator);
            assert_eq!(validator.lang(), Lang::De);
        }
    }

    #[test]
    fn test_clone_shares_hook_and_copies_state() {
        let mut schema = create_inactive_schema(rules(), None, Some(Arc::new(|_: &mut Validator| {})));
        let copy = schema.clone();
        schema.activate("name");

        assert!(copy.hook().is_some());
        assert_eq!(copy.active_rules(), Some(&[][..]));
        assert_eq!(schema.active_rules().map(<[String]>::len), Some(1));
        assert!(format!("{:?}", copy).contains("Gated"));
    }
}
