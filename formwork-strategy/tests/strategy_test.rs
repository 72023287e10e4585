//! Integration tests for formwork-strategy
//!
//! Exercises the public surface the way a form front end and an API handler
//! would: schema creation, progressive activation, client and server runs.

use formwork_rules::{Lang, MessageMap, RuleMap, Validator, ValidatorEngine, message_map, rule_map};
use formwork_strategy::*;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn contact_rules() -> RuleMap {
    rule_map([
        ("name", "required|min:2"),
        ("email", "required|email"),
        ("age", "integer|min:18"),
    ])
}

fn contact_messages() -> MessageMap {
    message_map([
        ("name.required", "Please tell us your name."),
        ("email.required", "We need an email address."),
        ("email.email", "That email does not look right."),
    ])
}

fn run(data: &Value, schema: &Schema, context: ValidationContext) -> ErrorMap {
    let mut captured = None;
    validate(data, schema, &context, |errors| captured = Some(errors)).unwrap();
    captured.expect("callback runs before validate returns")
}

fn errors(pairs: &[(&str, &[&str])]) -> ErrorMap {
    pairs
        .iter()
        .map(|(field, messages)| {
            (
                field.to_string(),
                messages.iter().map(|m| m.to_string()).collect(),
            )
        })
        .collect()
}

// =============================================================================
// Schema creation and activation
// =============================================================================

#[test]
fn test_schema_variants() {
    let schema = create_schema(contact_rules(), Some(contact_messages()), None);
    assert_eq!(schema.active_rules(), None);
    assert_eq!(schema.rules(), &contact_rules());
    assert_eq!(schema.messages(), Some(&contact_messages()));

    let schema = create_inactive_schema(contact_rules(), None, None);
    assert_eq!(schema.active_rules(), Some(&[][..]));
    assert_eq!(schema.messages(), None);
}

#[test]
fn test_activation_order() {
    let mut schema = create_inactive_schema(contact_rules(), None, None);
    activate_rule(&mut schema, "name");
    activate_rule(&mut schema, "email");

    assert_eq!(
        schema.active_rules(),
        Some(&["name".to_string(), "email".to_string()][..])
    );
    assert!(matches!(schema.activation(), Activation::Gated(active) if active.len() == 2));
}

// =============================================================================
// Client path, always-active schema
// =============================================================================

#[test]
fn test_single_invalid_field_uses_custom_messages() {
    let schema = create_schema(contact_rules(), Some(contact_messages()), None);

    let result = run(&json!({ "email": "" }), &schema, ValidationContext::field("email"));
    assert_eq!(result, errors(&[("email", &["We need an email address."])]));

    let result = run(&json!({ "email": "nobody" }), &schema, ValidationContext::field("email"));
    assert_eq!(result, errors(&[("email", &["That email does not look right."])]));
}

#[test]
fn test_single_field_made_valid() {
    let schema = create_schema(contact_rules(), Some(contact_messages()), None);
    let result = run(
        &json!({ "email": "ada@example.com" }),
        &schema,
        ValidationContext::field("email"),
    );
    assert_eq!(result, errors(&[("email", &[])]));
}

#[test]
fn test_whole_object_reports_only_invalid_fields() {
    let schema = create_schema(contact_rules(), Some(contact_messages()), None);

    let result = run(
        &json!({ "name": "Ada", "email": "nobody", "age": 17 }),
        &schema,
        ValidationContext::all(),
    );
    assert_eq!(
        result,
        errors(&[
            ("age", &["The age must be at least 18."]),
            ("email", &["That email does not look right."]),
        ])
    );

    let result = run(
        &json!({ "name": "Ada", "email": "ada@example.com", "age": 36 }),
        &schema,
        ValidationContext::all(),
    );
    assert!(result.is_empty());
}

// =============================================================================
// Client path, gated schema
// =============================================================================

#[test]
fn test_inactive_field_reported_clean() {
    let schema = create_inactive_schema(contact_rules(), None, None);
    let result = run(&json!({ "name": "" }), &schema, ValidationContext::field("name"));
    assert_eq!(result, errors(&[("name", &[])]));
}

#[test]
fn test_activated_field_reports_real_errors() {
    let mut schema = create_inactive_schema(contact_rules(), Some(contact_messages()), None);
    activate_rule(&mut schema, "name");
    let data = json!({ "name": "", "email": "nobody" });

    let result = run(&data, &schema, ValidationContext::field("name"));
    assert_eq!(result, errors(&[("name", &["Please tell us your name."])]));

    let result = run(&data, &schema, ValidationContext::field("email"));
    assert_eq!(result, errors(&[("email", &[])]));
}

#[test]
fn test_whole_object_ignores_activation() {
    let schema = create_inactive_schema(contact_rules(), None, None);
    let result = run(&json!({ "age": "abc" }), &schema, ValidationContext::all());

    assert_eq!(
        result,
        errors(&[
            (
                "age",
                &["The age must be an integer.", "The age must be at least 18."]
            ),
            ("email", &["The email field is required."]),
            ("name", &["The name field is required."]),
        ])
    );
}

#[test]
fn test_prev_errors_do_not_change_outcome() {
    let schema = create_schema(contact_rules(), None, None);
    let prev = errors(&[("name", &["stale"])]);

    let result = run(
        &json!({ "name": "Ada" }),
        &schema,
        ValidationContext::field("name").with_prev_errors(prev),
    );
    assert_eq!(result, errors(&[("name", &[])]));
}

// =============================================================================
// Server path
// =============================================================================

#[tokio::test]
async fn test_server_resolves_for_valid_input() {
    let schema = create_schema(contact_rules(), None, None);
    let data = json!({ "name": "Ada", "email": "ada@example.com" });
    assert!(validate_server(&data, &schema).await.is_ok());
}

#[tokio::test]
async fn test_server_rejects_with_invalid_fields_only() {
    let mut schema = create_inactive_schema(contact_rules(), Some(contact_messages()), None);
    activate_rule(&mut schema, "name");

    let err = validate_server(&json!({ "name": "Ada", "email": "nobody", "age": 12 }), &schema)
        .await
        .unwrap_err();

    let StrategyError::Failed(failure) = err else {
        panic!("expected a validation failure, got {:?}", err);
    };
    assert_eq!(
        failure.errors,
        errors(&[
            ("age", &["The age must be at least 18."]),
            ("email", &["That email does not look right."]),
        ])
    );
    assert_eq!(failure.fields().collect::<Vec<_>>(), vec!["age", "email"]);
}

#[tokio::test]
async fn test_server_checks_unactivated_fields() {
    let schema = create_inactive_schema(contact_rules(), None, None);
    let err = validate_server(&json!({}), &schema).await.unwrap_err();

    assert_eq!(
        err.errors().map(|e| e.keys().cloned().collect::<Vec<_>>()),
        Some(vec!["email".to_string(), "name".to_string()])
    );
}

// =============================================================================
// Hook and locale
// =============================================================================

#[tokio::test]
async fn test_hook_called_once_per_run_in_both_paths() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let hook: SchemaHook = Arc::new(move |validator: &mut Validator| {
        counter.fetch_add(1, Ordering::SeqCst);
        assert_eq!(validator.lang(), Lang::En);
    });
    let schema = create_schema(contact_rules(), None, Some(hook));

    run(&json!({}), &schema, ValidationContext::field("name"));
    run(&json!({}), &schema, ValidationContext::all());
    let _ = validate_server(&json!({}), &schema).await;
    let _ = validate_server(&json!({ "name": "Ada", "email": "a@b.co" }), &schema).await;

    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[test]
fn test_hook_switches_locale() {
    let expected = [
        (Lang::Ru, "Поле email обязательно для заполнения."),
        (Lang::De, "Das email Feld muss ausgefüllt sein."),
        (Lang::Es, "El campo email es obligatorio."),
        (Lang::Fr, "Le champ email est obligatoire."),
        (Lang::It, "Il campo email è richiesto."),
    ];

    for (lang, message) in expected {
        let hook: SchemaHook = Arc::new(move |validator: &mut Validator| validator.set_lang(lang));
        let schema = create_schema(contact_rules(), None, Some(hook));

        let result = run(&json!({}), &schema, ValidationContext::field("email"));
        assert_eq!(result, errors(&[("email", &[message])]), "{}", lang);
    }
}

#[test]
fn test_hook_overrides_configured_locale() {
    let strategy: ValidationStrategy = ValidationStrategy::new(StrategyConfig::new().with_locale(Lang::De));
    let plain = create_schema(contact_rules(), None, None);
    let hooked = create_schema(
        contact_rules(),
        None,
        Some(Arc::new(|validator: &mut Validator| validator.set_lang(Lang::Es))),
    );

    let data = json!({ "email": "nobody" });
    let context = ValidationContext::field("email");
    assert_eq!(
        strategy.check(&data, &plain, &context).unwrap(),
        errors(&[("email", &["Das email Format ist ungültig."])])
    );
    assert_eq!(
        strategy.check(&data, &hooked, &context).unwrap(),
        errors(&[("email", &["El campo email no es un correo válido."])])
    );
}
