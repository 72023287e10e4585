// Built-in rule checks

use crate::Rule;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$").unwrap()
});

static URL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());

static ALPHA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\p{L}\p{M}]+$").unwrap());

static ALPHA_NUM_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\p{L}\p{M}\p{N}]+$").unwrap());

static INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-+]?[0-9]+$").unwrap());

/// Measured size of a value for `min`, `max` and `between`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Size {
    Numeric(f64),
    Length(usize),
}

impl Size {
    fn as_f64(self) -> f64 {
        match self {
            Size::Numeric(n) => n,
            Size::Length(len) => len as f64,
        }
    }
}

/// Find `field` in `data`, walking dotted paths (`user.email`, `items.0`) when
/// there is no literal key of that name.
pub(crate) fn lookup<'a>(data: &'a Value, field: &str) -> Option<&'a Value> {
    if let Some(value) = data.get(field) {
        return Some(value);
    }
    if !field.contains('.') {
        return None;
    }

    field.split('.').try_fold(data, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Missing, null, blank strings and empty arrays count as "no value".
pub(crate) fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => {
            n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
        }
        Value::String(s) => INTEGER_REGEX.is_match(s.trim()),
        _ => false,
    }
}

fn matches(regex: &Regex, value: &Value) -> bool {
    as_text(value).is_some_and(|text| regex.is_match(&text))
}

/// Size of `value`; numeric when it is a number or the field is declared numeric.
pub(crate) fn size(value: &Value, numeric: bool) -> Option<Size> {
    if numeric || value.is_number() {
        return as_number(value).map(Size::Numeric);
    }
    match value {
        Value::String(s) => Some(Size::Length(s.chars().count())),
        Value::Array(items) => Some(Size::Length(items.len())),
        _ => None,
    }
}

/// Run one rule against a present value.
///
/// `numeric` is true when the field also carries `numeric` or `integer`.
pub(crate) fn check(rule: &Rule, field: &str, value: Option<&Value>, data: &Value, numeric: bool) -> bool {
    let Some(value) = value else {
        return !matches!(rule, Rule::Required);
    };

    match rule {
        Rule::Required => !is_blank(Some(value)),
        Rule::Email => matches(&EMAIL_REGEX, value),
        Rule::Url => matches(&URL_REGEX, value),
        Rule::Alpha => matches(&ALPHA_REGEX, value),
        Rule::AlphaNum => matches(&ALPHA_NUM_REGEX, value),
        Rule::Numeric => as_number(value).is_some(),
        Rule::Integer => is_integer(value),
        Rule::Min(min) => size(value, numeric).is_some_and(|s| s.as_f64() >= *min),
        Rule::Max(max) => size(value, numeric).is_some_and(|s| s.as_f64() <= *max),
        Rule::Between(min, max) => size(value, numeric).is_some_and(|s| {
            let s = s.as_f64();
            s >= *min && s <= *max
        }),
        Rule::In(options) => {
            as_text(value).is_some_and(|text| options.iter().any(|option| *option == text))
        }
        Rule::Confirmed => {
            lookup(data, &format!("{}_confirmation", field)).is_some_and(|other| other == value)
        }
    }
}
