// Rule expression parsing

use crate::{Result, RuleError};

/// A single parsed rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Value must be present and not blank
    Required,
    Email,
    Url,
    /// Letters only
    Alpha,
    /// Letters and digits only
    AlphaNum,
    Numeric,
    Integer,
    /// Lower bound on the value (numbers) or length (strings, arrays)
    Min(f64),
    /// Upper bound on the value (numbers) or length (strings, arrays)
    Max(f64),
    /// Inclusive bounds on the value or length
    Between(f64, f64),
    /// Value must be one of the listed options
    In(Vec<String>),
    /// `<field>_confirmation` must hold the same value
    Confirmed,
}

impl Rule {
    /// Rule name as written in expressions and message keys.
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Email => "email",
            Rule::Url => "url",
            Rule::Alpha => "alpha",
            Rule::AlphaNum => "alpha_num",
            Rule::Numeric => "numeric",
            Rule::Integer => "integer",
            Rule::Min(_) => "min",
            Rule::Max(_) => "max",
            Rule::Between(_, _) => "between",
            Rule::In(_) => "in",
            Rule::Confirmed => "confirmed",
        }
    }

    /// Implicit rules run even when the value is missing or empty.
    pub fn is_implicit(&self) -> bool {
        matches!(self, Rule::Required)
    }

    /// Size rules have separate `numeric` and `string` message variants.
    pub fn is_size(&self) -> bool {
        matches!(self, Rule::Min(_) | Rule::Max(_) | Rule::Between(_, _))
    }

    /// Parse one rule such as `min:3` or `in:a,b,c`.
    pub fn parse(field: &str, rule: &str) -> Result<Self> {
        let (name, params) = match rule.split_once(':') {
            Some((name, params)) => (name.trim(), Some(params)),
            None => (rule.trim(), None),
        };

        let params: Vec<&str> = params
            .map(|p| p.split(',').map(str::trim).filter(|p| !p.is_empty()).collect())
            .unwrap_or_default();

        let number = |index: usize| -> Result<f64> {
            let raw = params.get(index).ok_or_else(|| RuleError::MissingParameter {
                field: field.to_string(),
                rule: name.to_string(),
            })?;
            raw.parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| RuleError::InvalidParameter {
                    field: field.to_string(),
                    rule: name.to_string(),
                    param: raw.to_string(),
                })
        };

        match name {
            "required" => Ok(Rule::Required),
            "email" => Ok(Rule::Email),
            "url" => Ok(Rule::Url),
            "alpha" => Ok(Rule::Alpha),
            "alpha_num" => Ok(Rule::AlphaNum),
            "numeric" => Ok(Rule::Numeric),
            "integer" => Ok(Rule::Integer),
            "confirmed" => Ok(Rule::Confirmed),
            "min" => Ok(Rule::Min(number(0)?)),
            "max" => Ok(Rule::Max(number(0)?)),
            "between" => {
                let (min, max) = (number(0)?, number(1)?);
                if min > max {
                    return Err(RuleError::InvalidParameter {
                        field: field.to_string(),
                        rule: name.to_string(),
                        param: format!("{},{}", params[0], params[1]),
                    });
                }
                Ok(Rule::Between(min, max))
            }
            "in" => {
                if params.is_empty() {
                    return Err(RuleError::MissingParameter {
                        field: field.to_string(),
                        rule: name.to_string(),
                    });
                }
                Ok(Rule::In(params.iter().map(|p| p.to_string()).collect()))
            }
            _ => Err(RuleError::UnknownRule {
                field: field.to_string(),
                rule: name.to_string(),
            }),
        }
    }
}

/// Parse a full expression such as `required|email|max:120`.
///
/// Empty segments are ignored, so `"required|"` is the same as `"required"`.
pub fn parse_expression(field: &str, expression: &str) -> Result<Vec<Rule>> {
    expression
        .split('|')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| Rule::parse(field, segment))
        .collect()
}

/// Render a rule parameter the way it was most likely written.
pub(crate) fn display_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
