//! Request validation against catalog rules.
//!
//! Validation walks every rule and reports all violations together, so a form
//! can surface per-field messages in one round trip. No side effects.

use crate::catalog::{DateOrder, FieldKind, FieldRule, Format, Resource};
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// One violated field with a human-readable message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: String) -> Self {
        FieldError {
            field: field.to_string(),
            message,
        }
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a body against the resource schema. Collects every violation;
    /// Ok(()) means the payload satisfies all field and cross-field rules.
    pub fn validate(body: &Map<String, Value>, resource: &Resource) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        for (field, rule) in &resource.rules {
            match body.get(*field) {
                None | Some(Value::Null) => {
                    if rule.required {
                        errors.push(FieldError::new(field, format!("{} is required", field)));
                    }
                }
                Some(v) => validate_field(field, v, rule, &mut errors),
            }
        }
        if let Some(order) = &resource.date_order {
            validate_date_order(body, order, &mut errors);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn validate_field(field: &str, v: &Value, rule: &FieldRule, errors: &mut Vec<FieldError>) {
    if let Some(message) = kind_mismatch(v, rule.kind) {
        errors.push(FieldError::new(field, format!("{} {}", field, message)));
        return;
    }
    if let Some(min) = rule.min_length {
        if let Some(s) = v.as_str() {
            if s.chars().count() < min {
                errors.push(FieldError::new(
                    field,
                    format!("{} must be at least {} characters", field, min),
                ));
            }
        }
    }
    if let Some(format) = rule.format {
        validate_format(field, v, format, errors);
    }
    if let Some(pattern) = rule.pattern {
        if let Some(s) = v.as_str() {
            if let Ok(re) = Regex::new(pattern) {
                if !re.is_match(s) {
                    errors.push(FieldError::new(
                        field,
                        format!("{} does not match required pattern", field),
                    ));
                }
            }
        }
    }
    if let Some(allowed) = rule.allowed {
        if let Some(s) = v.as_str() {
            if !allowed.contains(&s) {
                errors.push(FieldError::new(
                    field,
                    format!("{} must be one of: {}", field, allowed.join(", ")),
                ));
            }
        }
    }
    if let Some(min) = rule.minimum {
        if let Some(n) = v.as_f64() {
            if n < min {
                errors.push(FieldError::new(
                    field,
                    format!("{} must be at least {}", field, min),
                ));
            }
        }
    }
    if let Some(max) = rule.maximum {
        if let Some(n) = v.as_f64() {
            if n > max {
                errors.push(FieldError::new(
                    field,
                    format!("{} must be at most {}", field, max),
                ));
            }
        }
    }
    if let Some(min) = rule.exclusive_minimum {
        if let Some(n) = v.as_f64() {
            if n <= min {
                errors.push(FieldError::new(
                    field,
                    format!("{} must be greater than {}", field, min),
                ));
            }
        }
    }
}

fn kind_mismatch(v: &Value, kind: FieldKind) -> Option<&'static str> {
    match kind {
        FieldKind::Text if !v.is_string() => Some("must be a string"),
        FieldKind::Number if !v.is_number() => Some("must be a number"),
        FieldKind::Boolean if !v.is_boolean() => Some("must be a boolean"),
        FieldKind::TextArray => match v.as_array() {
            Some(items) if items.iter().all(Value::is_string) => None,
            _ => Some("must be an array of strings"),
        },
        _ => None,
    }
}

fn validate_format(field: &str, v: &Value, format: Format, errors: &mut Vec<FieldError>) {
    let Some(s) = v.as_str() else { return };
    match format {
        Format::Email => {
            let valid = Regex::new(EMAIL_PATTERN)
                .map(|re| re.is_match(s))
                .unwrap_or(false);
            if !valid {
                errors.push(FieldError::new(
                    field,
                    format!("{} must be a valid email", field),
                ));
            }
        }
        Format::DateTime => {
            if chrono::DateTime::parse_from_rfc3339(s).is_err() {
                errors.push(FieldError::new(
                    field,
                    format!("{} must be a valid RFC 3339 datetime", field),
                ));
            }
        }
    }
}

/// Cross-field check: end must be strictly after start. Only applies when both
/// fields parse; unparseable values are already reported as format errors.
fn validate_date_order(body: &Map<String, Value>, order: &DateOrder, errors: &mut Vec<FieldError>) {
    let parse = |field: &str| {
        body.get(field)
            .and_then(Value::as_str)
            .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
    };
    if let (Some(start), Some(end)) = (parse(order.start_field), parse(order.end_field)) {
        if end <= start {
            errors.push(FieldError::new(
                order.end_field,
                format!("{} must be after {}", order.end_field, order.start_field),
            ));
        }
    }
}
