//! Validation Module
//!
//! Turns the `validator` derive rules declared on the entities into a flat,
//! ordered list of field violations.

use serde::Serialize;
use validator::{Validate, ValidationError};

// == Violation ==
/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Wire name of the offending field (camelCase)
    pub field: String,
    /// Human readable description
    pub message: String,
}

impl Violation {
    /// Creates a new Violation
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Checks every declared constraint on `entity`.
///
/// Returns an empty list when the entity is valid. Violations are sorted by
/// field so the encoded body is stable.
pub fn validate<E: Validate>(entity: &E) -> Vec<Violation> {
    let errors = match entity.validate() {
        Ok(()) => return Vec::new(),
        Err(errors) => errors,
    };

    let mut violations: Vec<Violation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            let field = to_camel_case(&field.to_string());
            field_errors
                .iter()
                .map(move |error| Violation::new(field.clone(), describe(error)))
        })
        .collect();

    violations.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    violations
}

fn describe(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    if error.code != "length" {
        return format!("This value is not valid ({}).", error.code);
    }

    let min = error.params.get("min").and_then(|v| v.as_u64());
    let max = error.params.get("max").and_then(|v| v.as_u64());
    let length = error
        .params
        .get("value")
        .and_then(|v| v.as_str())
        .map(|v| v.chars().count() as u64);

    match (length, min, max) {
        (Some(0), _, _) => "This value should not be blank.".to_string(),
        (Some(len), Some(min), _) if len < min => {
            format!("This value is too short. It should have {min} characters or more.")
        }
        (Some(len), _, Some(max)) if len > max => {
            format!("This value is too long. It should have {max} characters or less.")
        }
        (_, Some(min), Some(max)) => {
            format!("This value should have between {min} and {max} characters.")
        }
        _ => "This value has an invalid length.".to_string(),
    }
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
