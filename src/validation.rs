use crate::models::{CreateItemRequest, ItemKind, NewItem};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("target must be a whole number, got {0:?}")]
    NonNumericTarget(String),
    #[error("target must be greater than zero")]
    NonPositiveTarget,
    #[error("value must be a number, got {0:?}")]
    NonNumericValue(String),
    #[error("value must be greater than zero")]
    NonPositiveValue,
}

pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

pub fn validate_target(target: i64) -> Result<u32, ValidationError> {
    if target <= 0 {
        return Err(ValidationError::NonPositiveTarget);
    }
    u32::try_from(target).map_err(|_| ValidationError::NonNumericTarget(target.to_string()))
}

pub fn parse_target(raw: &str) -> Result<u32, ValidationError> {
    let raw = raw.trim();
    let target = raw
        .parse::<i64>()
        .map_err(|_| ValidationError::NonNumericTarget(raw.to_string()))?;
    validate_target(target)
}

/// Accepts a JSON integer or a numeric string.
pub fn target_from_json(raw: &Value) -> Result<u32, ValidationError> {
    match raw {
        Value::Number(number) => match number.as_i64() {
            Some(target) => validate_target(target),
            None => Err(ValidationError::NonNumericTarget(number.to_string())),
        },
        Value::String(text) => parse_target(text),
        other => Err(ValidationError::NonNumericTarget(other.to_string())),
    }
}

pub fn validate_value(value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonNumericValue(value.to_string()));
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveValue);
    }
    Ok(value)
}

pub fn parse_value(raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    let value = raw
        .parse::<f64>()
        .map_err(|_| ValidationError::NonNumericValue(raw.to_string()))?;
    validate_value(value)
}

impl NewItem {
    /// Builds a creation request from raw form input.
    pub fn parse(name: &str, target: &str, kind: ItemKind) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validate_name(name)?,
            target: parse_target(target)?,
            kind,
            description: String::new(),
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into().trim().to_string();
        self
    }
}

impl TryFrom<CreateItemRequest> for NewItem {
    type Error = ValidationError;

    fn try_from(request: CreateItemRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: validate_name(&request.name)?,
            target: target_from_json(&request.target)?,
            kind: request.kind,
            description: request.description.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_or_blank_name_is_rejected() {
        assert_eq!(validate_name(""), Err(ValidationError::EmptyName));
        assert_eq!(validate_name("   "), Err(ValidationError::EmptyName));
        assert_eq!(validate_name("  Dishes "), Ok("Dishes".to_string()));
    }

    #[test]
    fn target_must_be_a_positive_integer() {
        assert_eq!(parse_target("7"), Ok(7));
        assert_eq!(parse_target("0"), Err(ValidationError::NonPositiveTarget));
        assert_eq!(parse_target("-3"), Err(ValidationError::NonPositiveTarget));
        assert!(matches!(
            parse_target("weekly"),
            Err(ValidationError::NonNumericTarget(_))
        ));
        assert!(matches!(
            parse_target("2.5"),
            Err(ValidationError::NonNumericTarget(_))
        ));
    }

    #[test]
    fn json_target_accepts_integers_and_numeric_strings_only() {
        assert_eq!(target_from_json(&json!(3)), Ok(3));
        assert_eq!(target_from_json(&json!(" 14 ")), Ok(14));
        assert_eq!(target_from_json(&json!(0)), Err(ValidationError::NonPositiveTarget));
        for raw in [json!("abc"), json!(2.5), json!(null), json!(true)] {
            assert!(matches!(
                target_from_json(&raw),
                Err(ValidationError::NonNumericTarget(_))
            ));
        }
    }

    #[test]
    fn value_must_be_finite_and_positive() {
        assert_eq!(parse_value("12.5"), Ok(12.5));
        assert_eq!(parse_value("0"), Err(ValidationError::NonPositiveValue));
        assert!(matches!(parse_value("abc"), Err(ValidationError::NonNumericValue(_))));
        assert!(matches!(parse_value("NaN"), Err(ValidationError::NonNumericValue(_))));
        assert!(matches!(parse_value("inf"), Err(ValidationError::NonNumericValue(_))));
    }

    #[test]
    fn request_conversion_trims_and_checks_fields() {
        let request = CreateItemRequest {
            name: " Vacuum ".into(),
            target: json!(7),
            kind: ItemKind::Task,
            description: " living room ".into(),
        };
        let new = NewItem::try_from(request).unwrap();
        assert_eq!(new.name, "Vacuum");
        assert_eq!(new.description, "living room");

        let bad = CreateItemRequest {
            name: "Vacuum".into(),
            target: json!(0),
            kind: ItemKind::Task,
            description: String::new(),
        };
        assert_eq!(NewItem::try_from(bad), Err(ValidationError::NonPositiveTarget));
    }
}
