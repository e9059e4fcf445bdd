//! Input validation.
//!
//! Turns the raw strings a user typed into typed `Values`, checking each
//! field of a `FieldSpec` in declared order. The first failing field ends
//! the submission; there is no partial result.

use thiserror::Error;

use crate::types::{Field, FieldKind, RawInput, Value, Values};

/// Why a submission was rejected. Each variant names the field's label.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be a valid number.")]
    NotANumber { field: String },

    #[error("{field} must be between {min} and {max}.")]
    OutOfRange { field: String, min: f64, max: f64 },

    #[error("{field} must be greater than zero.")]
    NonPositive { field: String },

    #[error("{field} cannot be negative.")]
    NonNegativeRequired { field: String },

    #[error("{field} must be a multiple of {step}.")]
    NotMultiple { field: String, step: i64 },

    #[error("{field} is required.")]
    Empty { field: String },

    #[error("{field} must be one of: {options}.")]
    UnknownChoice { field: String, options: String },

    #[error("{field} was not provided.")]
    Missing { field: String },
}

/// Validate every field of `spec` against `raw`.
pub fn validate(spec: &[Field], raw: &RawInput) -> Result<Values, ValidationError> {
    let mut values = Values::default();
    for field in spec {
        let text = raw.get(field.name).unwrap_or("");
        values.push(field.name, validate_field(field, text)?);
    }
    Ok(values)
}

/// Validate a single raw value against its field declaration.
pub fn validate_field(field: &Field, raw: &str) -> Result<Value, ValidationError> {
    match field.kind {
        FieldKind::Decimal => {
            let n = parse_decimal(field, raw)?;
            check_bounds(field, n)?;
            Ok(Value::Decimal(n))
        }
        FieldKind::Integer => {
            let n = parse_integer(field, raw)?;
            check_bounds(field, n as f64)?;
            if let Some(step) = field.multiple_of {
                if step != 0 && n % step != 0 {
                    return Err(ValidationError::NotMultiple {
                        field: field.label.to_string(),
                        step,
                    });
                }
            }
            Ok(Value::Integer(n))
        }
        FieldKind::Numeric => {
            let text = raw.trim();
            let n = parse_decimal(field, text)?;
            check_bounds(field, n)?;
            Ok(Value::Text(text.to_string()))
        }
        FieldKind::Text | FieldKind::Secret => {
            if raw.trim().is_empty() {
                return Err(empty(field));
            }
            Ok(Value::Text(raw.to_string()))
        }
        FieldKind::Choice(options) => {
            let text = raw.trim();
            if text.is_empty() {
                return Err(empty(field));
            }
            options
                .iter()
                .find(|option| option.eq_ignore_ascii_case(text))
                .map(|option| Value::Text(option.to_string()))
                .ok_or_else(|| ValidationError::UnknownChoice {
                    field: field.label.to_string(),
                    options: options.join(", "),
                })
        }
    }
}

fn empty(field: &Field) -> ValidationError {
    ValidationError::Empty {
        field: field.label.to_string(),
    }
}

fn not_a_number(field: &Field) -> ValidationError {
    ValidationError::NotANumber {
        field: field.label.to_string(),
    }
}

fn parse_decimal(field: &Field, raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| not_a_number(field))
}

/// Whole numbers only; "40.0" is accepted, "40.5" is not.
fn parse_integer(field: &Field, raw: &str) -> Result<i64, ValidationError> {
    let text = raw.trim();
    if let Ok(n) = text.parse::<i64>() {
        return Ok(n);
    }
    let n = parse_decimal(field, text)?;
    if n.fract() != 0.0 || n < i64::MIN as f64 || n > i64::MAX as f64 {
        return Err(not_a_number(field));
    }
    Ok(n as i64)
}

fn check_bounds(field: &Field, n: f64) -> Result<(), ValidationError> {
    if field.positive && n <= 0.0 {
        return Err(ValidationError::NonPositive {
            field: field.label.to_string(),
        });
    }
    if field.non_negative && n < 0.0 {
        return Err(ValidationError::NonNegativeRequired {
            field: field.label.to_string(),
        });
    }
    if let Some((min, max)) = field.range {
        if n < min || n > max {
            return Err(ValidationError::OutOfRange {
                field: field.label.to_string(),
                min,
                max,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldSpec;

    const WEIGHT: Field = Field::decimal("weight", "Weight (kg)").positive();
    const AMOUNT: Field = Field::integer("amount", "Amount").positive().multiple_of(100);
    const MARK: Field = Field::decimal("mark", "Mark").range(0.0, 100.0);
    const DAYS: Field = Field::integer("days", "Days").non_negative();

    #[test]
    fn test_decimal_parsing() {
        assert_eq!(validate_field(&WEIGHT, " 72.5 ").unwrap(), Value::Decimal(72.5));
        assert_eq!(
            validate_field(&WEIGHT, "heavy"),
            Err(ValidationError::NotANumber {
                field: "Weight (kg)".into()
            })
        );
        assert!(matches!(
            validate_field(&WEIGHT, ""),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(matches!(
            validate_field(&WEIGHT, "inf"),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(matches!(
            validate_field(&WEIGHT, "0"),
            Err(ValidationError::NonPositive { .. })
        ));
        assert!(matches!(
            validate_field(&WEIGHT, "-3"),
            Err(ValidationError::NonPositive { .. })
        ));
    }

    #[test]
    fn test_integer_parsing() {
        assert_eq!(validate_field(&AMOUNT, "700").unwrap(), Value::Integer(700));
        assert_eq!(validate_field(&AMOUNT, "700.0").unwrap(), Value::Integer(700));
        assert!(matches!(
            validate_field(&AMOUNT, "700.5"),
            Err(ValidationError::NotANumber { .. })
        ));
        assert_eq!(
            validate_field(&AMOUNT, "150"),
            Err(ValidationError::NotMultiple {
                field: "Amount".into(),
                step: 100
            })
        );
        assert!(matches!(
            validate_field(&AMOUNT, "-100"),
            Err(ValidationError::NonPositive { .. })
        ));
        assert!(matches!(
            validate_field(&DAYS, "-1"),
            Err(ValidationError::NonNegativeRequired { .. })
        ));
        assert_eq!(validate_field(&DAYS, "0").unwrap(), Value::Integer(0));
    }

    #[test]
    fn test_range_is_inclusive() {
        assert!(validate_field(&MARK, "0").is_ok());
        assert!(validate_field(&MARK, "100").is_ok());
        assert_eq!(
            validate_field(&MARK, "100.5"),
            Err(ValidationError::OutOfRange {
                field: "Mark".into(),
                min: 0.0,
                max: 100.0
            })
        );
    }

    #[test]
    fn test_text_secret_and_choice() {
        let user = Field::text("username", "Username");
        let pass = Field::secret("password", "Password");
        let pick = Field::choice("choice", "Your move", &["rock", "paper", "scissors"]);

        assert_eq!(
            validate_field(&user, "  admin ").unwrap(),
            Value::Text("  admin ".into())
        );
        assert!(matches!(
            validate_field(&user, "   "),
            Err(ValidationError::Empty { .. })
        ));
        assert_eq!(
            validate_field(&pass, " pw ").unwrap(),
            Value::Text(" pw ".into())
        );
        assert_eq!(
            validate_field(&pick, "Rock").unwrap(),
            Value::Text("rock".into())
        );
        let err = validate_field(&pick, "lizard").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Your move must be one of: rock, paper, scissors."
        );
    }

    #[test]
    fn test_numeric_keeps_text() {
        let number = Field::numeric("number", "Number");
        assert_eq!(
            validate_field(&number, "12300").unwrap(),
            Value::Text("12300".into())
        );
        assert!(validate_field(&number, "12a").is_err());
    }

    #[test]
    fn test_first_failing_field_wins() {
        const SPEC: FieldSpec = &[
            Field::decimal("weight", "Weight (kg)").positive(),
            Field::decimal("height", "Height (m)").positive(),
        ];
        let raw = RawInput::new().with("weight", "x").with("height", "0");
        assert!(matches!(
            validate(SPEC, &raw),
            Err(ValidationError::NotANumber { field }) if field == "Weight (kg)"
        ));

        let raw = RawInput::new().with("weight", "70");
        assert!(matches!(
            validate(SPEC, &raw),
            Err(ValidationError::NotANumber { field }) if field == "Height (m)"
        ));

        let raw = RawInput::new().with("weight", "70").with("height", "1.75");
        let values = validate(SPEC, &raw).unwrap();
        assert_eq!(values.decimal("weight").unwrap(), 70.0);
        assert_eq!(values.decimal("height").unwrap(), 1.75);
    }
}
