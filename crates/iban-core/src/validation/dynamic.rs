//! Validation entry point for loosely typed input.
//!
//! Inside Rust, [`validate`](super::validate) only accepts an [`Iban`], so
//! handing it something else is a compile error. Callers that receive
//! arbitrary JSON (scripting bridges, request payloads) go through
//! [`validate_value`], which turns the type mismatch into an
//! [`UnexpectedTypeError`] instead of a violation.

use serde_json::Value;

use crate::iban::Iban;
use crate::registry::CountryRegistry;

use super::{ValidationConfig, ValidationResult, Validator, validate};

/// The value handed to the validator was not an IBAN string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected an IBAN string, got {found}")]
pub struct UnexpectedTypeError {
    /// JSON type name of the rejected value.
    pub found: &'static str,
}

/// Returns the JSON type name of `value`.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Interprets `value` as an IBAN.
///
/// # Errors
///
/// Returns [`UnexpectedTypeError`] unless `value` is a JSON string.
pub fn iban_from_value(value: &Value) -> Result<Iban, UnexpectedTypeError> {
    value
        .as_str()
        .map(Iban::new)
        .ok_or_else(|| UnexpectedTypeError {
            found: type_name(value),
        })
}

/// Validates a JSON value that is expected to hold an IBAN string.
///
/// # Errors
///
/// Returns [`UnexpectedTypeError`] unless `value` is a JSON string. Content
/// problems of a string value are reported as violations in the result.
///
/// ```
/// use iban_core::{ValidationConfig, registry, validate_value};
/// use serde_json::json;
///
/// let cfg = ValidationConfig::default();
/// let ok = validate_value(&json!("GB29 NWBK 6016 1331 9268 19"), registry::builtin(), &cfg)?;
/// assert!(ok.is_valid());
/// assert!(validate_value(&json!(42), registry::builtin(), &cfg).is_err());
/// # Ok::<(), iban_core::UnexpectedTypeError>(())
/// ```
pub fn validate_value(
    value: &Value,
    registry: &CountryRegistry,
    config: &ValidationConfig,
) -> Result<ValidationResult, UnexpectedTypeError> {
    let iban = iban_from_value(value)?;
    Ok(validate(&iban, registry, config))
}

impl Validator<'_> {
    /// Validates a JSON value, replacing the stored violations.
    ///
    /// # Errors
    ///
    /// Returns [`UnexpectedTypeError`] unless `value` is a JSON string; the
    /// stored violations are left untouched in that case.
    pub fn validate_value(&mut self, value: &Value) -> Result<bool, UnexpectedTypeError> {
        let iban = iban_from_value(value)?;
        Ok(self.validate(&iban))
    }
}
