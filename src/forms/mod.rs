//! Form definitions backing the register and edit pages.

use std::collections::BTreeMap;

use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

pub mod equipment;
pub mod movements;
pub mod order_services;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid tipping number")]
    InvalidTippingNumber,

    #[error("invalid record id")]
    InvalidRecordId,

    #[error("invalid acquisition year")]
    InvalidYear,
}

impl FormError {
    /// Per-field messages for inline rendering; empty for non-field errors.
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        match self {
            FormError::Validation(errors) => field_errors(errors),
            _ => BTreeMap::new(),
        }
    }
}

/// First message of every failing field.
pub fn field_errors(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errors)| {
            let first = errors.first()?;
            let message = first
                .message
                .as_ref()
                .map(|message| message.to_string())
                .unwrap_or_else(|| first.code.to_string());
            Some((field.to_string(), message))
        })
        .collect()
}

pub(crate) fn required_error() -> ValidationError {
    ValidationError::new("required").with_message("Required field.".into())
}

/// Accepts empty input, leaving presence to `length(min = 1)`.
pub(crate) fn digits_only(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("digits").with_message("Only digits are allowed.".into()))
    }
}

/// Trimmed and HTML-sanitized free text.
pub(crate) fn clean_text(value: &str) -> String {
    ammonia::clean(value.trim()).trim().to_string()
}

pub(crate) fn optional_text(value: &str) -> Option<String> {
    let cleaned = clean_text(value);
    (!cleaned.is_empty()).then_some(cleaned)
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "Required field."), custom(function = "digits_only"))]
        number: String,
    }

    #[test]
    fn digits_only_accepts_empty_and_numeric() {
        assert!(digits_only("").is_ok());
        assert!(digits_only("001234").is_ok());
        assert!(digits_only("12a").is_err());
        assert!(digits_only(" 12").is_err());
    }

    #[test]
    fn field_errors_keep_the_message() {
        let errors = Probe {
            number: "x1".into(),
        }
        .validate()
        .unwrap_err();

        let map = field_errors(&errors);

        assert_eq!(map.get("number").map(String::as_str), Some("Only digits are allowed."));
    }

    #[test]
    fn optional_text_strips_markup_and_blanks() {
        assert_eq!(optional_text("   "), None);
        assert_eq!(
            optional_text(" <script>x</script>ok "),
            Some("ok".to_string())
        );
    }
}
