use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10}$").expect("phone pattern"));

static GSTIN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Z]{15}$").expect("gstin pattern"));

/// Raised when a wire string does not name any variant of an enum.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Field name -> first validation message for that field.
///
/// Ordered so error summaries and rendered lists are stable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field` unless the field already failed.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(value)` when nothing failed, otherwise the collected errors.
    pub fn finish<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self
            .errors
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&summary)
    }
}

impl std::error::Error for FieldErrors {}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value.trim())
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value.trim())
}

pub fn is_valid_gstin(value: &str) -> bool {
    GSTIN_PATTERN.is_match(value.trim())
}

/// Trimmed copy of `value`, or `None` when it is blank.
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trims `value`; records `message` against `field` when it is blank.
pub fn required(errors: &mut FieldErrors, field: &str, value: &str, message: &str) -> String {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        errors.add(field, message);
    }
    trimmed
}

/// Parses a required form input. Blank input records `missing`, unparsable
/// input records `invalid`.
pub fn required_parse<T: FromStr>(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    missing: &str,
    invalid: &str,
) -> Option<T> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, missing);
        return None;
    }
    match trimmed.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.add(field, invalid);
            None
        }
    }
}

/// Parses an optional form input; blank input is `None`.
pub fn optional_parse<T: FromStr>(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    invalid: &str,
) -> Option<T> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.add(field, invalid);
            None
        }
    }
}

pub const NOT_A_NUMBER: &str = "Enter a valid number";

/// Records [`NOT_A_NUMBER`] for NaN or infinite values and `negative` for
/// values below zero.
pub fn check_non_negative(errors: &mut FieldErrors, field: &str, value: f64, negative: &str) {
    if !value.is_finite() {
        errors.add(field, NOT_A_NUMBER);
    } else if value < 0.0 {
        errors.add(field, negative);
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("ops@example.com"));
        assert!(is_valid_email("  first.last@sub.example.in "));
        assert!(!is_valid_email("ops@example"));
        assert!(!is_valid_email("ops example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn phone_requires_ten_digits() {
        assert!(is_valid_phone("9876543210"));
        assert!(!is_valid_phone("+919876543210"));
        assert!(!is_valid_phone("98765"));
    }

    #[test]
    fn first_error_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.add("rate", "Rate is required");
        errors.add("rate", "Rate must be positive");
        errors.add("email", "Invalid email");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("rate"), Some("Rate is required"));
        assert_eq!(errors.to_string(), "Invalid email; Rate is required");
    }

    #[test]
    fn required_parse_distinguishes_missing_from_invalid() {
        let mut errors = FieldErrors::new();
        let missing: Option<f64> = required_parse(&mut errors, "a", "  ", "missing", "invalid");
        let invalid: Option<f64> = required_parse(&mut errors, "b", "abc", "missing", "invalid");
        let parsed: Option<f64> = required_parse(&mut errors, "c", " 12.5 ", "missing", "invalid");

        assert_eq!(missing, None);
        assert_eq!(invalid, None);
        assert_eq!(parsed, Some(12.5));
        assert_eq!(errors.get("a"), Some("missing"));
        assert_eq!(errors.get("b"), Some("invalid"));
        assert!(!errors.has("c"));
    }

    #[test]
    fn non_negative_check_rejects_nan_and_infinity() {
        let mut errors = FieldErrors::new();
        check_non_negative(&mut errors, "nan", f64::NAN, "negative");
        check_non_negative(&mut errors, "inf", f64::INFINITY, "negative");
        check_non_negative(&mut errors, "neg", -0.5, "negative");
        check_non_negative(&mut errors, "zero", 0.0, "negative");

        assert_eq!(errors.get("nan"), Some(NOT_A_NUMBER));
        assert_eq!(errors.get("inf"), Some(NOT_A_NUMBER));
        assert_eq!(errors.get("neg"), Some("negative"));
        assert!(!errors.has("zero"));
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(2.3456), 2.35);
        assert_eq!(round2(2.3412), 2.34);
        assert_eq!(round2(7.0), 7.0);
    }
}
