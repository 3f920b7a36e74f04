//! Field validation and input normalization shared by the request types.
//!
//! Declarative constraints live on the request structs as `validator` attributes. The helpers
//! here cover what those attributes cannot express directly: fields wrapped in [`Patch`],
//! fixed-point prices, and whitespace trimming before validation.

use std::borrow::Cow;

use rust_decimal::Decimal;
use validator::{ValidateEmail, ValidationError};

use crate::store::Patch;

/// Maximum number of fractional digits accepted for a price.
pub const PRICE_DECIMAL_PLACES: u32 = 2;

/// Trim surrounding whitespace from every string field of a request before it is validated.
pub trait Normalize {
    /// Return the value with its string fields trimmed.
    fn normalize(self) -> Self;
}

/// Trim a string in place, reusing the allocation when nothing changes.
pub(crate) fn trim(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}

pub(crate) fn trim_opt(value: Option<String>) -> Option<String> {
    value.map(trim)
}

pub(crate) fn trim_all(values: Vec<String>) -> Vec<String> {
    values.into_iter().map(trim).collect()
}

fn error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

fn check_length(value: &str, min: usize, max: usize) -> Result<(), ValidationError> {
    let count = value.chars().count();
    if count < min || count > max {
        return Err(error(
            "length",
            format!("length must be between {min} and {max} characters"),
        ));
    }
    Ok(())
}

fn check_email(value: &str) -> Result<(), ValidationError> {
    if value.validate_email() {
        Ok(())
    } else {
        Err(error("email", "value is not a valid email address"))
    }
}

/// Reject negative prices and prices with more than two decimal places.
pub fn price(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(error("range", "price must be greater than or equal to 0"));
    }
    if value.normalize().scale() > PRICE_DECIMAL_PLACES {
        return Err(error(
            "decimal_places",
            format!("price must have at most {PRICE_DECIMAL_PLACES} decimal places"),
        ));
    }
    Ok(())
}

/// Reject negative price bounds in list filters.
pub fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(error("range", "value must be greater than or equal to 0"));
    }
    Ok(())
}

pub(crate) fn email_patch(value: &Patch<String>) -> Result<(), ValidationError> {
    value.as_present().map_or(Ok(()), |email| check_email(email))
}

pub(crate) fn username_patch(value: &Patch<String>) -> Result<(), ValidationError> {
    value
        .as_present()
        .map_or(Ok(()), |username| check_length(username, 3, 50))
}

pub(crate) fn full_name_patch(value: &Patch<Option<String>>) -> Result<(), ValidationError> {
    match value.as_present() {
        Some(Some(name)) => check_length(name, 0, 100),
        _ => Ok(()),
    }
}

pub(crate) fn password_patch(value: &Patch<String>) -> Result<(), ValidationError> {
    value
        .as_present()
        .map_or(Ok(()), |password| check_length(password, 8, 128))
}

pub(crate) fn item_name_patch(value: &Patch<String>) -> Result<(), ValidationError> {
    value
        .as_present()
        .map_or(Ok(()), |name| check_length(name, 1, 200))
}

pub(crate) fn description_patch(value: &Patch<Option<String>>) -> Result<(), ValidationError> {
    match value.as_present() {
        Some(Some(description)) => check_length(description, 0, 2000),
        _ => Ok(()),
    }
}

pub(crate) fn price_patch(value: &Patch<Decimal>) -> Result<(), ValidationError> {
    value.as_present().map_or(Ok(()), price)
}

pub(crate) fn tags_patch(value: &Patch<Vec<String>>) -> Result<(), ValidationError> {
    match value.as_present() {
        Some(tags) if tags.len() > 10 => Err(error("length", "at most 10 tags are allowed")),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn decimal(value: &str) -> Decimal {
        Decimal::from_str(value).expect("decimal literal")
    }

    #[test]
    fn price_accepts_two_places_and_trailing_zeros() {
        assert!(price(&decimal("9.99")).is_ok());
        assert!(price(&decimal("0")).is_ok());
        assert!(price(&decimal("12.500")).is_ok());
    }

    #[test]
    fn price_rejects_negative_and_extra_precision() {
        assert_eq!(price(&decimal("-1")).unwrap_err().code, "range");
        assert_eq!(price(&decimal("1.999")).unwrap_err().code, "decimal_places");
    }

    #[test]
    fn patch_validators_ignore_absent_fields() {
        assert!(email_patch(&Patch::Absent).is_ok());
        assert!(username_patch(&Patch::Absent).is_ok());
        assert!(full_name_patch(&Patch::Present(None)).is_ok());
    }

    #[test]
    fn patch_validators_check_present_values() {
        assert!(email_patch(&Patch::Present("not-an-email".into())).is_err());
        assert!(email_patch(&Patch::Present("a@x.com".into())).is_ok());
        assert!(username_patch(&Patch::Present("ab".into())).is_err());
        assert!(password_patch(&Patch::Present("short".into())).is_err());
        assert!(item_name_patch(&Patch::Present(String::new())).is_err());
        assert!(tags_patch(&Patch::Present(vec!["t".to_string(); 11])).is_err());
    }

    #[test]
    fn trim_strips_surrounding_whitespace() {
        assert_eq!(trim("  padded ".into()), "padded");
        assert_eq!(trim_opt(Some(" x ".into())), Some("x".into()));
        assert_eq!(trim_all(vec![" a".into(), "b ".into()]), vec!["a", "b"]);
    }
}
