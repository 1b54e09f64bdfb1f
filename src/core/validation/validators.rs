//! Reusable field validators
//!
//! Each validator returns a closure taking the field name and the value. The
//! closure yields `Err(message)` on failure; the message names the field.

use regex::Regex;
use rust_decimal::Decimal;

/// Validator: string is not empty or whitespace only
pub fn not_empty() -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &str| {
        if value.trim().is_empty() {
            Err(format!("'{}' must not be empty.", field))
        } else {
            Ok(())
        }
    }
}

/// Validator: string matches a pattern
pub fn matches(
    pattern: &'static Regex,
) -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &str| {
        if pattern.is_match(value) {
            Ok(())
        } else {
            Err(format!("'{}' is not in the correct format.", field))
        }
    }
}

/// Validator: character count must be within range
pub fn char_length(
    min: usize,
    max: usize,
) -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &str| {
        let len = value.chars().count();
        if len < min || len > max {
            Err(format!(
                "'{}' must be between {} and {} characters (actual: {})",
                field, min, max, len
            ))
        } else {
            Ok(())
        }
    }
}

/// Validator: character count must not exceed maximum
pub fn max_chars(max: usize) -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &str| {
        let len = value.chars().count();
        if len > max {
            Err(format!(
                "'{}' must not exceed {} characters (actual: {})",
                field, max, len
            ))
        } else {
            Ok(())
        }
    }
}

/// Validator: decimal must not be zero, the value an absent number decodes to
pub fn non_zero() -> impl Fn(&str, &Decimal) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Decimal| {
        if value.is_zero() {
            Err(format!("'{}' must not be empty.", field))
        } else {
            Ok(())
        }
    }
}

/// Validator: decimal must be strictly positive
pub fn positive() -> impl Fn(&str, &Decimal) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Decimal| {
        if value.is_sign_positive() && !value.is_zero() {
            Ok(())
        } else {
            Err(format!("'{}' must be greater than 0 (value: {})", field, value))
        }
    }
}

/// Validator: decimal fits `precision` total digits with at most `scale` after the point
///
/// Trailing fractional zeros are not significant: `10.500` has scale 1.
pub fn scale_precision(
    scale: u32,
    precision: u32,
) -> impl Fn(&str, &Decimal) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Decimal| {
        let normalized = value.normalize();
        let actual_scale = normalized.scale();
        let integer_digits = integer_digits(&normalized);
        let max_integer_digits = precision.saturating_sub(scale);

        if actual_scale > scale || integer_digits > max_integer_digits {
            Err(format!(
                "'{}' must not be more than {} digits in total, with allowance for {} decimals ({} digits and {} decimals were found)",
                field, precision, scale, integer_digits, actual_scale
            ))
        } else {
            Ok(())
        }
    }
}

fn integer_digits(value: &Decimal) -> u32 {
    let integer = value.trunc().abs();
    if integer.is_zero() {
        0
    } else {
        integer.to_string().len() as u32
    }
}
