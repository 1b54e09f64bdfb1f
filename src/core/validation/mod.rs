//! Validation rules for products and product codes
//!
//! Rules run before the domain service touches the store. Every rule of every
//! field is evaluated and each failing rule contributes one violation, so an
//! empty code reports both the missing value and the bad format.

pub mod validators;

use crate::core::error::ValidationErrors;
use crate::core::product::Product;
use regex::Regex;
use std::sync::LazyLock;
use validators::{
    char_length, matches, max_chars, non_zero, not_empty, positive, scale_precision,
};

/// `NNNN-NNNN`: four ASCII digits, hyphen, four ASCII digits
static CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{4}$").expect("valid regex"));

pub const CODE_FORMAT_MESSAGE: &str =
    "Product code must follow the format 'XXXX-XXXX', where X is a digit from 0 to 9";
pub const NAME_LENGTH_MESSAGE: &str = "Product name must be between 3 and 100 characters long";
pub const DESCRIPTION_LENGTH_MESSAGE: &str = "Product description must not exceed 500 characters";
pub const PRICE_FORMAT_MESSAGE: &str =
    "Product price must be greater than 0 and can have up to 2 decimal places";

/// Collect every rule violation of a product payload
pub fn product_violations(product: &Product) -> ValidationErrors {
    let mut errors = code_violations("code", &product.code);

    if let Err(message) = not_empty()("name", &product.name) {
        errors.push("name", message);
    }
    if char_length(3, 100)("name", &product.name).is_err() {
        errors.push("name", NAME_LENGTH_MESSAGE);
    }

    if let Some(description) = &product.description {
        if max_chars(500)("description", description).is_err() {
            errors.push("description", DESCRIPTION_LENGTH_MESSAGE);
        }
    }

    // An absent price decodes to zero, which fails both of the first two rules
    if let Err(message) = non_zero()("price", &product.price) {
        errors.push("price", message);
    }
    if let Err(message) = positive()("price", &product.price) {
        errors.push("price", message);
    }
    if scale_precision(2, 18)("price", &product.price).is_err() {
        errors.push("price", PRICE_FORMAT_MESSAGE);
    }

    errors
}

/// Collect every rule violation of a standalone code
pub fn code_violations(field: &str, code: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if let Err(message) = not_empty()(field, code) {
        errors.push(field, message);
    }
    if matches(&CODE_PATTERN)(field, code).is_err() {
        errors.push(field, CODE_FORMAT_MESSAGE);
    }
    errors
}

/// Validate a create/update payload
pub fn validate_product(product: &Product) -> Result<(), ValidationErrors> {
    product_violations(product).into_result()
}

/// Validate a bare code as used by get and delete
pub fn validate_code(code: &str) -> Result<(), ValidationErrors> {
    code_violations("code", code).into_result()
}
