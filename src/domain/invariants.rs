// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Functions - Input Invariants
//!
//! Field rules applied to user-supplied values before any create/update call
//! reaches the record store. All functions are pure and return the first
//! violated rule.
//!
//! # Rules
//!
//! | Field | Rule |
//! |---|---|
//! | name / customer name | at least 2 characters |
//! | phone | at least 10 characters |
//! | address | at least 5 characters |
//! | price | greater than zero |
//! | stock | zero or more |
//! | amount | greater than zero |
//! | status | one of the four order statuses |
//! | item quantity | at least 1 |

use rust_decimal::Decimal;

use super::order::{OrderItem, OrderStatus};

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_PHONE_CHARS: usize = 10;
pub const MIN_ADDRESS_CHARS: usize = 5;

/// Validation result with detailed error information
pub type ValidationResult = Result<(), ValidationError>;

/// Validation error with context
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Text field shorter than its minimum
    #[error("{field} must be at least {min} characters, got {actual}")]
    TooShort {
        field: &'static str,
        min: usize,
        actual: usize,
    },

    /// Numeric field must be strictly positive
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    /// Numeric field must not be negative
    #[error("{field} cannot be negative")]
    Negative { field: &'static str },

    /// Status outside the enumerated set
    #[error("Unknown order status: {0}")]
    UnknownStatus(String),

    /// Order line with a zero quantity
    #[error("Quantity for product {product_id} must be at least 1")]
    ZeroQuantity { product_id: String },

    /// Field that may only be set at creation
    #[error("{field} cannot be changed after creation")]
    Immutable { field: &'static str },

    /// Update carrying no fields
    #[error("Update for {0} contains no fields")]
    EmptyUpdate(&'static str),
}

fn validate_min_chars(field: &'static str, value: &str, min: usize) -> ValidationResult {
    let actual = value.trim().chars().count();
    if actual < min {
        return Err(ValidationError::TooShort { field, min, actual });
    }
    Ok(())
}

/// Customer, product and order-customer names
pub fn validate_name(field: &'static str, name: &str) -> ValidationResult {
    validate_min_chars(field, name, MIN_NAME_CHARS)
}

pub fn validate_phone(phone: &str) -> ValidationResult {
    validate_min_chars("phone", phone, MIN_PHONE_CHARS)
}

pub fn validate_address(address: &str) -> ValidationResult {
    validate_min_chars("address", address, MIN_ADDRESS_CHARS)
}

pub fn validate_price(price: Decimal) -> ValidationResult {
    if price <= Decimal::ZERO {
        return Err(ValidationError::NotPositive { field: "price" });
    }
    Ok(())
}

pub fn validate_stock(stock: i64) -> ValidationResult {
    if stock < 0 {
        return Err(ValidationError::Negative { field: "stock" });
    }
    Ok(())
}

pub fn validate_amount(amount: Decimal) -> ValidationResult {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NotPositive { field: "amount" });
    }
    Ok(())
}

/// Parse a free-form status into the enumerated set
pub fn validate_status(status: &str) -> Result<OrderStatus, ValidationError> {
    status.parse()
}

/// Every order line must carry a positive quantity
pub fn validate_items(items: &[OrderItem]) -> ValidationResult {
    match items.iter().find(|item| item.quantity == 0) {
        Some(item) => Err(ValidationError::ZeroQuantity {
            product_id: item.product_id.to_string(),
        }),
        None => Ok(()),
    }
}
