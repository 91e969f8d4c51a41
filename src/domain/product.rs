// Copyright (c) 2025 - Cowboy AI, Inc.
//! Product entity

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::document_id::DocumentId;

/// Products with fewer units than this are flagged as low stock
pub const LOW_STOCK_THRESHOLD: i64 = 50;

/// A catalogue product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: DocumentId,
    pub name: String,
    pub price: Decimal,
    /// Units on hand. Signed so that legacy records with negative counts
    /// still decode; they simply compare as low stock.
    pub stock: i64,
}

impl Product {
    /// Whether this product falls under the low-stock threshold
    pub fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn product(stock: i64) -> Product {
        Product {
            id: DocumentId::new("p"),
            name: "Olive oil".to_string(),
            price: Decimal::new(450, 2),
            stock,
        }
    }

    #[test_case(0, true)]
    #[test_case(49, true)]
    #[test_case(50, false)]
    #[test_case(500, false)]
    #[test_case(-3, true)]
    fn test_low_stock_threshold(stock: i64, expected: bool) {
        assert_eq!(product(stock).is_low_stock(), expected);
    }
}
