// Copyright (c) 2025 - Cowboy AI, Inc.
//! Dashboard view types
//!
//! Everything the presentation layer renders. A view has no identity of its
//! own: it is rebuilt from scratch on every recomputation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{DateRange, DocumentId, Order};

/// Period-over-period change of a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "percent", rename_all = "camelCase")]
pub enum PercentChange {
    /// Both periods are zero
    Zero,
    /// Previous period is zero, current is not: no baseline to divide by
    Unbounded,
    /// `(current - previous) / previous * 100`, one decimal place
    Relative(Decimal),
}

impl PercentChange {
    /// Numeric percentage, if one exists
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            PercentChange::Zero => Some(Decimal::ZERO),
            PercentChange::Unbounded => None,
            PercentChange::Relative(value) => Some(*value),
        }
    }
}

impl fmt::Display for PercentChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PercentChange::Zero => f.write_str("0%"),
            PercentChange::Unbounded => f.write_str("∞%"),
            PercentChange::Relative(value) if value.is_sign_negative() => {
                write!(f, "{value:.1}%")
            }
            PercentChange::Relative(value) => write!(f, "+{value:.1}%"),
        }
    }
}

/// A headline number with its change against the previous period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric<T> {
    pub value: T,
    pub change: PercentChange,
}

/// Product under the low-stock threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAlert {
    pub product_id: DocumentId,
    pub name: String,
    pub stock: i64,
}

/// Low-stock count over the full product set, never date filtered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStock {
    pub value: usize,
    pub items: Vec<StockAlert>,
}

/// Revenue for one calendar day that had at least one order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesPoint {
    pub day: NaiveDate,
    pub total: Decimal,
}

/// Customers who joined in one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub year: i32,
    pub month: u32,
    pub customers: usize,
}

/// Product ranked by units sold
///
/// `resolved` is false when the product id no longer exists in the current
/// product snapshot; `name` then carries the fallback label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedProduct {
    pub product_id: DocumentId,
    pub name: String,
    pub quantity: u64,
    pub resolved: bool,
}

/// Totals over the whole snapshot, ignoring the date range
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifetimeTotals {
    pub revenue: Decimal,
    pub orders: usize,
    pub customers: usize,
}

/// Complete output of one aggregation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Range the period metrics were computed for
    pub range: Option<DateRange>,
    /// Comparison range, present whenever `range` is
    pub previous_range: Option<DateRange>,
    pub revenue: Metric<Decimal>,
    pub order_count: Metric<usize>,
    pub new_customers: Metric<usize>,
    pub low_stock: LowStock,
    /// Ascending by day, days without orders omitted
    pub sales_series: Vec<SalesPoint>,
    /// Ascending by month over all customers
    pub customer_growth: Vec<GrowthPoint>,
    /// Newest first, over all orders
    pub recent_orders: Vec<Order>,
    pub best_selling_products: Vec<RankedProduct>,
    pub lifetime: LifetimeTotals,
}

impl DashboardView {
    /// Total of the sales series; equals `revenue.value` by construction
    pub fn sales_series_total(&self) -> Decimal {
        super::period::saturating_total(self.sales_series.iter().map(|point| point.total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(PercentChange::Zero, "0%")]
    #[test_case(PercentChange::Unbounded, "∞%")]
    #[test_case(PercentChange::Relative(Decimal::new(100, 0)), "+100.0%")]
    #[test_case(PercentChange::Relative(Decimal::new(125, 1)), "+12.5%")]
    #[test_case(PercentChange::Relative(Decimal::new(-30, 1)), "-3.0%")]
    #[test_case(PercentChange::Relative(Decimal::ZERO), "+0.0%")]
    fn test_change_label(change: PercentChange, expected: &str) {
        assert_eq!(change.to_string(), expected);
    }

    #[test]
    fn test_change_serializes_tagged() {
        let json = serde_json::to_value(PercentChange::Unbounded).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "unbounded" }));

        let json = serde_json::to_value(PercentChange::Relative(Decimal::new(505, 1))).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "relative", "percent": "50.5" }));
    }
}
