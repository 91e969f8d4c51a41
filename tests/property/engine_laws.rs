// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Aggregation Engine
//!
//! Strategies generate orders, customers and products spread over 2023 and
//! 2024 with cent-precision amounts, then check laws that must hold for any
//! such snapshot.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use storefront_dashboard::engine::percent_change;
use storefront_dashboard::{
    compute_dashboard, Customer, DateRange, DocumentId, Order, OrderItem, OrderStatus,
    PercentChange, Product, LOW_STOCK_THRESHOLD,
};

// ============================================================================
// Property Test Strategies
// ============================================================================

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
}

/// Any instant in 2023-2024, second precision
fn instant() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..2 * 366 * 86_400).prop_map(|offset| epoch() + Duration::seconds(offset))
}

fn product_id() -> impl Strategy<Value = DocumentId> {
    (0u8..8).prop_map(|n| DocumentId::new(format!("prod-{n}")))
}

fn order_item() -> impl Strategy<Value = OrderItem> {
    (product_id(), 1u32..20).prop_map(|(product_id, quantity)| OrderItem { product_id, quantity })
}

fn order() -> impl Strategy<Value = Order> {
    (
        0u32..10_000,
        instant(),
        1i64..1_000_000,
        prop::collection::vec(order_item(), 0..4),
    )
        .prop_map(|(n, created_at, cents, items)| Order {
            id: DocumentId::new(format!("ord-{n}")),
            customer_name: "Rana".to_string(),
            status: OrderStatus::Pending,
            amount: Decimal::new(cents, 2),
            created_at,
            items,
        })
}

fn customer() -> impl Strategy<Value = Customer> {
    (0u32..10_000, instant()).prop_map(|(n, joined_at)| Customer {
        id: DocumentId::new(format!("cus-{n}")),
        name: "Omar".to_string(),
        phone: "0791234567".to_string(),
        address: "Amman".to_string(),
        joined_at,
    })
}

fn product() -> impl Strategy<Value = Product> {
    (0u8..8, -5i64..200).prop_map(|(n, stock)| Product {
        id: DocumentId::new(format!("prod-{n}")),
        name: format!("Product {n}"),
        price: Decimal::new(199, 2),
        stock,
    })
}

fn range() -> impl Strategy<Value = DateRange> {
    (instant(), 0i64..120 * 86_400).prop_map(|(from, length)| {
        DateRange::new(from, from + Duration::seconds(length)).expect("from <= to by construction")
    })
}

fn snapshot() -> impl Strategy<Value = (Vec<Order>, Vec<Customer>, Vec<Product>)> {
    (
        prop::collection::vec(order(), 0..40),
        prop::collection::vec(customer(), 0..20),
        prop::collection::vec(product(), 0..10),
    )
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: The sales series conserves revenue
    ///
    /// Every order counted in revenue lands in exactly one day bucket.
    #[test]
    fn prop_sales_series_sums_to_revenue((orders, customers, products) in snapshot(), range in range()) {
        let view = compute_dashboard(&orders, &customers, &products, Some(range));

        prop_assert_eq!(view.sales_series_total(), view.revenue.value);
    }

    /// Property: Sales series days are strictly ascending
    #[test]
    fn prop_sales_series_ascending((orders, customers, products) in snapshot(), range in range()) {
        let view = compute_dashboard(&orders, &customers, &products, Some(range));

        prop_assert!(view.sales_series.windows(2).all(|w| w[0].day < w[1].day));
    }

    /// Property: Low stock counts every product under the threshold,
    /// whatever the range
    #[test]
    fn prop_low_stock_independent_of_range((orders, customers, products) in snapshot(), range in range()) {
        let expected = products.iter().filter(|p| p.stock < LOW_STOCK_THRESHOLD).count();

        let with_range = compute_dashboard(&orders, &customers, &products, Some(range));
        let without_range = compute_dashboard(&orders, &customers, &products, None);

        prop_assert_eq!(with_range.low_stock.value, expected);
        prop_assert_eq!(with_range.low_stock, without_range.low_stock);
    }

    /// Property: The engine is a pure function
    #[test]
    fn prop_compute_is_deterministic((orders, customers, products) in snapshot(), range in range()) {
        let first = compute_dashboard(&orders, &customers, &products, Some(range));
        let second = compute_dashboard(&orders, &customers, &products, Some(range));

        prop_assert_eq!(first, second);
    }

    /// Property: The previous period has the same length and ends
    /// `duration_in_days + 1` days earlier
    #[test]
    fn prop_previous_period_shape(range in range()) {
        let previous = range.previous_period();
        let shift = Duration::days(range.duration_in_days() + 1);

        prop_assert_eq!(previous.to() - previous.from(), range.to() - range.from());
        prop_assert_eq!(range.to() - previous.to(), shift);
        prop_assert!(previous.from() < range.from());
    }

    /// Property: Global lists respect their limits and best sellers are
    /// sorted by quantity
    #[test]
    fn prop_ranked_lists_bounded((orders, customers, products) in snapshot()) {
        let view = compute_dashboard(&orders, &customers, &products, None);

        prop_assert!(view.recent_orders.len() <= 5);
        prop_assert!(view.best_selling_products.len() <= 5);
        prop_assert!(view
            .best_selling_products
            .windows(2)
            .all(|w| w[0].quantity >= w[1].quantity));
        prop_assert!(view
            .recent_orders
            .windows(2)
            .all(|w| w[0].created_at >= w[1].created_at));
    }

    /// Property: Percent change has exactly one decimal place of precision
    /// and the sign of `current - previous`
    #[test]
    fn prop_percent_change_sign(current in 0i64..1_000_000, previous in 1i64..1_000_000) {
        let change = percent_change(Decimal::new(current, 2), Decimal::new(previous, 2));

        match change {
            PercentChange::Relative(value) => {
                prop_assert!(value.scale() <= 1);
                if current < previous {
                    prop_assert!(value <= Decimal::ZERO);
                } else {
                    prop_assert!(value >= Decimal::ZERO);
                }
            }
            other => prop_assert!(false, "non-zero baseline gave {:?}", other),
        }
    }

    /// Property: A zero baseline is never divided by
    #[test]
    fn prop_zero_baseline_sentinels(current in 0i64..1_000_000) {
        let change = percent_change(Decimal::new(current, 2), Decimal::ZERO);
        let expected = if current == 0 { PercentChange::Zero } else { PercentChange::Unbounded };

        prop_assert_eq!(change, expected);
    }
}
