// Copyright (c) 2025 - Cowboy AI, Inc.
//! Aggregation Engine
//!
//! A pure function from the current snapshots and a date range to a
//! [`DashboardView`]:
//!
//! ```text
//! (orders, customers, products, range) ──compute()──> DashboardView
//! ```
//!
//! # Properties
//!
//! - **Pure**: no I/O, no clock, no hidden state. Identical inputs produce
//!   identical views.
//! - **Total**: empty collections and an absent range yield zero-valued
//!   metrics and empty series, never an error.
//! - **Full recomputation**: nothing is patched incrementally; each call
//!   walks the snapshots from scratch.
//!
//! # What is period-scoped
//!
//! | Output | Scope |
//! |---|---|
//! | revenue, order count, new customers, sales series | selected range (compared with the previous period) |
//! | low stock, recent orders, best sellers, customer growth, lifetime totals | whole snapshot |
//!
//! # Example
//!
//! ```rust
//! use storefront_dashboard::engine::compute_dashboard;
//!
//! let view = compute_dashboard(&[], &[], &[], None);
//! assert_eq!(view.order_count.value, 0);
//! assert!(view.sales_series.is_empty());
//! ```

pub mod period;
pub mod ranking;
pub mod series;
pub mod view;

use chrono::FixedOffset;

use crate::config::DashboardConfig;
use crate::domain::{Customer, DateRange, Order, Product};

pub use period::{count_change, percent_change, saturating_total, PeriodSplit};
pub use view::{
    DashboardView, GrowthPoint, LifetimeTotals, LowStock, Metric, PercentChange, RankedProduct,
    SalesPoint, StockAlert,
};

/// Presentation knobs the engine needs; everything else is fixed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Offset used to assign instants to calendar days and months
    pub utc_offset: FixedOffset,
    pub recent_orders_limit: usize,
    pub best_sellers_limit: usize,
    /// Name shown for best sellers whose product no longer exists
    pub deleted_product_label: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from(&DashboardConfig::default())
    }
}

impl From<&DashboardConfig> for EngineSettings {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            utc_offset: config.utc_offset(),
            recent_orders_limit: config.recent_orders_limit,
            best_sellers_limit: config.best_sellers_limit,
            deleted_product_label: config.deleted_product_label.clone(),
        }
    }
}

/// Stateless calculator for the dashboard view
#[derive(Debug, Clone, Default)]
pub struct AggregationEngine {
    settings: EngineSettings,
}

impl AggregationEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Compute the full dashboard view
    ///
    /// # Arguments
    ///
    /// * `orders` - current order snapshot, any order
    /// * `customers` - current customer snapshot
    /// * `products` - current product snapshot
    /// * `range` - selected period; `None` leaves every period metric at zero
    pub fn compute(
        &self,
        orders: &[Order],
        customers: &[Customer],
        products: &[Product],
        range: Option<&DateRange>,
    ) -> DashboardView {
        let split = PeriodSplit::new(orders, customers, range);
        let offset = self.settings.utc_offset;

        let current_revenue = split.current_revenue();
        let revenue = Metric {
            value: current_revenue,
            change: percent_change(current_revenue, split.previous_revenue()),
        };
        let order_count = Metric {
            value: split.current_orders.len(),
            change: count_change(split.current_orders.len(), split.previous_orders.len()),
        };
        let new_customers = Metric {
            value: split.current_customers.len(),
            change: count_change(split.current_customers.len(), split.previous_customers.len()),
        };

        DashboardView {
            range: range.copied(),
            previous_range: range.map(DateRange::previous_period),
            revenue,
            order_count,
            new_customers,
            low_stock: ranking::low_stock(products),
            sales_series: series::daily_sales(split.current_orders.iter().copied(), offset),
            customer_growth: series::monthly_growth(customers, offset),
            recent_orders: ranking::recent_orders(orders, self.settings.recent_orders_limit),
            best_selling_products: ranking::best_sellers(
                orders,
                products,
                self.settings.best_sellers_limit,
                &self.settings.deleted_product_label,
            ),
            lifetime: LifetimeTotals {
                revenue: saturating_total(orders.iter().map(|o| o.amount)),
                orders: orders.len(),
                customers: customers.len(),
            },
        }
    }
}

/// Compute a dashboard view with default settings
pub fn compute_dashboard(
    orders: &[Order],
    customers: &[Customer],
    products: &[Product],
    range: Option<DateRange>,
) -> DashboardView {
    AggregationEngine::default().compute(orders, customers, products, range.as_ref())
}
