//! Live aggregation engine for a storefront administration dashboard
//!
//! Turns whole-collection snapshots of orders, customers and products into
//! a [`DashboardView`]: period-over-period revenue, order and customer
//! metrics, a daily sales series, customer growth, low-stock alerts, recent
//! orders and best sellers.
//!
//! - [`engine`]: the pure aggregation function
//! - [`snapshot`]: decoding raw documents, including backend timestamps
//! - [`store`]: the record store boundary, an in-memory backend and
//!   validated catalog commands
//! - [`live`]: the reactive pipeline that recomputes on every change

pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod live;
pub mod snapshot;
pub mod store;
pub mod telemetry;

// Re-export commonly used types
pub use config::DashboardConfig;
pub use domain::{
    Customer, DateRange, DocumentId, Order, OrderItem, OrderStatus, Product, RangePreset,
    LOW_STOCK_THRESHOLD,
};
pub use engine::{compute_dashboard, AggregationEngine, DashboardView, PercentChange};
pub use errors::{DashboardError, DashboardResult};
pub use live::{DashboardObserver, DashboardPipeline};
pub use snapshot::{BackendTimestamp, RawDocument, Snapshot};
pub use store::{CatalogService, Collection, InMemoryRecordStore, RecordStore, SnapshotQuery};
pub use telemetry::init_tracing;
