// Copyright (c) 2025 - Cowboy AI, Inc.
//! Record Store Abstraction
//!
//! The dashboard reads and writes three document collections through the
//! [`RecordStore`] trait. The store is a black box that pushes a complete
//! [`Snapshot`] of a collection whenever any document in it changes, and
//! accepts create/update/delete calls.
//!
//! # Architecture
//!
//! ```text
//! CatalogService ──create/update/delete──> RecordStore
//!                                              │
//!                                    subscribe(collection, query)
//!                                              │
//!                                     Subscription (Snapshot stream)
//!                                              ↓
//!                                      DashboardPipeline
//! ```
//!
//! # Store Requirements
//!
//! 1. **Whole snapshots**: every emission carries the full filtered and
//!    sorted collection, never a delta
//! 2. **Initial emission**: a new subscription receives the current state
//!    without waiting for a change
//! 3. **Cancellable**: cancelling a [`Subscription`] stops further delivery
//!    and may be repeated safely
//! 4. **Independent collections**: no ordering is promised between
//!    snapshots of different collections

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::domain::DocumentId;
use crate::errors::{DashboardError, DashboardResult};
use crate::snapshot::{BackendTimestamp, RawDocument, Snapshot};

pub mod catalog;
pub mod memory;

pub use catalog::{
    CatalogService, CreateCustomer, CreateOrder, CreateProduct, CustomerChanges, ProductChanges,
};
pub use memory::InMemoryRecordStore;

/// The three collections the dashboard consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Orders,
    Customers,
    Products,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Orders, Collection::Customers, Collection::Products];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Orders => "orders",
            Collection::Customers => "customers",
            Collection::Products => "products",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| DashboardError::Configuration(format!("unknown collection: {s}")))
    }
}

/// Comparison used by a [`FieldFilter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Keep only documents whose `field` compares to `value` as `op` says
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFilter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl FieldFilter {
    pub fn new(field: impl Into<String>, op: FilterOp, value: Value) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }

    /// Whether a document passes; a missing or incomparable field never does
    pub fn matches(&self, doc: &RawDocument) -> bool {
        let Some(ordering) = doc
            .field(&self.field)
            .and_then(|actual| compare_values(actual, &self.value))
        else {
            return false;
        };

        match self.op {
            FilterOp::Eq => ordering == Ordering::Equal,
            FilterOp::Lt => ordering == Ordering::Less,
            FilterOp::Le => ordering != Ordering::Greater,
            FilterOp::Gt => ordering == Ordering::Greater,
            FilterOp::Ge => ordering != Ordering::Less,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub field: String,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Optional filter and sort applied by the store before emitting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotQuery {
    pub filter: Option<FieldFilter>,
    pub sort: Option<SortOrder>,
}

impl SnapshotQuery {
    /// Everything, in store order
    pub fn all() -> Self {
        Self::default()
    }

    /// The query the dashboard subscribes with for `collection`
    ///
    /// Orders newest first, customers most recently joined first, products
    /// by name.
    pub fn dashboard(collection: Collection) -> Self {
        let sort = match collection {
            Collection::Orders => SortOrder::desc("createdAt"),
            Collection::Customers => SortOrder::desc("joinedAt"),
            Collection::Products => SortOrder::asc("name"),
        };
        Self {
            filter: None,
            sort: Some(sort),
        }
    }

    pub fn with_filter(mut self, filter: FieldFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Filter then sort `documents`
    ///
    /// Sorting is stable. Documents missing the sort field go last in
    /// either direction. Values of different kinds order by kind: null,
    /// booleans, numbers, instants, text, then anything else.
    pub fn apply(&self, documents: &[RawDocument]) -> Vec<RawDocument> {
        let mut selected: Vec<RawDocument> = documents
            .iter()
            .filter(|doc| self.filter.as_ref().map_or(true, |f| f.matches(doc)))
            .cloned()
            .collect();

        if let Some(sort) = &self.sort {
            selected.sort_by(|a, b| {
                match (a.field(&sort.field), b.field(&sort.field)) {
                    (Some(x), Some(y)) => {
                        let ordering = SortKey::of(x).total_cmp(&SortKey::of(y));
                        match sort.direction {
                            SortDirection::Asc => ordering,
                            SortDirection::Desc => ordering.reverse(),
                        }
                    }
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            });
        }

        selected
    }
}

/// Comparable reading of a stored value
///
/// Backend timestamp objects and RFC 3339 strings both read as instants, so
/// a collection mixing the two encodings still sorts chronologically.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SortKey<'a> {
    Null,
    Bool(bool),
    Number(f64),
    Instant(BackendTimestamp),
    Text(&'a str),
    Other,
}

impl<'a> SortKey<'a> {
    fn of(value: &'a Value) -> Self {
        match value {
            Value::Null => SortKey::Null,
            Value::Bool(b) => SortKey::Bool(*b),
            Value::Number(n) => n.as_f64().map_or(SortKey::Other, SortKey::Number),
            Value::String(text) => match DateTime::parse_from_rfc3339(text) {
                Ok(instant) => SortKey::Instant(BackendTimestamp::from_datetime(
                    instant.with_timezone(&Utc),
                )),
                Err(_) => SortKey::Text(text),
            },
            Value::Object(_) => BackendTimestamp::from_value(value).map_or(SortKey::Other, SortKey::Instant),
            Value::Array(_) => SortKey::Other,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Null => 0,
            SortKey::Bool(_) => 1,
            SortKey::Number(_) => 2,
            SortKey::Instant(_) => 3,
            SortKey::Text(_) => 4,
            SortKey::Other => 5,
        }
    }

    /// Order within a kind, `None` across kinds
    fn partial(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (SortKey::Null, SortKey::Null) => Some(Ordering::Equal),
            (SortKey::Bool(x), SortKey::Bool(y)) => Some(x.cmp(y)),
            (SortKey::Number(x), SortKey::Number(y)) => Some(x.total_cmp(y)),
            (SortKey::Instant(x), SortKey::Instant(y)) => Some(x.cmp(y)),
            (SortKey::Text(x), SortKey::Text(y)) => Some(x.cmp(y)),
            _ => None,
        }
    }

    fn total_cmp(&self, other: &Self) -> Ordering {
        self.partial(other)
            .unwrap_or_else(|| self.rank().cmp(&other.rank()))
    }
}

/// Order two stored values of the same kind
///
/// Instants compare chronologically whether stored as backend timestamps or
/// RFC 3339 strings; numbers compare numerically, strings and booleans
/// naturally. Mixed kinds do not compare.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    SortKey::of(a).partial(&SortKey::of(b))
}

/// A [`Subscription`] adapted to a `Stream`
pub type SnapshotStream = UnboundedReceiverStream<DashboardResult<Snapshot>>;

/// Sending half of a [`Subscription`], held by the backend
#[derive(Debug, Clone)]
pub struct SnapshotSender {
    collection: Collection,
    tx: mpsc::UnboundedSender<DashboardResult<Snapshot>>,
}

impl SnapshotSender {
    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Deliver a snapshot; false once the subscriber has gone away
    pub fn send(&self, snapshot: Snapshot) -> bool {
        self.tx.send(Ok(snapshot)).is_ok()
    }

    /// Report a backend failure without ending the subscription
    pub fn fail(&self, error: DashboardError) -> bool {
        self.tx.send(Err(error)).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Stream of snapshots for one collection
///
/// Yields `Ok(snapshot)` on every change and `Err` for backend failures.
/// Ends when the backend drops its sender or after [`Subscription::cancel`].
#[derive(Debug)]
pub struct Subscription {
    collection: Collection,
    rx: mpsc::UnboundedReceiver<DashboardResult<Snapshot>>,
}

impl Subscription {
    /// Create a connected sender/subscription pair
    pub fn channel(collection: Collection) -> (SnapshotSender, Subscription) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            SnapshotSender { collection, tx },
            Subscription { collection, rx },
        )
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Wait for the next emission
    pub async fn next(&mut self) -> Option<DashboardResult<Snapshot>> {
        self.rx.recv().await
    }

    /// Stop delivery; calling again has no effect
    ///
    /// Emissions already buffered are still returned by [`Subscription::next`].
    pub fn cancel(&mut self) {
        self.rx.close();
    }

    pub fn into_stream(self) -> SnapshotStream {
        UnboundedReceiverStream::new(self.rx)
    }
}

/// Document storage used by the dashboard
///
/// Implementations must emit an initial snapshot on subscribe and a full
/// snapshot after every change to the collection.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Subscribe to whole-collection snapshots
    ///
    /// # Errors
    ///
    /// - `TransientIo` if the backend cannot open the subscription
    async fn subscribe(
        &self,
        collection: Collection,
        query: SnapshotQuery,
    ) -> DashboardResult<Subscription>;

    /// Insert a document and return its generated id
    async fn create(
        &self,
        collection: Collection,
        fields: Map<String, Value>,
    ) -> DashboardResult<DocumentId>;

    /// Merge `fields` into an existing document
    ///
    /// # Errors
    ///
    /// - `NotFound` if no document has `id`
    async fn update(
        &self,
        collection: Collection,
        id: &DocumentId,
        fields: Map<String, Value>,
    ) -> DashboardResult<()>;

    /// Remove a document
    ///
    /// # Errors
    ///
    /// - `NotFound` if no document has `id`
    async fn delete(&self, collection: Collection, id: &DocumentId) -> DashboardResult<()>;
}

#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    async fn subscribe(
        &self,
        collection: Collection,
        query: SnapshotQuery,
    ) -> DashboardResult<Subscription> {
        (**self).subscribe(collection, query).await
    }

    async fn create(
        &self,
        collection: Collection,
        fields: Map<String, Value>,
    ) -> DashboardResult<DocumentId> {
        (**self).create(collection, fields).await
    }

    async fn update(
        &self,
        collection: Collection,
        id: &DocumentId,
        fields: Map<String, Value>,
    ) -> DashboardResult<()> {
        (**self).update(collection, id, fields).await
    }

    async fn delete(&self, collection: Collection, id: &DocumentId) -> DashboardResult<()> {
        (**self).delete(collection, id).await
    }
}
