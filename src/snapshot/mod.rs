// Copyright (c) 2025 - Cowboy AI, Inc.
//! Collection Snapshots and Normalization
//!
//! The record store emits a [`Snapshot`]: the complete current contents of
//! one collection as [`RawDocument`]s, timestamps still in the backend's
//! native [`BackendTimestamp`] shape. The normalizer turns those into typed
//! records at a single boundary, using a statically declared field list per
//! record type instead of sniffing values at runtime.
//!
//! ```text
//! RecordStore ──Snapshot──> decode_snapshot::<T>() ──Vec<T>──> AggregationEngine
//!                  │                 │
//!            raw documents     TIMESTAMP_FIELDS
//!            (backend ts)      (per record type)
//! ```

pub mod normalizer;
pub mod timestamp;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::DocumentId;
use crate::store::Collection;

pub use normalizer::{
    decode_document, decode_snapshot, encode_fields, normalize_document, to_backend_timestamps,
    SnapshotRecord,
};
pub use timestamp::BackendTimestamp;

/// A stored document: identifier plus its untyped fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    pub id: DocumentId,
    pub fields: Map<String, Value>,
}

impl RawDocument {
    pub fn new(id: impl Into<DocumentId>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Look up a single field
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Point-in-time contents of one collection
///
/// Each snapshot is internally consistent. Snapshots of different
/// collections carry no ordering relative to each other.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub collection: Collection,
    pub documents: Vec<RawDocument>,
}

impl Snapshot {
    pub fn new(collection: Collection, documents: Vec<RawDocument>) -> Self {
        Self {
            collection,
            documents,
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Decode every document as `T`, skipping those that do not fit
    pub fn decode<T: SnapshotRecord>(&self) -> Vec<T> {
        decode_snapshot(&self.documents)
    }
}
