// Copyright (c) 2025 - Cowboy AI, Inc.
//! Snapshot Normalizer
//!
//! Converts raw documents into typed records. The only reshaping is on the
//! temporal fields each record type declares in
//! [`SnapshotRecord::TIMESTAMP_FIELDS`]: a backend timestamp found there is
//! replaced with a native instant. Every other field passes through
//! untouched, and a declared field that is absent is simply left absent.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use super::timestamp::BackendTimestamp;
use super::RawDocument;
use crate::domain::{Customer, Order, Product};
use crate::errors::{DashboardError, DashboardResult};
use crate::store::Collection;

/// A record type that can be decoded from a collection snapshot
pub trait SnapshotRecord: DeserializeOwned + Serialize {
    /// Collection the records live in
    const COLLECTION: Collection;

    /// Fields stored as backend timestamps
    const TIMESTAMP_FIELDS: &'static [&'static str];
}

impl SnapshotRecord for Order {
    const COLLECTION: Collection = Collection::Orders;
    const TIMESTAMP_FIELDS: &'static [&'static str] = &["createdAt"];
}

impl SnapshotRecord for Customer {
    const COLLECTION: Collection = Collection::Customers;
    const TIMESTAMP_FIELDS: &'static [&'static str] = &["joinedAt"];
}

impl SnapshotRecord for Product {
    const COLLECTION: Collection = Collection::Products;
    const TIMESTAMP_FIELDS: &'static [&'static str] = &[];
}

/// Produce the field map of `raw` with declared timestamps as RFC 3339 instants
///
/// The document id is folded in under `"id"`. Values that are not backend
/// timestamps (already-native strings, missing fields) are passed through.
pub fn normalize_document<T: SnapshotRecord>(raw: &RawDocument) -> Map<String, Value> {
    let mut fields = raw.fields.clone();

    for name in T::TIMESTAMP_FIELDS {
        let converted = fields
            .get(*name)
            .and_then(BackendTimestamp::from_value)
            .and_then(|ts| ts.to_datetime());

        if let Some(instant) = converted {
            fields.insert((*name).to_string(), Value::String(instant.to_rfc3339()));
        }
    }

    fields.insert("id".to_string(), Value::String(raw.id.to_string()));
    fields
}

/// Decode one raw document into its record type
pub fn decode_document<T: SnapshotRecord>(raw: &RawDocument) -> DashboardResult<T> {
    let fields = normalize_document::<T>(raw);
    serde_json::from_value(Value::Object(fields)).map_err(|e| DashboardError::Decode {
        collection: T::COLLECTION,
        id: raw.id.to_string(),
        reason: e.to_string(),
    })
}

/// Decode a full snapshot, skipping documents that do not fit the record type
///
/// One malformed document never hides the rest of the collection.
pub fn decode_snapshot<T: SnapshotRecord>(documents: &[RawDocument]) -> Vec<T> {
    documents
        .iter()
        .filter_map(|raw| match decode_document::<T>(raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(collection = %T::COLLECTION, id = %raw.id, error = %e, "Skipping undecodable document");
                None
            }
        })
        .collect()
}

/// Turn a record into backend fields: the inverse of [`normalize_document`]
///
/// The `"id"` field is removed; declared instants become backend timestamps.
pub fn encode_fields<T: SnapshotRecord>(record: &T) -> DashboardResult<Map<String, Value>> {
    let mut fields = match serde_json::to_value(record)? {
        Value::Object(fields) => fields,
        other => {
            return Err(DashboardError::Serialization(format!(
                "{} record serialized to non-object: {other}",
                T::COLLECTION
            )))
        }
    };

    fields.remove("id");
    to_backend_timestamps::<T>(&mut fields)?;
    Ok(fields)
}

/// Rewrite declared instant fields of a partial field map to backend timestamps
pub fn to_backend_timestamps<T: SnapshotRecord>(
    fields: &mut Map<String, Value>,
) -> DashboardResult<()> {
    for name in T::TIMESTAMP_FIELDS {
        let Some(Value::String(text)) = fields.get(*name) else {
            continue;
        };

        let instant = chrono::DateTime::parse_from_rfc3339(text)
            .map_err(|e| DashboardError::Serialization(format!("{name}: {e}")))?
            .with_timezone(&chrono::Utc);

        fields.insert(
            (*name).to_string(),
            serde_json::to_value(BackendTimestamp::from_datetime(instant))?,
        );
    }
    Ok(())
}
