// Copyright (c) 2025 - Cowboy AI, Inc.
//! Dashboard Snapshot
//!
//! Loads a JSON export of the three collections into an in-memory record
//! store, runs the live pipeline until every collection has been received,
//! and prints the resulting dashboard view as JSON.
//!
//! Run with: cargo run --bin dashboard-snapshot -- export.json
//!
//! The export is an object with `orders`, `customers` and `products`
//! arrays; each document carries its `id` next to its fields. Timestamps
//! may be RFC 3339 strings or `{ "seconds", "nanoseconds" }` objects.
//!
//! Environment:
//! - `DASHBOARD_EXPORT`: export path when no argument is given
//! - `DASHBOARD_FROM` / `DASHBOARD_TO`: explicit RFC 3339 range, overriding
//!   `DASHBOARD_DEFAULT_RANGE`
//! - plus every `DASHBOARD_*` key read by `DashboardConfig::from_env`

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use storefront_dashboard::{
    init_tracing, Collection, DashboardConfig, DashboardPipeline, DateRange, DocumentId,
    InMemoryRecordStore, RawDocument,
};
use std::time::Duration;
use tracing::{info, warn};

const LOAD_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Export {
    orders: Vec<Map<String, Value>>,
    customers: Vec<Map<String, Value>>,
    products: Vec<Map<String, Value>>,
}

impl Export {
    fn take(&mut self, collection: Collection) -> Vec<RawDocument> {
        let documents = match collection {
            Collection::Orders => std::mem::take(&mut self.orders),
            Collection::Customers => std::mem::take(&mut self.customers),
            Collection::Products => std::mem::take(&mut self.products),
        };
        documents.into_iter().map(into_raw).collect()
    }
}

fn into_raw(mut fields: Map<String, Value>) -> RawDocument {
    let id = match fields.remove("id") {
        Some(Value::String(id)) => DocumentId::new(id),
        Some(other) => DocumentId::new(other.to_string()),
        None => DocumentId::generate(),
    };
    RawDocument::new(id, fields)
}

fn parse_instant(key: &str) -> Result<Option<DateTime<Utc>>> {
    match std::env::var(key) {
        Ok(raw) => {
            let instant = DateTime::parse_from_rfc3339(raw.trim())
                .with_context(|| format!("{key} is not an RFC 3339 timestamp: {raw}"))?;
            Ok(Some(instant.with_timezone(&Utc)))
        }
        Err(_) => Ok(None),
    }
}

fn selected_range(config: &DashboardConfig, now: DateTime<Utc>) -> Result<DateRange> {
    let from = parse_instant("DASHBOARD_FROM")?;
    let to = parse_instant("DASHBOARD_TO")?;

    if from.is_some() != to.is_some() {
        bail!("DASHBOARD_FROM and DASHBOARD_TO must be set together");
    }

    Ok(DateRange::from_bounds(from, to)?.unwrap_or_else(|| config.initial_range(now)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = DashboardConfig::from_env().context("Invalid dashboard configuration")?;
    init_tracing(&config.log_filter);

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("DASHBOARD_EXPORT").ok())
        .context("Usage: dashboard-snapshot <export.json> (or set DASHBOARD_EXPORT)")?;

    let raw = std::fs::read_to_string(&path).with_context(|| format!("Cannot read {path}"))?;
    let mut export: Export =
        serde_json::from_str(&raw).with_context(|| format!("{path} is not a valid export"))?;

    let range = selected_range(&config, Utc::now())?;
    info!(%path, %range, "Building dashboard snapshot");

    let store = InMemoryRecordStore::new();
    for collection in Collection::ALL {
        let documents = export.take(collection);
        info!(%collection, documents = documents.len(), "Seeding collection");
        store.seed(collection, documents).await;
    }

    let pipeline = DashboardPipeline::start(&store, &config, Some(range)).await?;
    if !matches!(tokio::time::timeout(LOAD_TIMEOUT, pipeline.loaded()).await, Ok(true)) {
        warn!("Not every collection arrived; printing a partial view");
    }
    let view = pipeline.latest();

    pipeline.shutdown().await;
    if let Some(error) = pipeline.last_error().await {
        warn!(%error, "Store reported an error while building the snapshot");
    }

    println!("{}", serde_json::to_string_pretty(view.as_ref())?);
    Ok(())
}
