// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-memory record store
//!
//! Reference backend used by the snapshot binary and the test suite. Keeps
//! each collection in insertion order and fans out a fresh, queried snapshot
//! to every live subscriber after each write.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::{Collection, RecordStore, SnapshotQuery, SnapshotSender, Subscription};
use crate::domain::DocumentId;
use crate::errors::{DashboardError, DashboardResult};
use crate::snapshot::{RawDocument, Snapshot};

struct Watcher {
    query: SnapshotQuery,
    sender: SnapshotSender,
}

#[derive(Default)]
struct Inner {
    documents: HashMap<Collection, Vec<RawDocument>>,
    watchers: HashMap<Collection, Vec<Watcher>>,
}

impl Inner {
    fn collection(&self, collection: Collection) -> &[RawDocument] {
        self.documents
            .get(&collection)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn collection_mut(&mut self, collection: Collection) -> &mut Vec<RawDocument> {
        self.documents.entry(collection).or_default()
    }

    /// Push the current state of `collection` to its subscribers
    fn publish(&mut self, collection: Collection) {
        let documents = self.documents.get(&collection).cloned().unwrap_or_default();
        let Some(watchers) = self.watchers.get_mut(&collection) else {
            return;
        };

        watchers.retain(|watcher| {
            let snapshot = Snapshot::new(collection, watcher.query.apply(&documents));
            watcher.sender.send(snapshot)
        });
        debug!(%collection, subscribers = watchers.len(), "Published snapshot");
    }
}

/// Record store backed by process memory
#[derive(Default)]
pub struct InMemoryRecordStore {
    inner: RwLock<Inner>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a collection wholesale and notify subscribers
    pub async fn seed(&self, collection: Collection, documents: Vec<RawDocument>) {
        let mut inner = self.inner.write().await;
        *inner.collection_mut(collection) = documents;
        inner.publish(collection);
    }

    /// Current documents of a collection, in store order
    pub async fn documents(&self, collection: Collection) -> Vec<RawDocument> {
        self.inner.read().await.collection(collection).to_vec()
    }

    /// Deliver a transient error to every subscriber of `collection`
    pub async fn inject_failure(&self, collection: Collection, message: &str) {
        let inner = self.inner.read().await;
        if let Some(watchers) = inner.watchers.get(&collection) {
            for watcher in watchers {
                watcher
                    .sender
                    .fail(DashboardError::TransientIo(message.to_string()));
            }
        }
        warn!(%collection, message, "Injected store failure");
    }

    /// Number of subscriptions still receiving snapshots
    pub async fn subscriber_count(&self, collection: Collection) -> usize {
        self.inner
            .read()
            .await
            .watchers
            .get(&collection)
            .map_or(0, |watchers| {
                watchers.iter().filter(|w| !w.sender.is_closed()).count()
            })
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn subscribe(
        &self,
        collection: Collection,
        query: SnapshotQuery,
    ) -> DashboardResult<Subscription> {
        let (sender, subscription) = Subscription::channel(collection);
        let mut inner = self.inner.write().await;

        let initial = Snapshot::new(collection, query.apply(inner.collection(collection)));
        sender.send(initial);

        inner
            .watchers
            .entry(collection)
            .or_default()
            .push(Watcher { query, sender });
        debug!(%collection, "Opened subscription");
        Ok(subscription)
    }

    async fn create(
        &self,
        collection: Collection,
        fields: Map<String, Value>,
    ) -> DashboardResult<DocumentId> {
        let id = DocumentId::generate();
        let mut inner = self.inner.write().await;
        inner
            .collection_mut(collection)
            .push(RawDocument::new(id.clone(), fields));
        inner.publish(collection);
        Ok(id)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &DocumentId,
        fields: Map<String, Value>,
    ) -> DashboardResult<()> {
        let mut inner = self.inner.write().await;
        let doc = inner
            .collection_mut(collection)
            .iter_mut()
            .find(|doc| &doc.id == id)
            .ok_or_else(|| DashboardError::NotFound {
                collection,
                id: id.to_string(),
            })?;

        doc.fields.extend(fields);
        inner.publish(collection);
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &DocumentId) -> DashboardResult<()> {
        let mut inner = self.inner.write().await;
        let documents = inner.collection_mut(collection);
        let position = documents
            .iter()
            .position(|doc| &doc.id == id)
            .ok_or_else(|| DashboardError::NotFound {
                collection,
                id: id.to_string(),
            })?;

        documents.remove(position);
        inner.publish(collection);
        Ok(())
    }
}
