// Copyright (c) 2025 - Cowboy AI, Inc.
//! Live Dashboard Pipeline
//!
//! Bridges record store subscriptions to the pure aggregation engine. A
//! [`DashboardState`] owns the latest decoded snapshot of each collection
//! plus the selected range; every input change triggers a full
//! recomputation, and the resulting view is published on a watch channel.
//!
//! ```text
//! orders ────┐
//! customers ─┼──> DashboardState ──compute()──> watch<Arc<DashboardView>> ──> observers
//! products ──┘          ↑
//!                 set_date_range()
//! ```
//!
//! Snapshots of different collections arrive independently; a view may
//! combine an order snapshot with an older product snapshot. The engine
//! tolerates the mismatch (orphaned product ids fall back to a placeholder).
//!
//! Backend failures never clear the last good view: they are logged and
//! recorded for [`DashboardPipeline::last_error`].

mod state;

pub use state::DashboardState;

use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::DashboardConfig;
use crate::domain::DateRange;
use crate::engine::{AggregationEngine, DashboardView, EngineSettings};
use crate::errors::{DashboardError, DashboardResult};
use crate::store::{Collection, RecordStore, SnapshotQuery, Subscription};

struct Inner {
    state: DashboardState,
    last_error: Option<String>,
}

struct Shared {
    inner: Mutex<Inner>,
    engine: AggregationEngine,
    views: watch::Sender<Arc<DashboardView>>,
    loaded: watch::Sender<bool>,
}

impl Shared {
    /// Recompute from the current state and publish
    fn publish(&self, inner: &Inner) -> Arc<DashboardView> {
        let view = Arc::new(inner.state.compute(&self.engine));
        debug!(
            range = ?inner.state.range().map(|r| r.to_string()),
            orders = inner.state.orders().len(),
            revenue = %view.revenue.value,
            "Recomputed dashboard"
        );
        self.views.send_replace(Arc::clone(&view));
        if inner.state.is_loaded() {
            self.loaded.send_if_modified(|loaded| !std::mem::replace(loaded, true));
        }
        view
    }
}

/// Read handle on the latest dashboard view
#[derive(Clone)]
pub struct DashboardObserver {
    views: watch::Receiver<Arc<DashboardView>>,
}

impl DashboardObserver {
    pub fn latest(&self) -> Arc<DashboardView> {
        Arc::clone(&self.views.borrow())
    }

    /// Wait for the next published view; `None` once the pipeline is gone
    pub async fn changed(&mut self) -> Option<Arc<DashboardView>> {
        self.views.changed().await.ok()?;
        Some(Arc::clone(&self.views.borrow_and_update()))
    }

    /// Wait until a published view satisfies `predicate`
    ///
    /// Checks the current view first.
    pub async fn wait_for<F>(&mut self, predicate: F) -> Option<Arc<DashboardView>>
    where
        F: Fn(&DashboardView) -> bool,
    {
        let current = Arc::clone(&self.views.borrow_and_update());
        if predicate(&current) {
            return Some(current);
        }
        loop {
            let view = self.changed().await?;
            if predicate(&view) {
                return Some(view);
            }
        }
    }
}

/// Running subscription pipeline for one dashboard
pub struct DashboardPipeline {
    shared: Arc<Shared>,
    shutdown: watch::Sender<bool>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl DashboardPipeline {
    /// Subscribe to all three collections and start recomputing
    ///
    /// The first view, computed over empty collections, is available
    /// immediately; each subscription's initial snapshot follows.
    ///
    /// # Errors
    ///
    /// Any subscription failure; subscriptions already opened are cancelled.
    pub async fn start<S>(
        store: &S,
        config: &DashboardConfig,
        range: Option<DateRange>,
    ) -> DashboardResult<Self>
    where
        S: RecordStore + ?Sized,
    {
        let engine = AggregationEngine::new(EngineSettings::from(config));
        let state = DashboardState::new(range);
        let (views, _) = watch::channel(Arc::new(state.compute(&engine)));

        let mut subscriptions = Vec::with_capacity(Collection::ALL.len());
        for collection in Collection::ALL {
            match store
                .subscribe(collection, SnapshotQuery::dashboard(collection))
                .await
            {
                Ok(subscription) => subscriptions.push(subscription),
                Err(e) => {
                    for mut opened in subscriptions {
                        opened.cancel();
                    }
                    return Err(e);
                }
            }
        }

        let shared = Arc::new(Shared {
            inner: Mutex::new(Inner {
                state,
                last_error: None,
            }),
            engine,
            views,
            loaded: watch::channel(false).0,
        });
        let (shutdown, _) = watch::channel(false);

        let tasks = subscriptions
            .into_iter()
            .map(|subscription| {
                let shared = Arc::clone(&shared);
                let stop = shutdown.subscribe();
                tokio::spawn(run_subscription(shared, subscription, stop))
            })
            .collect();

        info!(range = ?range.map(|r| r.to_string()), "Dashboard pipeline started");

        Ok(Self {
            shared,
            shutdown,
            tasks: Mutex::new(tasks),
        })
    }

    pub fn observer(&self) -> DashboardObserver {
        DashboardObserver {
            views: self.shared.views.subscribe(),
        }
    }

    /// The most recently published view
    pub fn latest(&self) -> Arc<DashboardView> {
        Arc::clone(&self.shared.views.borrow())
    }

    /// Wait until every collection has delivered its first snapshot
    ///
    /// Returns `false` if the pipeline stops first.
    pub async fn loaded(&self) -> bool {
        let mut loaded = self.shared.loaded.subscribe();
        let mut stop = self.shutdown.subscribe();
        while !*loaded.borrow_and_update() {
            if *stop.borrow_and_update() {
                return false;
            }
            tokio::select! {
                _ = loaded.changed() => {}
                _ = stop.changed() => {}
            }
        }
        true
    }

    /// Change the selected period and recompute
    pub async fn set_date_range(&self, range: Option<DateRange>) -> Arc<DashboardView> {
        let mut inner = self.shared.inner.lock().await;
        inner.state.set_range(range);
        info!(range = ?range.map(|r| r.to_string()), "Date range changed");
        self.shared.publish(&inner)
    }

    /// Message of the most recent backend failure, if any
    pub async fn last_error(&self) -> Option<String> {
        self.shared.inner.lock().await.last_error.clone()
    }

    /// Cancel all subscriptions and wait for their tasks
    ///
    /// Safe to call more than once. The last view stays readable.
    pub async fn shutdown(&self) {
        self.shutdown.send_replace(true);

        let tasks: Vec<JoinHandle<()>> = std::mem::take(&mut *self.tasks.lock().await);
        if tasks.is_empty() {
            return;
        }

        for task in tasks {
            if let Err(e) = task.await {
                warn!(error = %e, "Subscription task ended abnormally");
            }
        }
        info!("Dashboard pipeline stopped");
    }

    pub fn is_running(&self) -> bool {
        !*self.shutdown.borrow()
    }
}

impl Drop for DashboardPipeline {
    fn drop(&mut self) {
        self.shutdown.send_replace(true);
    }
}

async fn run_subscription(
    shared: Arc<Shared>,
    mut subscription: Subscription,
    mut stop: watch::Receiver<bool>,
) {
    let collection = subscription.collection();
    debug!(%collection, "Subscription task running");

    loop {
        tokio::select! {
            _ = stop.changed() => {
                subscription.cancel();
                info!(%collection, "Subscription cancelled");
                return;
            }
            next = subscription.next() => match next {
                Some(Ok(snapshot)) => {
                    let mut inner = shared.inner.lock().await;
                    let decoded = inner.state.apply_snapshot(&snapshot);
                    debug!(%collection, documents = snapshot.len(), decoded, "Snapshot received");
                    shared.publish(&inner);
                }
                Some(Err(e)) => record_error(&shared, e).await,
                None => {
                    record_error(&shared, DashboardError::SubscriptionClosed(collection)).await;
                    return;
                }
            }
        }
    }
}

async fn record_error(shared: &Shared, error: DashboardError) {
    warn!(error = %error, transient = error.is_transient(), "Store subscription error");
    shared.inner.lock().await.last_error = Some(error.to_string());
}
