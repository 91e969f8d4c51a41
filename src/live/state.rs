// Copyright (c) 2025 - Cowboy AI, Inc.
//! Latest decoded snapshots plus the selected range

use std::collections::BTreeSet;

use crate::domain::{Customer, DateRange, Order, Product};
use crate::engine::{AggregationEngine, DashboardView};
use crate::snapshot::Snapshot;
use crate::store::Collection;

/// Everything a recomputation needs, replaced wholesale per snapshot
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    orders: Vec<Order>,
    customers: Vec<Customer>,
    products: Vec<Product>,
    range: Option<DateRange>,
    received: BTreeSet<Collection>,
}

impl DashboardState {
    pub fn new(range: Option<DateRange>) -> Self {
        Self {
            range,
            ..Self::default()
        }
    }

    /// Replace the collection `snapshot` belongs to; returns how many
    /// documents decoded
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot) -> usize {
        self.received.insert(snapshot.collection);
        match snapshot.collection {
            Collection::Orders => {
                self.orders = snapshot.decode();
                self.orders.len()
            }
            Collection::Customers => {
                self.customers = snapshot.decode();
                self.customers.len()
            }
            Collection::Products => {
                self.products = snapshot.decode();
                self.products.len()
            }
        }
    }

    /// Whether every collection has delivered at least one snapshot
    pub fn is_loaded(&self) -> bool {
        self.received.len() == Collection::ALL.len()
    }

    pub fn set_range(&mut self, range: Option<DateRange>) {
        self.range = range;
    }

    pub fn range(&self) -> Option<&DateRange> {
        self.range.as_ref()
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn compute(&self, engine: &AggregationEngine) -> DashboardView {
        engine.compute(
            &self.orders,
            &self.customers,
            &self.products,
            self.range.as_ref(),
        )
    }
}
