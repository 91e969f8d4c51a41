// Copyright (c) 2025 - Cowboy AI, Inc.
//! Catalog Commands
//!
//! Typed create/update/delete operations over the record store. Commands
//! express user intent and can fail validation; nothing reaches the store
//! until every field rule in [`crate::domain::invariants`] holds.
//!
//! # Time Handling
//!
//! Creation commands carry an explicit `timestamp`, stamped into
//! `createdAt`/`joinedAt`. Those fields are fixed from then on: change sets
//! that try to touch them are rejected.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::info;

use super::{Collection, RecordStore};
use crate::domain::invariants::{
    validate_address, validate_amount, validate_items, validate_name, validate_phone,
    validate_price, validate_status, validate_stock,
};
use crate::domain::{
    Customer, DocumentId, Order, OrderItem, OrderStatus, ValidationError, ValidationResult,
};
use crate::errors::DashboardResult;
use crate::snapshot::to_backend_timestamps;

/// Command to place a new order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrder {
    pub customer_name: String,
    pub status: OrderStatus,
    pub amount: Decimal,
    pub items: Vec<OrderItem>,

    /// Becomes the order's `createdAt`
    pub timestamp: DateTime<Utc>,
}

impl CreateOrder {
    pub fn validate(&self) -> ValidationResult {
        validate_name("customerName", &self.customer_name)?;
        validate_amount(self.amount)?;
        validate_items(&self.items)
    }

    fn into_fields(self) -> DashboardResult<Map<String, Value>> {
        let mut fields = object(json!({
            "customerName": self.customer_name.trim(),
            "status": self.status,
            "amount": self.amount,
            "createdAt": self.timestamp.to_rfc3339(),
            "items": self.items,
        }));
        to_backend_timestamps::<Order>(&mut fields)?;
        Ok(fields)
    }
}

/// Command to register a customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCustomer {
    pub name: String,
    pub phone: String,
    pub address: String,

    /// Becomes the customer's `joinedAt`
    pub timestamp: DateTime<Utc>,
}

impl CreateCustomer {
    pub fn validate(&self) -> ValidationResult {
        validate_name("name", &self.name)?;
        validate_phone(&self.phone)?;
        validate_address(&self.address)
    }

    fn into_fields(self) -> DashboardResult<Map<String, Value>> {
        let mut fields = object(json!({
            "name": self.name.trim(),
            "phone": self.phone.trim(),
            "address": self.address.trim(),
            "joinedAt": self.timestamp.to_rfc3339(),
        }));
        to_backend_timestamps::<Customer>(&mut fields)?;
        Ok(fields)
    }
}

/// Command to add a product to the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProduct {
    pub name: String,
    pub price: Decimal,
    pub stock: i64,
}

impl CreateProduct {
    pub fn validate(&self) -> ValidationResult {
        validate_name("name", &self.name)?;
        validate_price(self.price)?;
        validate_stock(self.stock)
    }

    fn into_fields(self) -> Map<String, Value> {
        object(json!({
            "name": self.name.trim(),
            "price": self.price,
            "stock": self.stock,
        }))
    }
}

/// Partial update of a customer; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CustomerChanges {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl CustomerChanges {
    /// Parse a free-form change set, rejecting creation-only fields
    pub fn from_fields(fields: Map<String, Value>) -> DashboardResult<Self> {
        reject_immutable(&fields, &["id", "joinedAt"])?;
        Ok(serde_json::from_value(Value::Object(fields))?)
    }

    pub fn validate(&self) -> ValidationResult {
        if self.name.is_none() && self.phone.is_none() && self.address.is_none() {
            return Err(ValidationError::EmptyUpdate("customer"));
        }
        if let Some(name) = &self.name {
            validate_name("name", name)?;
        }
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        if let Some(address) = &self.address {
            validate_address(address)?;
        }
        Ok(())
    }

    fn into_fields(self) -> Map<String, Value> {
        let mut fields = Map::new();
        if let Some(name) = self.name {
            fields.insert("name".into(), Value::String(name.trim().to_string()));
        }
        if let Some(phone) = self.phone {
            fields.insert("phone".into(), Value::String(phone.trim().to_string()));
        }
        if let Some(address) = self.address {
            fields.insert("address".into(), Value::String(address.trim().to_string()));
        }
        fields
    }
}

/// Partial update of a product; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i64>,
}

impl ProductChanges {
    /// Parse a free-form change set
    pub fn from_fields(fields: Map<String, Value>) -> DashboardResult<Self> {
        reject_immutable(&fields, &["id"])?;
        Ok(serde_json::from_value(Value::Object(fields))?)
    }

    pub fn validate(&self) -> ValidationResult {
        if self.name.is_none() && self.price.is_none() && self.stock.is_none() {
            return Err(ValidationError::EmptyUpdate("product"));
        }
        if let Some(name) = &self.name {
            validate_name("name", name)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        if let Some(stock) = self.stock {
            validate_stock(stock)?;
        }
        Ok(())
    }

    fn into_fields(self) -> Map<String, Value> {
        let mut fields = Map::new();
        if let Some(name) = self.name {
            fields.insert("name".into(), Value::String(name.trim().to_string()));
        }
        if let Some(price) = self.price {
            fields.insert("price".into(), json!(price));
        }
        if let Some(stock) = self.stock {
            fields.insert("stock".into(), json!(stock));
        }
        fields
    }
}

fn reject_immutable(fields: &Map<String, Value>, names: &[&'static str]) -> ValidationResult {
    match names.iter().find(|name| fields.contains_key(**name)) {
        Some(field) => Err(ValidationError::Immutable { field: *field }),
        None => Ok(()),
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Validated writes against the three catalog collections
pub struct CatalogService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> CatalogService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn create_order(&self, command: CreateOrder) -> DashboardResult<DocumentId> {
        command.validate()?;
        let id = self
            .store
            .create(Collection::Orders, command.into_fields()?)
            .await?;
        info!(%id, "Created order");
        Ok(id)
    }

    /// Move an order to another status; the input is parsed case-insensitively
    pub async fn update_order_status(&self, id: &DocumentId, status: &str) -> DashboardResult<()> {
        let status = validate_status(status)?;
        let fields = object(json!({ "status": status }));
        self.store.update(Collection::Orders, id, fields).await?;
        info!(%id, %status, "Updated order status");
        Ok(())
    }

    pub async fn delete_order(&self, id: &DocumentId) -> DashboardResult<()> {
        self.store.delete(Collection::Orders, id).await?;
        info!(%id, "Deleted order");
        Ok(())
    }

    pub async fn create_customer(&self, command: CreateCustomer) -> DashboardResult<DocumentId> {
        command.validate()?;
        let id = self
            .store
            .create(Collection::Customers, command.into_fields()?)
            .await?;
        info!(%id, "Created customer");
        Ok(id)
    }

    pub async fn update_customer(
        &self,
        id: &DocumentId,
        changes: CustomerChanges,
    ) -> DashboardResult<()> {
        changes.validate()?;
        self.store
            .update(Collection::Customers, id, changes.into_fields())
            .await?;
        info!(%id, "Updated customer");
        Ok(())
    }

    pub async fn delete_customer(&self, id: &DocumentId) -> DashboardResult<()> {
        self.store.delete(Collection::Customers, id).await?;
        info!(%id, "Deleted customer");
        Ok(())
    }

    pub async fn create_product(&self, command: CreateProduct) -> DashboardResult<DocumentId> {
        command.validate()?;
        let id = self
            .store
            .create(Collection::Products, command.into_fields())
            .await?;
        info!(%id, "Created product");
        Ok(id)
    }

    pub async fn update_product(
        &self,
        id: &DocumentId,
        changes: ProductChanges,
    ) -> DashboardResult<()> {
        changes.validate()?;
        self.store
            .update(Collection::Products, id, changes.into_fields())
            .await?;
        info!(%id, "Updated product");
        Ok(())
    }

    /// Remove a product; orders referencing it keep their items
    pub async fn delete_product(&self, id: &DocumentId) -> DashboardResult<()> {
        self.store.delete(Collection::Products, id).await?;
        info!(%id, "Deleted product");
        Ok(())
    }
}
