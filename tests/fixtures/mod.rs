// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for storefront-dashboard
//!
//! Provides deterministic orders, customers and products, both as typed
//! records and as raw store documents with backend timestamps.
//!
//! # Design Principles
//! - All test data is deterministic (no `DocumentId::generate()` or `Utc::now()`)
//! - Timestamps sit in February and March 2024 so the leap day is covered
//! - Raw documents are built from the typed fixtures, never by hand

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use storefront_dashboard::snapshot::{encode_fields, SnapshotRecord};
use storefront_dashboard::{
    Customer, DateRange, DocumentId, Order, OrderItem, OrderStatus, Product, RawDocument,
};

pub const PRODUCT_TEA: &str = "prod-tea";
pub const PRODUCT_RICE: &str = "prod-rice";
pub const PRODUCT_SALT: &str = "prod-salt";
pub const PRODUCT_DELETED: &str = "prod-deleted";

/// Noon UTC on the given day of 2024
pub fn day(month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, 12, 0, 0)
        .single()
        .expect("Invalid fixture date")
}

/// March 2024, whole days in UTC
pub fn march_range() -> DateRange {
    DateRange::new(
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap(),
    )
    .expect("Invalid fixture range")
}

pub fn order(id: &str, created_at: DateTime<Utc>, amount: Decimal, items: Vec<OrderItem>) -> Order {
    Order {
        id: DocumentId::new(id),
        customer_name: "Rana Haddad".to_string(),
        status: OrderStatus::Pending,
        amount,
        created_at,
        items,
    }
}

pub fn customer(id: &str, joined_at: DateTime<Utc>) -> Customer {
    Customer {
        id: DocumentId::new(id),
        name: format!("Customer {id}"),
        phone: "0791234567".to_string(),
        address: "12 Rainbow Street, Amman".to_string(),
        joined_at,
    }
}

pub fn product(id: &str, name: &str, stock: i64) -> Product {
    Product {
        id: DocumentId::new(id),
        name: name.to_string(),
        price: Decimal::new(350, 2),
        stock,
    }
}

/// Five orders: three in March, two in the previous period
pub fn orders() -> Vec<Order> {
    vec![
        order(
            "ord-1",
            day(3, 2),
            Decimal::new(12050, 2),
            vec![OrderItem::new(PRODUCT_TEA, 3), OrderItem::new(PRODUCT_RICE, 5)],
        ),
        order(
            "ord-2",
            day(3, 2),
            Decimal::new(4000, 2),
            vec![OrderItem::new(PRODUCT_SALT, 3)],
        ),
        order(
            "ord-3",
            day(3, 20),
            Decimal::new(1999, 2),
            vec![OrderItem::new(PRODUCT_DELETED, 2)],
        ),
        order(
            "ord-4",
            day(2, 29),
            Decimal::new(5000, 2),
            vec![OrderItem::new(PRODUCT_TEA, 1)],
        ),
        order("ord-5", day(2, 1), Decimal::new(3000, 2), vec![]),
    ]
}

/// Three customers: one joined in March, two in the previous period
pub fn customers() -> Vec<Customer> {
    vec![
        customer("cus-1", day(3, 5)),
        customer("cus-2", day(2, 10)),
        customer("cus-3", day(2, 11)),
    ]
}

/// Three products, two under the low-stock threshold; the deleted product
/// is referenced by `ord-3` only
pub fn products() -> Vec<Product> {
    vec![
        product(PRODUCT_TEA, "Green tea", 12),
        product(PRODUCT_RICE, "Basmati rice", 140),
        product(PRODUCT_SALT, "Sea salt", 0),
    ]
}

/// Encode a record the way the store holds it
pub fn raw<T: SnapshotRecord>(id: &DocumentId, record: &T) -> RawDocument {
    RawDocument::new(id.clone(), encode_fields(record).expect("Fixture must encode"))
}

pub fn raw_orders() -> Vec<RawDocument> {
    orders().iter().map(|o| raw(&o.id, o)).collect()
}

pub fn raw_customers() -> Vec<RawDocument> {
    customers().iter().map(|c| raw(&c.id, c)).collect()
}

pub fn raw_products() -> Vec<RawDocument> {
    products().iter().map(|p| raw(&p.id, p)).collect()
}

/// A JSON object as a field map
pub fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("Fixture must be an object, got {other}"),
    }
}
