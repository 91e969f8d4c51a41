// Copyright (c) 2025 - Cowboy AI, Inc.
//! Integration tests for catalog commands
//!
//! Commands go through validation into the store, and the live pipeline
//! reflects each accepted write in the next dashboard view.

mod fixtures;

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use serde_json::json;
use test_case::test_case;

use fixtures::*;
use storefront_dashboard::domain::ValidationError;
use storefront_dashboard::store::{
    CreateCustomer, CreateOrder, CreateProduct, CustomerChanges, ProductChanges,
};
use storefront_dashboard::{
    CatalogService, Collection, DashboardConfig, DashboardError, DashboardPipeline, DocumentId,
    InMemoryRecordStore, OrderItem, OrderStatus,
};

const WAIT: Duration = Duration::from_secs(2);

fn catalog() -> CatalogService<Arc<InMemoryRecordStore>> {
    CatalogService::new(Arc::new(InMemoryRecordStore::new()))
}

fn tea() -> CreateProduct {
    CreateProduct {
        name: "Green tea".to_string(),
        price: dec!(3.50),
        stock: 12,
    }
}

fn omar() -> CreateCustomer {
    CreateCustomer {
        name: "Omar Khalil".to_string(),
        phone: "0791234567".to_string(),
        address: "12 Rainbow Street".to_string(),
        timestamp: day(3, 5),
    }
}

#[tokio::test]
async fn test_commands_flow_into_dashboard() {
    let catalog = catalog();
    let pipeline = DashboardPipeline::start(
        catalog.store(),
        &DashboardConfig::default(),
        Some(march_range()),
    )
    .await
    .unwrap();
    let mut observer = pipeline.observer();

    let tea_id = catalog.create_product(tea()).await.unwrap();
    catalog.create_customer(omar()).await.unwrap();
    catalog
        .create_order(CreateOrder {
            customer_name: "Omar Khalil".to_string(),
            status: OrderStatus::Pending,
            amount: dec!(10.50),
            items: vec![OrderItem::new(tea_id.clone(), 3)],
            timestamp: day(3, 10),
        })
        .await
        .unwrap();

    let view = tokio::time::timeout(
        WAIT,
        observer.wait_for(|v| {
            v.lifetime.orders == 1 && v.lifetime.customers == 1 && v.low_stock.value == 1
        }),
    )
    .await
    .expect("view never caught up")
    .expect("pipeline stopped");

    assert_eq!(view.revenue.value, dec!(10.50));
    assert_eq!(view.new_customers.value, 1);
    assert_eq!(view.best_selling_products[0].name, "Green tea");
    assert_eq!(view.best_selling_products[0].quantity, 3);

    pipeline.shutdown().await;
}

#[tokio::test]
async fn test_order_status_lifecycle() {
    let catalog = catalog();
    let id = catalog
        .create_order(CreateOrder {
            customer_name: "Rana".to_string(),
            status: OrderStatus::Pending,
            amount: dec!(5),
            items: vec![],
            timestamp: day(3, 1),
        })
        .await
        .unwrap();

    for status in ["Shipped", "delivered"] {
        catalog.update_order_status(&id, status).await.unwrap();
    }

    let docs = catalog.store().documents(Collection::Orders).await;
    assert_eq!(docs[0].field("status"), Some(&json!("Delivered")));
    // createdAt is untouched by status changes
    assert_eq!(
        docs[0].field("createdAt"),
        Some(&json!({ "seconds": day(3, 1).timestamp(), "nanoseconds": 0 }))
    );

    catalog.delete_order(&id).await.unwrap();
    assert!(catalog.store().documents(Collection::Orders).await.is_empty());
}

#[test_case("A", "0791234567", "12 Rainbow Street", "name" ; "short name")]
#[test_case("Omar", "079123", "12 Rainbow Street", "phone" ; "short phone")]
#[test_case("Omar", "0791234567", "Amm", "address" ; "short address")]
#[tokio::test]
async fn test_customer_validation(name: &str, phone: &str, address: &str, field: &str) {
    let catalog = catalog();
    let command = CreateCustomer {
        name: name.to_string(),
        phone: phone.to_string(),
        address: address.to_string(),
        ..omar()
    };

    match catalog.create_customer(command).await {
        Err(DashboardError::Validation(ValidationError::TooShort { field: rejected, .. })) => {
            assert_eq!(rejected, field)
        }
        other => panic!("expected TooShort on {field}, got {other:?}"),
    }
    assert!(catalog.store().documents(Collection::Customers).await.is_empty());
}

#[tokio::test]
async fn test_product_rules() {
    let catalog = catalog();

    let free = CreateProduct { price: dec!(0), ..tea() };
    assert!(matches!(
        catalog.create_product(free).await,
        Err(DashboardError::Validation(ValidationError::NotPositive { field: "price" }))
    ));

    let id = catalog.create_product(tea()).await.unwrap();
    let restock = ProductChanges {
        stock: Some(75),
        ..ProductChanges::default()
    };
    catalog.update_product(&id, restock).await.unwrap();

    let docs = catalog.store().documents(Collection::Products).await;
    assert_eq!(docs[0].field("stock"), Some(&json!(75)));
    assert_eq!(docs[0].field("name"), Some(&json!("Green tea")));

    let negative = ProductChanges {
        stock: Some(-1),
        ..ProductChanges::default()
    };
    assert!(catalog.update_product(&id, negative).await.is_err());
}

#[tokio::test]
async fn test_customer_update_and_delete() {
    let catalog = catalog();
    let id = catalog.create_customer(omar()).await.unwrap();

    let changes = CustomerChanges::from_fields(fields(json!({ "address": "7 Jabal Amman" }))).unwrap();
    catalog.update_customer(&id, changes).await.unwrap();

    let docs = catalog.store().documents(Collection::Customers).await;
    assert_eq!(docs[0].field("address"), Some(&json!("7 Jabal Amman")));

    let moved_join = CustomerChanges::from_fields(fields(json!({
        "joinedAt": Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap().to_rfc3339()
    })));
    assert!(matches!(
        moved_join,
        Err(DashboardError::Validation(ValidationError::Immutable { field: "joinedAt" }))
    ));

    catalog.delete_customer(&id).await.unwrap();
    assert!(matches!(
        catalog.delete_customer(&id).await,
        Err(DashboardError::NotFound { collection: Collection::Customers, .. })
    ));
}

#[tokio::test]
async fn test_missing_records_are_not_found() {
    let catalog = catalog();
    let ghost = DocumentId::new("ghost");

    let err = catalog.update_order_status(&ghost, "Shipped").await.unwrap_err();
    assert!(matches!(err, DashboardError::NotFound { collection: Collection::Orders, .. }));
    assert!(!err.is_transient());

    assert!(matches!(
        catalog.delete_product(&ghost).await,
        Err(DashboardError::NotFound { collection: Collection::Products, .. })
    ));
}
