// Copyright (c) 2025 - Cowboy AI, Inc.
//! Ranked lists: recent orders, best sellers and low-stock products

use std::collections::HashMap;

use super::view::{LowStock, RankedProduct, StockAlert};
use crate::domain::{DocumentId, Order, Product};

/// The `limit` newest orders by `created_at`
///
/// Orders created at the same instant are ordered by id so the result does
/// not depend on snapshot order.
pub fn recent_orders(orders: &[Order], limit: usize) -> Vec<Order> {
    let mut newest: Vec<&Order> = orders.iter().collect();
    newest.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    newest.into_iter().take(limit).cloned().collect()
}

/// Top `limit` products by units sold across all order items
///
/// Equal totals keep the order in which each product id was first seen.
/// Ids missing from `products` are ranked under `fallback_name`.
pub fn best_sellers(
    orders: &[Order],
    products: &[Product],
    limit: usize,
    fallback_name: &str,
) -> Vec<RankedProduct> {
    let mut totals: Vec<(&DocumentId, u64)> = Vec::new();
    let mut slots: HashMap<&DocumentId, usize> = HashMap::new();

    for item in orders.iter().flat_map(|order| order.items.iter()) {
        let slot = *slots.entry(&item.product_id).or_insert_with(|| {
            totals.push((&item.product_id, 0));
            totals.len() - 1
        });
        totals[slot].1 = totals[slot].1.saturating_add(u64::from(item.quantity));
    }

    // Stable: ties stay first-seen first
    totals.sort_by(|a, b| b.1.cmp(&a.1));

    let names: HashMap<&DocumentId, &str> =
        products.iter().map(|p| (&p.id, p.name.as_str())).collect();

    totals
        .into_iter()
        .take(limit)
        .map(|(product_id, quantity)| {
            let name = names.get(product_id).copied();
            RankedProduct {
                product_id: product_id.clone(),
                name: name.unwrap_or(fallback_name).to_string(),
                quantity,
                resolved: name.is_some(),
            }
        })
        .collect()
}

/// Products below the low-stock threshold, lowest stock first
pub fn low_stock(products: &[Product]) -> LowStock {
    let mut items: Vec<StockAlert> = products
        .iter()
        .filter(|p| p.is_low_stock())
        .map(|p| StockAlert {
            product_id: p.id.clone(),
            name: p.name.clone(),
            stock: p.stock,
        })
        .collect();

    items.sort_by(|a, b| a.stock.cmp(&b.stock).then_with(|| a.name.cmp(&b.name)));

    LowStock {
        value: items.len(),
        items,
    }
}
