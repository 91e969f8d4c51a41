// Copyright (c) 2025 - Cowboy AI, Inc.
//! Storefront Domain Models
//!
//! The three root records managed through the record store, plus the value
//! objects the dashboard computes over.
//!
//! # Entities
//!
//! - [`Order`] - customer order with status, amount and line items
//! - [`Customer`] - registered customer with immutable join instant
//! - [`Product`] - catalogue product with price and stock level
//!
//! # Value Objects with Invariants
//!
//! - [`DocumentId`] - backend-assigned record identifier
//! - [`DateRange`] - closed interval with `from <= to`
//! - [`RangePreset`] - quick-pick ranges resolved against a clock reading
//!
//! Field rules for user input live in [`invariants`].

pub mod customer;
pub mod date_range;
pub mod document_id;
pub mod invariants;
pub mod order;
pub mod product;

pub use customer::Customer;
pub use date_range::{DateRange, RangePreset};
pub use document_id::DocumentId;
pub use invariants::{ValidationError, ValidationResult};
pub use order::{Order, OrderItem, OrderStatus};
pub use product::{Product, LOW_STOCK_THRESHOLD};
