// Copyright (c) 2025 - Cowboy AI, Inc.
//! Customer entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::document_id::DocumentId;

/// A registered customer
///
/// `joined_at` is stamped once when the customer is created and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: DocumentId,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub joined_at: DateTime<Utc>,
}
