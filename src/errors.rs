//! Error types for dashboard operations

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::invariants::ValidationError;
use crate::store::Collection;

/// Errors that can occur at the record store boundary and in range handling
///
/// The aggregation engine itself never produces one of these; it has no
/// fallible operations once its inputs are well typed.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Create/update input rejected by a domain rule
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Update or delete referenced a record that does not exist
    #[error("{collection} record not found: {id}")]
    NotFound { collection: Collection, id: String },

    /// Subscription or CRUD call failed in the backend
    #[error("Transient I/O error: {0}")]
    TransientIo(String),

    /// Date range with `from` after `to`
    #[error("Invalid date range: {from} is after {to}")]
    InvalidRange {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },

    /// Document could not be decoded into its entity type
    #[error("Cannot decode {collection} document {id}: {reason}")]
    Decode {
        collection: Collection,
        id: String,
        reason: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The backend closed a snapshot stream
    #[error("Subscription to {0} closed")]
    SubscriptionClosed(Collection),
}

/// Result type for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Serialization(err.to_string())
    }
}

impl DashboardError {
    /// Whether the failure came from the backend rather than the caller
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DashboardError::TransientIo(_) | DashboardError::SubscriptionClosed(_)
        )
    }
}
