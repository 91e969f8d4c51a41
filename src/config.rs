//! Dashboard configuration
//!
//! Defaults suit a single-timezone storefront; every field can be overridden
//! from the environment.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::{DateRange, RangePreset};
use crate::errors::{DashboardError, DashboardResult};

pub const ENV_UTC_OFFSET_MINUTES: &str = "DASHBOARD_UTC_OFFSET_MINUTES";
pub const ENV_RECENT_ORDERS: &str = "DASHBOARD_RECENT_ORDERS";
pub const ENV_BEST_SELLERS: &str = "DASHBOARD_BEST_SELLERS";
pub const ENV_DELETED_PRODUCT_LABEL: &str = "DASHBOARD_DELETED_PRODUCT_LABEL";
pub const ENV_DEFAULT_RANGE: &str = "DASHBOARD_DEFAULT_RANGE";
pub const ENV_LOG_FILTER: &str = "RUST_LOG";

/// Largest offset chrono accepts, just under a day
const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

/// Configuration for the dashboard pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Offset from UTC used for day and month bucketing and range presets
    pub utc_offset_minutes: i32,
    /// Length of the recent orders list
    pub recent_orders_limit: usize,
    /// Length of the best-selling products list
    pub best_sellers_limit: usize,
    /// Name shown for best sellers whose product was deleted
    pub deleted_product_label: String,
    /// Range selected when the dashboard opens
    pub default_range: RangePreset,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            recent_orders_limit: 5,
            best_sellers_limit: 5,
            deleted_product_label: "Deleted product".to_string(),
            default_range: RangePreset::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load from process environment, falling back to defaults
    pub fn from_env() -> DashboardResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> DashboardResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            utc_offset_minutes: parse_or(&lookup, ENV_UTC_OFFSET_MINUTES, defaults.utc_offset_minutes)?,
            recent_orders_limit: parse_or(&lookup, ENV_RECENT_ORDERS, defaults.recent_orders_limit)?,
            best_sellers_limit: parse_or(&lookup, ENV_BEST_SELLERS, defaults.best_sellers_limit)?,
            deleted_product_label: lookup(ENV_DELETED_PRODUCT_LABEL)
                .unwrap_or(defaults.deleted_product_label),
            default_range: parse_or(&lookup, ENV_DEFAULT_RANGE, defaults.default_range)?,
            log_filter: lookup(ENV_LOG_FILTER).unwrap_or(defaults.log_filter),
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject values no valid dashboard can be built from
    pub fn validate(&self) -> DashboardResult<()> {
        if self.utc_offset_minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(DashboardError::Configuration(format!(
                "{ENV_UTC_OFFSET_MINUTES} out of range: {}",
                self.utc_offset_minutes
            )));
        }
        if self.deleted_product_label.trim().is_empty() {
            return Err(DashboardError::Configuration(
                "deleted product label cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    pub fn with_recent_orders_limit(mut self, limit: usize) -> Self {
        self.recent_orders_limit = limit;
        self
    }

    pub fn with_best_sellers_limit(mut self, limit: usize) -> Self {
        self.best_sellers_limit = limit;
        self
    }

    pub fn with_deleted_product_label(mut self, label: impl Into<String>) -> Self {
        self.deleted_product_label = label.into();
        self
    }

    pub fn with_default_range(mut self, preset: RangePreset) -> Self {
        self.default_range = preset;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// The configured offset; out-of-range values fall back to UTC
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)).unwrap_or_else(|| Utc.fix())
    }

    /// Range the dashboard opens with, resolved against `now`
    pub fn initial_range(&self, now: DateTime<Utc>) -> DateRange {
        self.default_range.resolve(now, self.utc_offset())
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> DashboardResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| DashboardError::Configuration(format!("{key}={raw}: {e}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = DashboardConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.recent_orders_limit, 5);
        assert_eq!(config.deleted_product_label, "Deleted product");
        assert_eq!(config.default_range, RangePreset::Last30Days);
    }

    #[test]
    fn test_overrides() {
        let config = DashboardConfig::from_lookup(lookup(&[
            (ENV_UTC_OFFSET_MINUTES, "180"),
            (ENV_RECENT_ORDERS, " 10 "),
            (ENV_DEFAULT_RANGE, "this-month"),
            (ENV_LOG_FILTER, "debug"),
        ]))
        .unwrap();

        assert_eq!(config.utc_offset(), FixedOffset::east_opt(3 * 3600).unwrap());
        assert_eq!(config.recent_orders_limit, 10);
        assert_eq!(config.default_range, RangePreset::ThisMonth);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_bad_values_are_configuration_errors() {
        let err = DashboardConfig::from_lookup(lookup(&[(ENV_BEST_SELLERS, "many")])).unwrap_err();
        assert!(matches!(err, DashboardError::Configuration(_)));

        let err = DashboardConfig::from_lookup(lookup(&[(ENV_DEFAULT_RANGE, "fortnight")])).unwrap_err();
        assert!(matches!(err, DashboardError::Configuration(_)));

        let err =
            DashboardConfig::from_lookup(lookup(&[(ENV_UTC_OFFSET_MINUTES, "1440")])).unwrap_err();
        assert!(matches!(err, DashboardError::Configuration(_)));
    }

    #[test]
    fn test_initial_range_uses_default_preset() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let config = DashboardConfig::default().with_default_range(RangePreset::Today);

        let range = config.initial_range(now);
        assert_eq!(range.from(), Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap());
    }
}
