// Copyright (c) 2025 - Cowboy AI, Inc.
//! Date Range Value Object
//!
//! A closed interval `[from, to]` over instants, with the period arithmetic
//! used by the dashboard's period-over-period comparison.
//!
//! # Invariants
//!
//! - `from <= to` (enforced by [`DateRange::new`])
//! - Membership is inclusive at both ends
//! - The previous period has the same length and ends exactly
//!   `duration_in_days + 1` days before this one ends
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use storefront_dashboard::domain::DateRange;
//!
//! let march = DateRange::new(
//!     Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap(),
//! ).unwrap();
//!
//! let previous = march.previous_period();
//! assert_eq!(previous.from(), Utc.with_ymd_and_hms(2024, 1, 30, 0, 0, 0).unwrap());
//! assert_eq!(previous.to(), Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
//! ```

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{DashboardError, DashboardResult};

/// Closed interval of instants with `from <= to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl DateRange {
    /// Create a range, rejecting `from > to`
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> DashboardResult<Self> {
        if from > to {
            return Err(DashboardError::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// Build a range from optional bounds
    ///
    /// Returns `Ok(None)` when either bound is missing: an open range has no
    /// current period and nothing to compare against.
    pub fn from_bounds(
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> DashboardResult<Option<Self>> {
        match (from, to) {
            (Some(from), Some(to)) => Self::new(from, to).map(Some),
            _ => Ok(None),
        }
    }

    pub fn from(&self) -> DateTime<Utc> {
        self.from
    }

    pub fn to(&self) -> DateTime<Utc> {
        self.to
    }

    /// Inclusive membership test
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant <= self.to
    }

    /// Number of whole days between `from` and `to`, truncated
    pub fn duration_in_days(&self) -> i64 {
        (self.to - self.from).num_days()
    }

    /// The contiguous, equal-length period immediately before this one
    ///
    /// Both bounds move back by `duration_in_days() + 1` days.
    pub fn previous_period(&self) -> DateRange {
        let shift = Duration::days(self.duration_in_days() + 1);
        DateRange {
            from: self.from - shift,
            to: self.to - shift,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.from.to_rfc3339(), self.to.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Bounds {
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        }

        let bounds = Bounds::deserialize(deserializer)?;
        DateRange::new(bounds.from, bounds.to).map_err(serde::de::Error::custom)
    }
}

/// Quick-pick ranges offered next to the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangePreset {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "yesterday")]
    Yesterday,
    #[serde(rename = "last-7-days")]
    Last7Days,
    #[serde(rename = "last-30-days")]
    Last30Days,
    #[serde(rename = "this-month")]
    ThisMonth,
    #[serde(rename = "last-month")]
    LastMonth,
}

impl Default for RangePreset {
    fn default() -> Self {
        RangePreset::Last30Days
    }
}

impl RangePreset {
    pub const ALL: [RangePreset; 6] = [
        RangePreset::Today,
        RangePreset::Yesterday,
        RangePreset::Last7Days,
        RangePreset::Last30Days,
        RangePreset::ThisMonth,
        RangePreset::LastMonth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RangePreset::Today => "today",
            RangePreset::Yesterday => "yesterday",
            RangePreset::Last7Days => "last-7-days",
            RangePreset::Last30Days => "last-30-days",
            RangePreset::ThisMonth => "this-month",
            RangePreset::LastMonth => "last-month",
        }
    }

    /// Resolve the preset against `now` in the given local offset
    ///
    /// Rolling presets keep the time of day of `now`; calendar presets span
    /// whole local days.
    pub fn resolve(&self, now: DateTime<Utc>, offset: FixedOffset) -> DateRange {
        let today = now.with_timezone(&offset).date_naive();

        let (from, to) = match self {
            RangePreset::Today => day_bounds(today, today, offset),
            RangePreset::Yesterday => {
                let yesterday = today - Duration::days(1);
                day_bounds(yesterday, yesterday, offset)
            }
            RangePreset::Last7Days => (now - Duration::days(6), now),
            RangePreset::Last30Days => (now - Duration::days(29), now),
            RangePreset::ThisMonth => {
                let first = first_of_month(today);
                day_bounds(first, last_of_month(first), offset)
            }
            RangePreset::LastMonth => {
                let previous_last = first_of_month(today) - Duration::days(1);
                day_bounds(first_of_month(previous_last), previous_last, offset)
            }
        };

        DateRange { from, to }
    }
}

impl fmt::Display for RangePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RangePreset {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RangePreset::ALL
            .into_iter()
            .find(|preset| preset.as_str() == s.trim())
            .ok_or_else(|| DashboardError::Configuration(format!("unknown range preset: {s}")))
    }
}

/// Start of the local calendar day, as a UTC instant
pub(crate) fn local_midnight(date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    let local = date.and_time(NaiveTime::MIN);
    let utc = local - Duration::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, Utc)
}

/// Local midnight of `first` through the last millisecond of `last`
fn day_bounds(
    first: NaiveDate,
    last: NaiveDate,
    offset: FixedOffset,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = local_midnight(first, offset);
    let end = local_midnight(last + Duration::days(1), offset) - Duration::milliseconds(1);
    (start, end)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

fn last_of_month(first: NaiveDate) -> NaiveDate {
    let somewhere_next_month = first + Duration::days(32);
    first_of_month(somewhere_next_month) - Duration::days(1)
}
