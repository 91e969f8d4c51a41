// Copyright (c) 2025 - Cowboy AI, Inc.
//! Chart series: daily sales and monthly customer growth

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use tracing::warn;

use super::period::accumulate;
use super::view::{GrowthPoint, SalesPoint};
use crate::domain::{Customer, Order};

/// Calendar day of an instant in the given offset
pub fn local_day(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    instant.with_timezone(&offset).date_naive()
}

/// Revenue per calendar day, ascending, days without orders omitted
pub fn daily_sales<'a, I>(orders: I, offset: FixedOffset) -> Vec<SalesPoint>
where
    I: IntoIterator<Item = &'a Order>,
{
    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for order in orders {
        let day = local_day(order.created_at, offset);
        if !accumulate(by_day.entry(day).or_default(), order.amount) {
            warn!(%day, order = %order.id, "Daily sales exceed the decimal range, saturated");
        }
    }

    by_day
        .into_iter()
        .map(|(day, total)| SalesPoint { day, total })
        .collect()
}

/// Customers joined per calendar month, ascending, empty months omitted
pub fn monthly_growth<'a, I>(customers: I, offset: FixedOffset) -> Vec<GrowthPoint>
where
    I: IntoIterator<Item = &'a Customer>,
{
    let mut by_month: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for customer in customers {
        let day = local_day(customer.joined_at, offset);
        *by_month.entry((day.year(), day.month())).or_default() += 1;
    }

    by_month
        .into_iter()
        .map(|((year, month), customers)| GrowthPoint {
            year,
            month,
            customers,
        })
        .collect()
}
