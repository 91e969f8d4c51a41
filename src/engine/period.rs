// Copyright (c) 2025 - Cowboy AI, Inc.
//! Period selection and period-over-period comparison

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

use super::view::PercentChange;
use crate::domain::{Customer, DateRange, Order};

/// Records falling in the selected period and in the one before it
#[derive(Debug, Default)]
pub struct PeriodSplit<'a> {
    pub current_orders: Vec<&'a Order>,
    pub previous_orders: Vec<&'a Order>,
    pub current_customers: Vec<&'a Customer>,
    pub previous_customers: Vec<&'a Customer>,
}

impl<'a> PeriodSplit<'a> {
    /// Partition orders by `created_at` and customers by `joined_at`
    ///
    /// Without a range every subset is empty: there is no current period and
    /// nothing to compare against.
    pub fn new(orders: &'a [Order], customers: &'a [Customer], range: Option<&DateRange>) -> Self {
        let Some(range) = range else {
            return Self::default();
        };
        let previous = range.previous_period();

        Self {
            current_orders: orders.iter().filter(|o| range.contains(o.created_at)).collect(),
            previous_orders: orders.iter().filter(|o| previous.contains(o.created_at)).collect(),
            current_customers: customers.iter().filter(|c| range.contains(c.joined_at)).collect(),
            previous_customers: customers
                .iter()
                .filter(|c| previous.contains(c.joined_at))
                .collect(),
        }
    }

    pub fn current_revenue(&self) -> Decimal {
        revenue(&self.current_orders)
    }

    pub fn previous_revenue(&self) -> Decimal {
        revenue(&self.previous_orders)
    }
}

fn revenue(orders: &[&Order]) -> Decimal {
    saturating_total(orders.iter().map(|o| o.amount))
}

/// Add `amount` into `total`, clamping at the `Decimal` bounds
///
/// Returns `false` when the exact sum does not fit.
pub fn accumulate(total: &mut Decimal, amount: Decimal) -> bool {
    match total.checked_add(amount) {
        Some(sum) => {
            *total = sum;
            true
        }
        None => {
            *total = total.saturating_add(amount);
            false
        }
    }
}

/// Sum of money amounts, saturating instead of overflowing
pub fn saturating_total<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    let mut total = Decimal::ZERO;
    let mut exact = true;
    for amount in amounts {
        exact &= accumulate(&mut total, amount);
    }
    if !exact {
        warn!(%total, "Money total exceeds the decimal range, saturated");
    }
    total
}

/// Percentage change from `previous` to `current`
///
/// - previous zero, current positive: [`PercentChange::Unbounded`]
/// - both zero: [`PercentChange::Zero`]
/// - otherwise `(current - previous) / previous * 100` to one decimal,
///   midpoint away from zero
pub fn percent_change(current: Decimal, previous: Decimal) -> PercentChange {
    if previous.is_zero() {
        return if current > Decimal::ZERO {
            PercentChange::Unbounded
        } else {
            PercentChange::Zero
        };
    }

    let ratio = current
        .checked_sub(previous)
        .and_then(|delta| delta.checked_div(previous))
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED));

    match ratio {
        Some(ratio) => {
            let rounded = ratio.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
            if rounded.is_zero() {
                PercentChange::Relative(Decimal::ZERO)
            } else {
                PercentChange::Relative(rounded)
            }
        }
        None => PercentChange::Unbounded,
    }
}

/// [`percent_change`] for counts
pub fn count_change(current: usize, previous: usize) -> PercentChange {
    percent_change(Decimal::from(current), Decimal::from(previous))
}
