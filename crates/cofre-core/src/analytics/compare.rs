//! Period-over-period comparison

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::debug;

use super::aggregate::{aggregate, PeriodSnapshot};
use super::period::PeriodKey;
use super::CategoryStore;
use crate::error::{Error, Result};

/// Percent change of a category relative to the first period
///
/// A category with no value in the first period has `Infinite` variation,
/// whatever the sign of its value in the second period. So does a change too
/// large for a `Decimal` percent, e.g. against a base of a fraction of a cent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Variation {
    Percent(Decimal),
    Infinite,
}

impl Variation {
    /// `(value_b - value_a) / |value_a| * 100`, or `Infinite` when `value_a` is
    /// zero or the percent does not fit a `Decimal`
    pub fn between(value_a: Decimal, value_b: Decimal) -> Self {
        if value_a.is_zero() {
            return Variation::Infinite;
        }
        value_b
            .checked_sub(value_a)
            .and_then(|difference| difference.checked_div(value_a.abs()))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map_or(Variation::Infinite, Variation::Percent)
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Variation::Infinite)
    }

    /// Strictly greater than a finite percent threshold
    pub fn exceeds(&self, threshold: Decimal) -> bool {
        match self {
            Variation::Percent(p) => *p > threshold,
            Variation::Infinite => true,
        }
    }

    pub fn abs(&self) -> Self {
        match self {
            Variation::Percent(p) => Variation::Percent(p.abs()),
            Variation::Infinite => Variation::Infinite,
        }
    }
}

impl fmt::Display for Variation {
    /// One decimal place, `inf` for infinite
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variation::Percent(p) => {
                let rounded = p.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
                write!(f, "{:.1}", rounded)
            }
            Variation::Infinite => write!(f, "inf"),
        }
    }
}

/// One category's values in both periods
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryComparison {
    pub category: String,
    pub value_a: Decimal,
    pub value_b: Decimal,
    pub difference: Decimal,
    pub percent_variation: Variation,
}

/// A total in both periods and its change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TotalDelta {
    pub a: Decimal,
    pub b: Decimal,
    pub difference: Decimal,
}

impl TotalDelta {
    pub fn new(a: Decimal, b: Decimal) -> Result<Self> {
        Ok(Self {
            a,
            b,
            difference: subtract(b, a, "total delta")?,
        })
    }
}

fn subtract(minuend: Decimal, subtrahend: Decimal, context: &str) -> Result<Decimal> {
    minuend
        .checked_sub(subtrahend)
        .ok_or_else(|| Error::InvalidData(format!("Amount overflow in {}", context)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComparisonSummary {
    pub total_expense: TotalDelta,
    pub total_income: TotalDelta,
}

/// Comparison of two periods
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    pub periods: (PeriodKey, PeriodKey),
    /// Union of both periods' categories: first period's order, then
    /// categories only present in the second period
    pub per_category: Vec<CategoryComparison>,
    pub summary: ComparisonSummary,
}

impl ComparisonResult {
    pub fn get(&self, category: &str) -> Option<&CategoryComparison> {
        self.per_category.iter().find(|c| c.category == category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> + '_ {
        self.per_category.iter().map(|c| c.category.as_str())
    }
}

/// Aggregate both periods independently and compare them
///
/// A failure in either aggregation aborts the whole comparison.
pub fn compare<S>(
    period_a: &PeriodKey,
    period_b: &PeriodKey,
    today: NaiveDate,
    store: &S,
) -> Result<ComparisonResult>
where
    S: CategoryStore + ?Sized,
{
    let snapshot_a = aggregate(period_a, today, store)?;
    let snapshot_b = aggregate(period_b, today, store)?;
    compare_snapshots(&snapshot_a, &snapshot_b)
}

/// Compare two already-aggregated periods
///
/// Fails with `InvalidData` if a difference does not fit a `Decimal`.
pub fn compare_snapshots(a: &PeriodSnapshot, b: &PeriodSnapshot) -> Result<ComparisonResult> {
    let mut categories: Vec<&str> = a.aggregate.categories().collect();
    for category in b.aggregate.categories() {
        if !a.aggregate.contains(category) {
            categories.push(category);
        }
    }

    let per_category = categories
        .into_iter()
        .map(|category| -> Result<CategoryComparison> {
            let value_a = a.aggregate.get(category).unwrap_or(Decimal::ZERO);
            let value_b = b.aggregate.get(category).unwrap_or(Decimal::ZERO);
            Ok(CategoryComparison {
                category: category.to_string(),
                value_a,
                value_b,
                difference: subtract(value_b, value_a, category)?,
                percent_variation: Variation::between(value_a, value_b),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        period_a = %a.period,
        period_b = %b.period,
        categories = per_category.len(),
        "Compared periods"
    );

    Ok(ComparisonResult {
        periods: (a.period.clone(), b.period.clone()),
        per_category,
        summary: ComparisonSummary {
            total_expense: TotalDelta::new(a.total_expense, b.total_expense)?,
            total_income: TotalDelta::new(a.total_income, b.total_income)?,
        },
    })
}
