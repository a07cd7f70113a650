//! Per-category aggregation of a period

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::debug;

use super::period::{resolve, DateRange, PeriodKey};
use super::{add_amounts, CategoryStore};
use crate::error::Result;
use crate::models::CategoryTotal;

/// Signed total per category, in store order
///
/// Keys are unique; a category absent from the store for the range is simply
/// not present (absence is not zero). A category the store reports with a
/// zero net total is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryAggregate {
    entries: Vec<(String, Decimal)>,
}

impl CategoryAggregate {
    /// Build from store rows, merging any repeated category into its first slot
    pub fn from_totals(rows: Vec<CategoryTotal>) -> Result<Self> {
        let mut entries: Vec<(String, Decimal)> = Vec::with_capacity(rows.len());
        for row in rows {
            match entries.iter_mut().find(|(name, _)| *name == row.category) {
                Some((name, total)) => *total = add_amounts(*total, row.total, name)?,
                None => entries.push((row.category, row.total)),
            }
        }
        Ok(Self { entries })
    }

    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, total)| *total)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> + '_ {
        self.entries.iter().map(|(name, total)| (name.as_str(), *total))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of the absolute values of negative totals
    pub fn total_expense(&self) -> Result<Decimal> {
        self.entries
            .iter()
            .filter(|(_, total)| *total < Decimal::ZERO)
            .try_fold(Decimal::ZERO, |sum, (_, total)| {
                add_amounts(sum, total.abs(), "total expense")
            })
    }

    /// Sum of positive totals
    pub fn total_income(&self) -> Result<Decimal> {
        self.entries
            .iter()
            .filter(|(_, total)| *total > Decimal::ZERO)
            .try_fold(Decimal::ZERO, |sum, (_, total)| {
                add_amounts(sum, *total, "total income")
            })
    }
}

impl Serialize for CategoryAggregate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, total) in &self.entries {
            map.serialize_entry(name, total)?;
        }
        map.end()
    }
}

/// Aggregated view of one period
///
/// Built fresh for every request and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodSnapshot {
    pub period: PeriodKey,
    pub range: DateRange,
    pub aggregate: CategoryAggregate,
    pub total_expense: Decimal,
    pub total_income: Decimal,
}

/// Resolve `period` against `today` and aggregate the resulting range
pub fn aggregate<S>(period: &PeriodKey, today: NaiveDate, store: &S) -> Result<PeriodSnapshot>
where
    S: CategoryStore + ?Sized,
{
    let range = resolve(period, today);
    aggregate_range(period, range, store)
}

/// Aggregate an already-resolved range
pub fn aggregate_range<S>(period: &PeriodKey, range: DateRange, store: &S) -> Result<PeriodSnapshot>
where
    S: CategoryStore + ?Sized,
{
    let rows = store.query_by_range(range.start, range.end)?;
    let aggregate = CategoryAggregate::from_totals(rows)?;

    debug!(
        period = %period,
        range = %range,
        categories = aggregate.len(),
        "Aggregated period"
    );

    Ok(PeriodSnapshot {
        period: period.clone(),
        range,
        total_expense: aggregate.total_expense()?,
        total_income: aggregate.total_income()?,
        aggregate,
    })
}

impl PeriodSnapshot {
    /// Income minus expense
    ///
    /// Both totals are non-negative, so the difference cannot overflow.
    pub fn balance(&self) -> Decimal {
        self.total_income - self.total_expense
    }
}
