//! Period analytics
//!
//! Turns stored transactions into period reports:
//!
//! - **period** - resolves a period identifier (`este_mes`, `mes_passado`,
//!   `este_ano`, `30_dias`) into an inclusive date range
//! - **aggregate** - per-category totals plus income/expense for a range
//! - **compare** - per-category deltas and variation between two periods
//! - **advisor** - ordered spending suggestions derived from a snapshot
//!
//! Every operation is a pure function of its inputs, the injected `today`
//! and a read-only [`CategoryStore`]. Nothing is cached between calls.
//!
//! ```rust,ignore
//! let today = clock.today();
//! let snapshot = aggregate(&PeriodKey::EsteMes, today, &db)?;
//! for suggestion in advise(&snapshot, today, &db)? {
//!     println!("{}", suggestion);
//! }
//! ```

pub mod advisor;
pub mod aggregate;
pub mod compare;
pub mod period;

pub use advisor::{advise, Suggestion, SuggestionKind};
pub use aggregate::{aggregate, aggregate_range, CategoryAggregate, PeriodSnapshot};
pub use compare::{
    compare, compare_snapshots, CategoryComparison, ComparisonResult, ComparisonSummary,
    TotalDelta, Variation,
};
pub use period::{resolve, DateRange, PeriodKey};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::models::CategoryTotal;

/// Add two amounts, failing with `InvalidData` instead of overflowing
pub(crate) fn add_amounts(a: Decimal, b: Decimal, context: &str) -> Result<Decimal> {
    a.checked_add(b)
        .ok_or_else(|| Error::InvalidData(format!("Amount overflow in {}", context)))
}

/// Read access to grouped transaction totals
///
/// Implementations return one row per category for transactions dated within
/// `[start, end]` (inclusive), with the amounts already summed. A store that
/// cannot be reached fails with an error for which
/// [`Error::is_storage_unavailable`](crate::Error::is_storage_unavailable) is true.
pub trait CategoryStore {
    fn query_by_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<CategoryTotal>>;
}

impl<T: CategoryStore + ?Sized> CategoryStore for &T {
    fn query_by_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<CategoryTotal>> {
        (**self).query_by_range(start, end)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::Cell;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::{add_amounts, CategoryStore, DateRange};
    use crate::error::{Error, Result};
    use crate::models::CategoryTotal;

    /// In-memory store holding raw dated rows, grouped on query
    #[derive(Default)]
    pub struct MemoryStore {
        rows: Vec<(NaiveDate, String, Decimal)>,
        unavailable: bool,
        queries: Cell<usize>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn unavailable() -> Self {
            Self {
                unavailable: true,
                ..Self::default()
            }
        }

        pub fn with(mut self, date: &str, category: &str, amount: Decimal) -> Self {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
            self.rows.push((date, category.to_string(), amount));
            self
        }

        pub fn query_count(&self) -> usize {
            self.queries.get()
        }
    }

    impl CategoryStore for MemoryStore {
        fn query_by_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<CategoryTotal>> {
            self.queries.set(self.queries.get() + 1);
            if self.unavailable {
                return Err(Error::StorageUnavailable("memory store offline".into()));
            }

            let range = DateRange { start, end };
            let mut totals: Vec<CategoryTotal> = Vec::new();
            for (date, category, amount) in &self.rows {
                if !range.contains(*date) {
                    continue;
                }
                match totals.iter_mut().find(|t| &t.category == category) {
                    Some(existing) => {
                        existing.total = add_amounts(existing.total, *amount, category)?;
                    }
                    None => totals.push(CategoryTotal::new(category.clone(), *amount)),
                }
            }
            Ok(totals)
        }
    }
}
