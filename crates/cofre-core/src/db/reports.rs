//! Grouped category totals for the analytics engine

use chrono::NaiveDate;
use rusqlite::params;
use tracing::debug;

use super::transactions::parse_amount;
use super::Database;
use crate::analytics::{add_amounts, CategoryStore};
use crate::error::Result;
use crate::models::CategoryTotal;

impl Database {
    /// Sum amounts per category for transactions dated within `[from, to]`
    ///
    /// Rows come back ordered by category label. Amounts are folded with
    /// decimal arithmetic rather than SQLite's floating-point `SUM`; a
    /// category whose total overflows a `Decimal` fails with `InvalidData`.
    pub fn get_category_totals(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<CategoryTotal>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT category, amount
            FROM transactions
            WHERE date BETWEEN ?1 AND ?2
            ORDER BY category, rowid
            "#,
        )?;

        let rows = stmt
            .query_map(params![from.to_string(), to.to_string()], |row| {
                Ok((row.get::<_, String>(0)?, parse_amount(row, 1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut totals: Vec<CategoryTotal> = Vec::new();
        for (category, amount) in rows {
            match totals.last_mut() {
                Some(last) if last.category == category => {
                    last.total = add_amounts(last.total, amount, &category)?;
                }
                _ => totals.push(CategoryTotal::new(category, amount)),
            }
        }

        for total in &mut totals {
            total.total = total.total.normalize();
        }

        debug!(
            from = %from,
            to = %to,
            categories = totals.len(),
            "Queried category totals"
        );
        Ok(totals)
    }
}

impl CategoryStore for Database {
    fn query_by_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<CategoryTotal>> {
        self.get_category_totals(start, end)
    }
}
