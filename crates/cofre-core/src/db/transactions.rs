//! Transaction operations

use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use super::{parse_datetime, Database};
use crate::analytics::DateRange;
use crate::error::Result;
use crate::models::{NewTransaction, Transaction};

const SELECT_COLUMNS: &str =
    "SELECT id, date, amount, description, category, tags, created_at FROM transactions";

fn conversion_error<E>(idx: usize, e: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
}

/// Parse a stored amount column
pub(crate) fn parse_amount(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    Decimal::from_str(&raw).map_err(|e| conversion_error(idx, e))
}

fn row_to_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let id: String = row.get(0)?;
    let date: String = row.get(1)?;
    let created_at: String = row.get(6)?;

    Ok(Transaction {
        id: Uuid::parse_str(&id).map_err(|e| conversion_error(0, e))?,
        date: NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|e| conversion_error(1, e))?,
        amount: parse_amount(row, 2)?,
        description: row.get(3)?,
        category: row.get(4)?,
        tags: row.get(5)?,
        created_at: parse_datetime(&created_at),
    })
}

impl Database {
    /// Record a new transaction, returning its generated id
    pub fn insert_transaction(&self, tx: &NewTransaction) -> Result<Uuid> {
        let conn = self.conn()?;
        let id = Uuid::new_v4();

        conn.execute(
            r#"
            INSERT INTO transactions (id, date, amount, description, category, tags)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                id.to_string(),
                tx.date.format("%Y-%m-%d").to_string(),
                tx.amount.normalize().to_string(),
                tx.description,
                tx.category.as_str(),
                tx.tags,
            ],
        )?;

        info!(%id, category = tx.category.as_str(), "Transaction recorded");
        Ok(id)
    }

    /// Get a single transaction by id
    pub fn get_transaction(&self, id: Uuid) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let tx = conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id.to_string()],
                row_to_transaction,
            )
            .optional()?;
        Ok(tx)
    }

    /// List the most recent transactions, newest first
    pub fn list_transactions(&self, limit: i64) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} ORDER BY date DESC, created_at DESC, rowid DESC LIMIT ?1",
            SELECT_COLUMNS
        ))?;

        let transactions = stmt
            .query_map(params![limit], row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// List every transaction dated within the range (inclusive), oldest first
    pub fn list_transactions_in_range(&self, range: &DateRange) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE date BETWEEN ?1 AND ?2 ORDER BY date, rowid",
            SELECT_COLUMNS
        ))?;

        let transactions = stmt
            .query_map(
                params![range.start.to_string(), range.end.to_string()],
                row_to_transaction,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Count all recorded transactions
    pub fn count_transactions(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count)
    }
}
