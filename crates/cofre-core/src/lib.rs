//! Cofre Core Library
//!
//! Shared functionality for the Cofre personal finance tracker:
//! - Transaction store (SQLite with optional SQLCipher encryption)
//! - Period analytics: date ranges, per-category aggregation, period
//!   comparison and spending suggestions
//! - Pluggable category classifier (Ollama, mock)
//! - Configuration loading and currency formatting

pub mod analytics;
pub mod classify;
pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod models;

/// Test utilities including mock Ollama server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use analytics::{
    advise, aggregate, aggregate_range, compare, resolve, CategoryAggregate, CategoryComparison,
    CategoryStore, ComparisonResult, ComparisonSummary, DateRange, PeriodKey, PeriodSnapshot,
    Suggestion, SuggestionKind, TotalDelta, Variation,
};
pub use classify::{parse_category, Classifier, MockClassifier, OllamaClassifier};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, OllamaConfig};
pub use db::Database;
pub use error::{Error, Result};
pub use format::{format_amount, format_currency};
pub use models::{Category, CategoryTotal, NewTransaction, RecurringCategory, Transaction};
