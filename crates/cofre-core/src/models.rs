//! Data models for Cofre

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Spending/income category assigned to a transaction
///
/// Closed set of labels the classifier may answer with. `Outros` is the
/// fallback for anything the classifier cannot place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Alimentação")]
    Alimentacao,
    #[serde(rename = "Transporte")]
    Transporte,
    #[serde(rename = "Moradia")]
    Moradia,
    #[serde(rename = "Saúde")]
    Saude,
    #[serde(rename = "Educação")]
    Educacao,
    #[serde(rename = "Lazer")]
    Lazer,
    #[serde(rename = "Trabalho")]
    Trabalho,
    #[serde(rename = "Serviços")]
    Servicos,
    #[serde(rename = "Impostos")]
    Impostos,
    #[serde(rename = "Vestimentas")]
    Vestimentas,
    #[serde(rename = "Investimentos")]
    Investimentos,
    #[serde(rename = "Outros")]
    Outros,
}

impl Category {
    /// Get all categories, in the order they are offered to the classifier
    pub fn all() -> &'static [Category] {
        &[
            Category::Alimentacao,
            Category::Transporte,
            Category::Moradia,
            Category::Saude,
            Category::Educacao,
            Category::Lazer,
            Category::Trabalho,
            Category::Servicos,
            Category::Impostos,
            Category::Vestimentas,
            Category::Investimentos,
            Category::Outros,
        ]
    }

    /// Stored label
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Alimentacao => "Alimentação",
            Category::Transporte => "Transporte",
            Category::Moradia => "Moradia",
            Category::Saude => "Saúde",
            Category::Educacao => "Educação",
            Category::Lazer => "Lazer",
            Category::Trabalho => "Trabalho",
            Category::Servicos => "Serviços",
            Category::Impostos => "Impostos",
            Category::Vestimentas => "Vestimentas",
            Category::Investimentos => "Investimentos",
            Category::Outros => "Outros",
        }
    }

    /// Parse a label, falling back to `Outros` for anything outside the set
    pub fn from_label_or_other(s: &str) -> Self {
        s.parse().unwrap_or(Category::Outros)
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        Category::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Categories whose costs recur every month and are worth reviewing
///
/// `Assinaturas` is not a classifier category; rows carrying it come from
/// other tools writing to the same store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RecurringCategory {
    Moradia,
    Transporte,
    Assinaturas,
}

impl RecurringCategory {
    /// Review order used by the advisor
    pub fn all() -> &'static [RecurringCategory] {
        &[
            RecurringCategory::Moradia,
            RecurringCategory::Transporte,
            RecurringCategory::Assinaturas,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecurringCategory::Moradia => "Moradia",
            RecurringCategory::Transporte => "Transporte",
            RecurringCategory::Assinaturas => "Assinaturas",
        }
    }
}

impl std::fmt::Display for RecurringCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    /// Negative = expense, positive = income
    pub amount: Decimal,
    pub description: String,
    /// Stored label; may be outside `Category` for rows written by other tools
    pub category: String,
    pub tags: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A new transaction to be recorded (before DB insertion)
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub description: String,
    pub category: Category,
    pub tags: Option<String>,
}

/// One grouped store row: the summed amount of a category within a range
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

impl CategoryTotal {
    pub fn new(category: impl Into<String>, total: Decimal) -> Self {
        Self {
            category: category.into(),
            total,
        }
    }
}
