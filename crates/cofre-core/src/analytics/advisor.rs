//! Spending suggestions for a period snapshot

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::aggregate::PeriodSnapshot;
use super::compare::compare;
use super::period::PeriodKey;
use super::CategoryStore;
use crate::error::Result;
use crate::format::format_amount;
use crate::models::RecurringCategory;

/// How many categories the top-expenses suggestion lists
pub const TOP_EXPENSES_LIMIT: usize = 3;

/// Variation (percent) above which a month-over-month increase is flagged
pub const SPENDING_INCREASE_THRESHOLD: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// Share of a recurring cost proposed as a potential saving (0.15)
pub const RECURRING_SAVING_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Period identifiers containing this text trigger the month-over-month check
const LAST_MONTH_MARKER: &str = "mes_passado";

const BALANCED_MESSAGE: &str = "✅ Seus gastos estão equilibrados este mês";

/// Which rule produced a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    TopExpenses,
    SpendingIncrease,
    RecurringCost,
    Balanced,
}

/// One formatted suggestion line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub text: String,
}

impl Suggestion {
    fn new(kind: SuggestionKind, text: String) -> Self {
        Self { kind, text }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Build the ordered suggestion list for a snapshot
///
/// Rules run in a fixed order: top expenses, month-over-month increases,
/// recurring-cost review. When none of them fires, the result is the single
/// balanced-spending suggestion. The month-over-month rule queries `store`
/// for a fresh `mes_passado` vs `este_mes` comparison and its errors propagate.
pub fn advise<S>(snapshot: &PeriodSnapshot, today: NaiveDate, store: &S) -> Result<Vec<Suggestion>>
where
    S: CategoryStore + ?Sized,
{
    let mut suggestions = Vec::new();

    if let Some(top) = top_expenses(snapshot) {
        suggestions.push(top);
    }

    if snapshot.period.as_str().contains(LAST_MONTH_MARKER) {
        suggestions.extend(spending_increases(today, store)?);
    }

    suggestions.extend(recurring_costs(snapshot));

    if suggestions.is_empty() {
        suggestions.push(Suggestion::new(
            SuggestionKind::Balanced,
            BALANCED_MESSAGE.to_string(),
        ));
    }

    debug!(
        period = %snapshot.period,
        count = suggestions.len(),
        "Generated suggestions"
    );

    Ok(suggestions)
}

fn top_expenses(snapshot: &PeriodSnapshot) -> Option<Suggestion> {
    let mut expenses: Vec<(&str, Decimal)> = snapshot
        .aggregate
        .iter()
        .filter(|(_, total)| *total < Decimal::ZERO)
        .map(|(category, total)| (category, total.abs()))
        .collect();

    if expenses.is_empty() {
        return None;
    }

    // sort_by is stable: ties keep aggregate order
    expenses.sort_by(|a, b| b.1.cmp(&a.1));

    let listed: Vec<String> = expenses
        .iter()
        .take(TOP_EXPENSES_LIMIT)
        .map(|(category, amount)| format!("{} (R${})", category, format_amount(*amount)))
        .collect();

    Some(Suggestion::new(
        SuggestionKind::TopExpenses,
        format!("🔴 Maiores gastos: {}", listed.join(", ")),
    ))
}

fn spending_increases<S>(today: NaiveDate, store: &S) -> Result<Vec<Suggestion>>
where
    S: CategoryStore + ?Sized,
{
    let comparison = compare(&PeriodKey::MesPassado, &PeriodKey::EsteMes, today, store)?;

    Ok(comparison
        .per_category
        .iter()
        .filter(|c| {
            c.percent_variation.exceeds(SPENDING_INCREASE_THRESHOLD) && c.value_b < Decimal::ZERO
        })
        .map(|c| {
            Suggestion::new(
                SuggestionKind::SpendingIncrease,
                format!("⚠️ Aumento de {}% em {}", c.percent_variation.abs(), c.category),
            )
        })
        .collect())
}

fn recurring_costs(snapshot: &PeriodSnapshot) -> Vec<Suggestion> {
    RecurringCategory::all()
        .iter()
        .filter_map(|recurring| {
            let total = snapshot.aggregate.get(recurring.as_str())?;
            if total >= Decimal::ZERO {
                return None;
            }
            let saving = total.abs() * RECURRING_SAVING_RATE;
            Some(Suggestion::new(
                SuggestionKind::RecurringCost,
                format!(
                    "💡 Reveja gastos com {} - potencial economia de até {}",
                    recurring,
                    format_amount(saving)
                ),
            ))
        })
        .collect()
}
