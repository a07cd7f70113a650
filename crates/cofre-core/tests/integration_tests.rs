//! Integration tests for cofre-core
//!
//! These tests exercise the full classify → record → report → compare workflow.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use cofre_core::{
    advise, aggregate, compare, format_currency, resolve, Category, Classifier, Database,
    MockClassifier, NewTransaction, PeriodKey, SuggestionKind, Variation,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    date(2024, 3, 15)
}

/// February and March 2024 for a household
/// (date, amount, description)
fn household() -> Vec<(NaiveDate, Decimal, &'static str)> {
    vec![
        (date(2024, 2, 1), dec!(6000.00), "Salário fevereiro"),
        (date(2024, 2, 5), dec!(-1800.00), "Aluguel fevereiro"),
        (date(2024, 2, 10), dec!(-420.30), "Supermercado Extra"),
        (date(2024, 2, 18), dec!(-150.00), "Uber trabalho"),
        (date(2024, 3, 1), dec!(6000.00), "Salário março"),
        (date(2024, 3, 5), dec!(-1800.00), "Aluguel março"),
        (date(2024, 3, 8), dec!(-610.45), "Supermercado Extra"),
        (date(2024, 3, 9), dec!(-95.50), "Restaurante japonês"),
        (date(2024, 3, 12), dec!(-80.00), "Cinema com amigos"),
        (date(2024, 3, 14), dec!(-260.00), "Uber aeroporto"),
    ]
}

async fn seeded_db() -> Database {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    let classifier = MockClassifier::new();

    for (on, amount, description) in household() {
        let category = classifier.classify(description).await;
        db.insert_transaction(&NewTransaction {
            date: on,
            amount,
            description: description.to_string(),
            category,
            tags: None,
        })
        .expect("Failed to insert transaction");
    }
    db
}

#[tokio::test]
async fn test_classified_transactions_are_recorded() {
    let db = seeded_db().await;
    assert_eq!(db.count_transactions().unwrap(), 10);

    let recent = db.list_transactions(1).unwrap();
    assert_eq!(recent[0].description, "Uber aeroporto");
    assert_eq!(recent[0].category, Category::Transporte.as_str());
}

#[tokio::test]
async fn test_current_month_report() {
    let db = seeded_db().await;
    let snapshot = aggregate(&PeriodKey::EsteMes, today(), &db).unwrap();

    assert_eq!(snapshot.range, resolve(&PeriodKey::EsteMes, today()));
    assert_eq!(snapshot.aggregate.get("Alimentação"), Some(dec!(-705.95)));
    assert_eq!(snapshot.aggregate.get("Lazer"), Some(dec!(-80)));
    assert_eq!(snapshot.total_income, dec!(6000));
    assert_eq!(snapshot.total_expense, dec!(2845.95));
    assert_eq!(format_currency(snapshot.total_expense), "R$ 2845.95");

    let suggestions = advise(&snapshot, today(), &db).unwrap();
    let texts: Vec<&str> = suggestions.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "🔴 Maiores gastos: Moradia (R$1800.00), Alimentação (R$705.95), Transporte (R$260.00)",
            "💡 Reveja gastos com Moradia - potencial economia de até 270.00",
            "💡 Reveja gastos com Transporte - potencial economia de até 39.00",
        ]
    );
}

#[tokio::test]
async fn test_month_over_month_comparison() {
    let db = seeded_db().await;
    let result = compare(&PeriodKey::MesPassado, &PeriodKey::EsteMes, today(), &db).unwrap();

    let food = result.get("Alimentação").unwrap();
    assert_eq!(food.value_a, dec!(-420.30));
    assert_eq!(food.value_b, dec!(-705.95));
    assert_eq!(food.difference, dec!(-285.65));

    let leisure = result.get("Lazer").unwrap();
    assert_eq!(leisure.value_a, Decimal::ZERO);
    assert_eq!(leisure.percent_variation, Variation::Infinite);

    let housing = result.get("Moradia").unwrap();
    assert_eq!(housing.percent_variation, Variation::Percent(Decimal::ZERO));

    assert_eq!(result.summary.total_expense.a, dec!(2370.30));
    assert_eq!(result.summary.total_expense.b, dec!(2845.95));
    assert_eq!(result.summary.total_income.difference, Decimal::ZERO);
}

#[tokio::test]
async fn test_last_month_report_flags_new_expenses() {
    let db = seeded_db().await;
    let snapshot = aggregate(&PeriodKey::MesPassado, today(), &db).unwrap();
    let suggestions = advise(&snapshot, today(), &db).unwrap();

    let kinds: Vec<SuggestionKind> = suggestions.iter().map(|s| s.kind).collect();
    assert_eq!(kinds[0], SuggestionKind::TopExpenses);
    assert!(kinds.contains(&SuggestionKind::SpendingIncrease));
    assert_eq!(*kinds.last().unwrap(), SuggestionKind::RecurringCost);

    let warnings: Vec<&str> = suggestions
        .iter()
        .filter(|s| s.kind == SuggestionKind::SpendingIncrease)
        .map(|s| s.text.as_str())
        .collect();
    assert_eq!(warnings, vec!["⚠️ Aumento de inf% em Lazer"]);
}

#[tokio::test]
async fn test_unknown_period_uses_trailing_window() {
    let db = seeded_db().await;
    let snapshot = aggregate(&PeriodKey::parse("semana"), today(), &db).unwrap();

    // 2024-02-14 through 2024-03-15
    assert_eq!(snapshot.range.start, date(2024, 2, 14));
    assert_eq!(snapshot.aggregate.get("Transporte"), Some(dec!(-410)));
    assert!(snapshot.aggregate.get("Moradia").is_some());
}
