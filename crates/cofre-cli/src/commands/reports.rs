//! Report command implementations
//!
//! Rendering is split from printing so the output can be asserted on.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use cofre_core::{
    advise, aggregate, compare, format_currency, ComparisonResult, Database, PeriodKey,
    PeriodSnapshot, Suggestion, TotalDelta,
};

/// Period report: totals, per-category distribution and suggestions
pub fn cmd_report(db: &Database, period: &PeriodKey, today: NaiveDate, json: bool) -> Result<()> {
    let snapshot = aggregate(period, today, db).context("Erro ao gerar relatório")?;
    let suggestions = advise(&snapshot, today, db).context("Erro ao gerar relatório")?;

    if json {
        let output = report_json(&snapshot, &suggestions);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", render_report(&snapshot, &suggestions));
    Ok(())
}

/// `--json` shape of a report
pub fn report_json(snapshot: &PeriodSnapshot, suggestions: &[Suggestion]) -> serde_json::Value {
    serde_json::json!({
        "snapshot": snapshot,
        "suggestions": suggestions,
    })
}

pub fn render_report(snapshot: &PeriodSnapshot, suggestions: &[Suggestion]) -> String {
    let mut lines = vec![
        String::new(),
        format!("📈 Relatório - {}", snapshot.period),
        format!(
            "   Período: {} ({} dias)",
            snapshot.range,
            snapshot.range.num_days()
        ),
        format!("🔹 Total de Ganhos: {}", format_currency(snapshot.total_income)),
        format!("🔸 Total de Gastos: {}", format_currency(snapshot.total_expense)),
        format!("   Saldo: {}", format_currency(snapshot.balance())),
        String::new(),
        "📊 Distribuição por Categoria:".to_string(),
    ];

    if snapshot.aggregate.is_empty() {
        lines.push("   Nenhuma transação no período.".to_string());
    }
    for (category, total) in snapshot.aggregate.iter() {
        lines.push(format!("- {}: {}", category, format_currency(total)));
    }

    lines.push(String::new());
    lines.push("💡 Sugestões:".to_string());
    for suggestion in suggestions {
        lines.push(format!("  {}", suggestion));
    }

    lines.join("\n")
}

/// Compare two periods category by category
pub fn cmd_compare(
    db: &Database,
    period_a: &PeriodKey,
    period_b: &PeriodKey,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let result = compare(period_a, period_b, today, db).context("Erro ao gerar comparativo")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", render_comparison(&result));
    Ok(())
}

pub fn render_comparison(result: &ComparisonResult) -> String {
    let (a, b) = &result.periods;

    let mut lines = vec![
        String::new(),
        format!("📊 Comparativo entre {} e {}", a, b),
        String::new(),
        "🔍 Por Categoria:".to_string(),
    ];
    if result.per_category.is_empty() {
        lines.push("   Nenhuma transação nos períodos.".to_string());
    }
    for row in &result.per_category {
        lines.push(format!("- {}:", row.category));
        lines.push(format!("  {}: {}", a, format_currency(row.value_a)));
        lines.push(format!("  {}: {}", b, format_currency(row.value_b)));
        lines.push(format!(
            "  Variação: {} ({}%)",
            format_currency(row.difference),
            row.percent_variation
        ));
    }

    lines.push(String::new());
    lines.push("📈 Resumo Geral:".to_string());
    push_delta(&mut lines, "Total de gastos", a, b, &result.summary.total_expense);
    push_delta(&mut lines, "Total de ganhos", a, b, &result.summary.total_income);

    lines.join("\n")
}

fn push_delta(lines: &mut Vec<String>, label: &str, a: &PeriodKey, b: &PeriodKey, delta: &TotalDelta) {
    lines.push(format!("{}:", label));
    lines.push(format!("  {}: {}", a, format_currency(delta.a)));
    lines.push(format!("  {}: {}", b, format_currency(delta.b)));
    lines.push(format!("  Diferença: {}", format_currency(delta.difference)));
}
