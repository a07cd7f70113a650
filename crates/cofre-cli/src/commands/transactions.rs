//! Transaction command implementations

use anyhow::{Context, Result};
use cofre_core::{format_currency, Database, NewTransaction};

use super::truncate;

/// Record a transaction that already carries its category
pub fn cmd_add(db: &Database, tx: &NewTransaction) -> Result<String> {
    let id = db
        .insert_transaction(tx)
        .context("Erro ao registrar transação")?
        .to_string();

    println!("✅ Transação registrada como '{}'", tx.category);
    println!(
        "   {} | {} | {}",
        tx.date,
        format_currency(tx.amount),
        short_id(&id)
    );

    Ok(id)
}

pub fn cmd_transactions_list(db: &Database, limit: i64) -> Result<()> {
    let transactions = db.list_transactions(limit)?;

    if transactions.is_empty() {
        println!("Nenhuma transação registrada.");
        return Ok(());
    }

    println!(
        "{:10}  {:>14}  {:14}  {}",
        "Data", "Valor", "Categoria", "Descrição"
    );
    println!("{}", "─".repeat(70));

    for tx in &transactions {
        println!(
            "{:10}  {:>14}  {:14}  {}",
            tx.date.to_string(),
            format_currency(tx.amount),
            truncate(&tx.category, 14),
            truncate(&tx.description, 40)
        );
    }

    println!();
    println!("Mostrando {} transações", transactions.len());

    Ok(())
}

/// First block of an id, enough to tell rows apart on screen
fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}
