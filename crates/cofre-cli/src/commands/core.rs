//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `load_config` - Resolve configuration from file, environment and flags
//! - `clock` - Pick the source of "today"
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database

use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use cofre_core::db::DB_KEY_ENV;
use cofre_core::{Category, Clock, Config, Database, FixedClock, SystemClock};
use rust_decimal::Decimal;
use tracing::debug;

/// Load config file, apply environment overrides, then the `--db` flag
pub fn load_config(config_path: Option<&Path>, db_override: Option<&Path>) -> Result<Config> {
    let mut config = Config::load(config_path)
        .context("Failed to load configuration")?
        .apply_env(|key| std::env::var(key).ok());

    if let Some(db) = db_override {
        config.db_path = db.to_path_buf();
    }

    debug!("Using database {}", config.db_path.display());
    Ok(config)
}

/// System clock unless `--today` pins the date
pub fn clock(today: Option<NaiveDate>) -> Box<dyn Clock> {
    match today {
        Some(date) => Box::new(FixedClock(date)),
        None => Box::new(SystemClock),
    }
}

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path.to_string_lossy();
    if no_encrypt {
        Database::new_unencrypted(&path_str).context("Failed to open database (unencrypted)")
    } else {
        let passphrase = std::env::var(DB_KEY_ENV).unwrap_or_default();
        Database::new(&path_str, &passphrase).context("Failed to open database")
    }
}

/// Parse a user-supplied amount; a comma is accepted as decimal separator
pub fn parse_amount(input: &str) -> Result<Decimal> {
    let trimmed = input.trim();
    let normalized = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };

    match Decimal::from_str(&normalized) {
        Ok(amount) => Ok(amount),
        Err(_) => bail!("Digite um valor numérico válido! ('{}')", input),
    }
}

/// Parse a `--category` flag against the known labels
pub fn parse_category_arg(label: &str) -> Result<Category> {
    label.parse::<Category>().map_err(|_| {
        let labels: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();
        anyhow::anyhow!(
            "Categoria desconhecida '{}'. Opções: {}",
            label,
            labels.join(", ")
        )
    })
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Inicializando banco de dados em {}...", db_path.display());

    let db = open_db(db_path, no_encrypt)?;
    let count = db.count_transactions()?;
    println!("   Transações registradas: {}", count);

    if no_encrypt {
        println!("   ⚠️  Criptografia: DESATIVADA (--no-encrypt)");
    } else {
        println!("   🔒 Criptografia: ATIVADA");
    }

    println!("✅ Banco de dados pronto!");
    println!();
    println!("Próximos passos:");
    println!("  1. Registrar transação: cofre add --amount -45.90 --description \"Supermercado\"");
    println!("  2. Ver relatório: cofre report --period este_mes");

    Ok(())
}
