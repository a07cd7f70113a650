//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Cofre - Personal finance tracker
#[derive(Parser)]
#[command(name = "cofre")]
#[command(about = "Gerenciador financeiro pessoal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (overrides config file and COFRE_DB)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file (defaults to ~/.local/share/cofre/config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set COFRE_DB_KEY environment variable with your passphrase.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    /// Use this date as "today" (YYYY-MM-DD) when resolving periods
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record a transaction, classifying its description
    Add {
        /// Amount (negative for expenses), e.g. -45.90 or -45,90
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,

        /// Description used for classification
        #[arg(short, long)]
        description: String,

        /// Transaction date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Free-form tags
        #[arg(long)]
        tags: Option<String>,

        /// Skip classification and use this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List recent transactions
    Transactions {
        /// Maximum number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },

    /// Period report: totals, category distribution and suggestions
    Report {
        /// Period: este_mes, mes_passado, este_ano, 30_dias
        #[arg(short, long, default_value = "este_mes")]
        period: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare two periods category by category
    Compare {
        /// First period
        period_a: String,

        /// Second period
        period_b: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the available categories
    Categories,

    /// Classify a description without recording it
    Classify {
        /// Description to classify
        description: String,
    },
}
