//! Cofre CLI - Personal finance tracker
//!
//! Usage:
//!   cofre init                                Initialize database
//!   cofre add -a -45.90 -d "Supermercado"     Record a transaction
//!   cofre report --period mes_passado         Period report with suggestions
//!   cofre compare mes_passado este_mes        Compare two periods

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use cofre_core::{Classifier, Clock, NewTransaction, OllamaClassifier, PeriodKey};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref(), cli.db.as_deref())?;
    let clock = commands::clock(cli.today);
    let db_path = config.db_path.as_path();

    match cli.command {
        Commands::Init => commands::cmd_init(db_path, cli.no_encrypt),
        Commands::Add {
            amount,
            description,
            date,
            tags,
            category,
        } => {
            let db = commands::open_db(db_path, cli.no_encrypt)?;
            let amount = commands::parse_amount(&amount)?;
            let category = category.as_deref().map(commands::parse_category_arg).transpose()?;
            let date = date.unwrap_or_else(|| clock.today());

            let category = match category {
                Some(category) => category,
                None => {
                    let mut classifier = OllamaClassifier::new(&config.ollama)?;
                    classifier.verify_model().await;
                    classifier.classify(&description).await
                }
            };

            commands::cmd_add(
                &db,
                &NewTransaction {
                    date,
                    amount,
                    description,
                    category,
                    tags,
                },
            )
            .map(|_| ())
        }
        Commands::Transactions { limit } => {
            let db = commands::open_db(db_path, cli.no_encrypt)?;
            commands::cmd_transactions_list(&db, limit)
        }
        Commands::Report { period, json } => {
            let db = commands::open_db(db_path, cli.no_encrypt)?;
            commands::cmd_report(&db, &PeriodKey::parse(&period), clock.today(), json)
        }
        Commands::Compare {
            period_a,
            period_b,
            json,
        } => {
            let db = commands::open_db(db_path, cli.no_encrypt)?;
            commands::cmd_compare(
                &db,
                &PeriodKey::parse(&period_a),
                &PeriodKey::parse(&period_b),
                clock.today(),
                json,
            )
        }
        Commands::Categories => commands::cmd_categories(),
        Commands::Classify { description } => {
            let mut ollama = OllamaClassifier::new(&config.ollama)?;
            ollama.verify_model().await;
            commands::cmd_classify(&ollama, &description).await.map(|_| ())
        }
    }
}
