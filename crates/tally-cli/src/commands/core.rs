//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_ledger` - Shared utility to open the ledger database
//! - `run_startup` - Migration and recurrence pass run before every command
//! - `cmd_init` - Initialize the database
//! - `cmd_recur` - Run the recurrence generator explicitly

use std::fs;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tally_core::{
    db::Database, demo::seed_demo_data, migrate_recurring_intervals, Config, LedgerStore,
    Notifier, RecurrenceGenerator,
};
use tracing::debug;

use super::{money, truncate};

/// Open the ledger database named by the config, creating its directory
pub fn open_ledger(config: &Config) -> Result<Database> {
    fs::create_dir_all(&config.data_dir).with_context(|| {
        format!(
            "Failed to create data directory {}",
            config.data_dir.display()
        )
    })?;

    let path = config.database_path();
    let path_str = path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Database path is not valid UTF-8: {}", path.display()))?;
    Database::new(path_str).context("Failed to open database")
}

/// Backfill recurring intervals, then generate due occurrences
///
/// Generated expenses are checked against their budgets. Returns the number
/// of generated transactions.
pub fn run_startup(
    store: &dyn LedgerStore,
    notifier: &dyn Notifier,
    today: NaiveDate,
) -> Result<usize> {
    migrate_recurring_intervals(store).context("Failed to migrate recurring transactions")?;
    let generated = RecurrenceGenerator::new(store, notifier)
        .run(today)
        .context("Failed to generate recurring transactions")?;
    debug!("Startup recurrence pass generated {}", generated.len());
    Ok(generated.len())
}

pub fn cmd_init(db: &Database, demo: bool) -> Result<()> {
    println!("🔧 Initializing ledger at {}...", db.path());

    if demo {
        if seed_demo_data(db).context("Failed to seed demo data")? {
            println!("   Seeded demo transactions, budgets and goals");
        } else {
            println!("   Ledger already has data, demo data skipped");
        }
    }

    let transactions = db.list_transactions()?.len();
    let budgets = db.list_budgets()?.len();
    let goals = db.list_goals()?.len();
    println!(
        "   {} transactions, {} budgets, {} goals",
        transactions, budgets, goals
    );

    println!("✅ Ledger initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record spending: tally add --type expense --amount 12.50 --category \"Food & Dining\" --description Lunch");
    println!("  2. Set a budget:    tally budget set --category \"Food & Dining\" --limit 400");
    println!("  3. Check health:    tally report health");

    Ok(())
}

pub fn cmd_recur(
    store: &dyn LedgerStore,
    notifier: &dyn Notifier,
    today: NaiveDate,
    symbol: &str,
) -> Result<()> {
    println!("🔁 Checking recurring transactions...");

    let migrated =
        migrate_recurring_intervals(store).context("Failed to migrate recurring transactions")?;
    if migrated > 0 {
        println!("   Set monthly interval on {} older recurring transactions", migrated);
    }

    let generated = RecurrenceGenerator::new(store, notifier)
        .run(today)
        .context("Failed to generate recurring transactions")?;

    if generated.is_empty() {
        println!("   Nothing due.");
        return Ok(());
    }

    println!();
    for tx in &generated {
        println!(
            "   {} │ {:>8} │ {:>10} │ {}",
            tx.date,
            tx.transaction_type.as_str(),
            money(symbol, tx.amount),
            truncate(&tx.description, 40)
        );
    }
    println!();
    println!("✅ Created {} recurring transactions", generated.len());

    Ok(())
}
