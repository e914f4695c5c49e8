//! Transaction command implementations

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tally_core::{
    LedgerService, LedgerStore, NewTransaction, Notifier, RecurringInterval, Transaction,
    TransactionType,
};

use super::{ensure_positive, money, parse_date, parse_tags, truncate};
use crate::cli::{AddArgs, EditArgs};

fn parse_type(value: &str) -> Result<TransactionType> {
    value.parse::<TransactionType>().map_err(anyhow::Error::msg)
}

fn parse_interval(value: &str) -> Result<RecurringInterval> {
    value.parse::<RecurringInterval>().map_err(anyhow::Error::msg)
}

/// Validate command-line input into a new transaction
pub fn build_new_transaction(args: &AddArgs, today: NaiveDate) -> Result<NewTransaction> {
    let transaction_type = parse_type(&args.kind)?;
    ensure_positive(args.amount, "Amount")?;

    let category = args.category.trim();
    if category.is_empty() {
        anyhow::bail!("Category cannot be empty");
    }

    let date = match args.date.as_deref() {
        Some(d) => parse_date(d, "--date")?,
        None => today,
    };

    let recurring_interval = if args.recurring {
        Some(match args.interval.as_deref() {
            Some(i) => parse_interval(i)?,
            None => RecurringInterval::default(),
        })
    } else {
        None
    };

    Ok(NewTransaction {
        transaction_type,
        amount: args.amount,
        category: category.to_string(),
        description: args.description.trim().to_string(),
        date,
        tags: args.tags.as_deref().map(parse_tags).unwrap_or_default(),
        is_recurring: args.recurring,
        recurring_interval,
        receipt_reference: args.receipt.clone(),
    })
}

pub fn cmd_add(
    store: &dyn LedgerStore,
    notifier: &dyn Notifier,
    args: &AddArgs,
    today: NaiveDate,
    symbol: &str,
) -> Result<Transaction> {
    let new = build_new_transaction(args, today)?;
    let tx = LedgerService::new(store, notifier)
        .add_transaction(new)
        .context("Failed to add transaction")?;

    println!(
        "✅ Added {} of {} in {} on {}",
        tx.transaction_type,
        money(symbol, tx.amount),
        tx.category,
        tx.date
    );
    if let Some(interval) = tx.recurring_interval {
        println!("   Repeats {}", interval);
    }
    println!("   ID: {}", tx.id);

    Ok(tx)
}

/// Filters for `tally list`
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub kind: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub limit: usize,
}

/// Apply a list filter, newest first
pub fn filter_transactions(
    mut transactions: Vec<Transaction>,
    filter: &ListFilter,
) -> Result<Vec<Transaction>> {
    let kind = filter.kind.as_deref().map(parse_type).transpose()?;
    let search = filter.search.as_deref().map(str::to_lowercase);

    transactions.retain(|t| {
        if kind.is_some_and(|k| t.transaction_type != k) {
            return false;
        }
        if let Some(category) = &filter.category {
            if !t.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        match &search {
            Some(q) => {
                t.description.to_lowercase().contains(q)
                    || t.category.to_lowercase().contains(q)
                    || t.tags.iter().any(|tag| tag.to_lowercase().contains(q))
            }
            None => true,
        }
    });

    transactions.sort_by(|a, b| b.date.cmp(&a.date));
    transactions.truncate(filter.limit);
    Ok(transactions)
}

pub fn cmd_list(store: &dyn LedgerStore, filter: &ListFilter, json: bool, symbol: &str) -> Result<()> {
    let transactions = filter_transactions(store.list_transactions()?, filter)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&transactions).context("Failed to serialize transactions")?
        );
        return Ok(());
    }

    if transactions.is_empty() {
        println!("No transactions found. Add one with:");
        println!("  tally add --type expense --amount 12.50 --category Other --description Coffee");
        return Ok(());
    }

    println!();
    println!("📝 Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in &transactions {
        let amount_str = if tx.is_expense() {
            format!("\x1b[31m-{}\x1b[0m", money(symbol, tx.amount)) // Red for expenses
        } else {
            format!("\x1b[32m+{}\x1b[0m", money(symbol, tx.amount)) // Green for income
        };
        let recurring = if tx.is_recurring { " 🔁" } else { "" };

        println!(
            "   {} │ {:>20} │ {:18} │ {}{}",
            tx.date,
            amount_str,
            truncate(&tx.category, 18),
            truncate(&tx.description, 35),
            recurring
        );
        println!("     \x1b[2m{}\x1b[0m", tx.id);
    }

    Ok(())
}

/// Apply edit flags on top of an existing transaction
pub fn apply_edit(existing: Transaction, args: &EditArgs) -> Result<Transaction> {
    let mut tx = existing;

    if let Some(kind) = &args.kind {
        tx.transaction_type = parse_type(kind)?;
    }
    if let Some(amount) = args.amount {
        ensure_positive(amount, "Amount")?;
        tx.amount = amount;
    }
    if let Some(category) = &args.category {
        let category = category.trim();
        if category.is_empty() {
            anyhow::bail!("Category cannot be empty");
        }
        tx.category = category.to_string();
    }
    if let Some(description) = &args.description {
        tx.description = description.trim().to_string();
    }
    if let Some(date) = &args.date {
        tx.date = parse_date(date, "--date")?;
    }
    if let Some(tags) = &args.tags {
        tx.tags = parse_tags(tags);
    }
    if let Some(recurring) = args.recurring {
        tx.is_recurring = recurring;
    }
    if let Some(interval) = &args.interval {
        tx.recurring_interval = Some(parse_interval(interval)?);
    }

    // Interval only means something on a recurring transaction
    if !tx.is_recurring {
        tx.recurring_interval = None;
    } else if tx.recurring_interval.is_none() {
        tx.recurring_interval = Some(RecurringInterval::default());
    }

    Ok(tx)
}

pub fn cmd_edit(store: &dyn LedgerStore, notifier: &dyn Notifier, args: &EditArgs) -> Result<Transaction> {
    let service = LedgerService::new(store, notifier);
    let existing = service
        .get_transaction(&args.id)
        .with_context(|| format!("Transaction {} not found", args.id))?;

    let updated = apply_edit(existing, args)?;
    let saved = service
        .update_transaction(&args.id, updated)
        .context("Failed to update transaction")?;

    println!("✅ Updated transaction {}", saved.id);
    Ok(saved)
}

pub fn cmd_delete(store: &dyn LedgerStore, notifier: &dyn Notifier, id: &str) -> Result<()> {
    let service = LedgerService::new(store, notifier);
    let tx = service
        .get_transaction(id)
        .with_context(|| format!("Transaction {} not found", id))?;

    service.delete_transaction(id)?;
    println!(
        "🗑️  Deleted {} \"{}\" ({})",
        tx.transaction_type, tx.description, tx.date
    );
    Ok(())
}
