//! Budget command implementations

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tally_core::{
    models::month_key, suggest::suggest_budget, LedgerService, LedgerStore, Notifier,
};

use super::{ensure_positive, money, progress_bar, truncate};

pub fn cmd_budget_set(
    store: &dyn LedgerStore,
    notifier: &dyn Notifier,
    category: &str,
    limit: f64,
    today: NaiveDate,
    symbol: &str,
) -> Result<()> {
    ensure_positive(limit, "Limit")?;

    let budget = LedgerService::new(store, notifier)
        .set_budget(category.trim(), limit, today)
        .context("Failed to set budget")?;

    println!(
        "✅ {} budget for {}: {} (spent so far {})",
        budget.category,
        budget.month,
        money(symbol, budget.limit),
        money(symbol, budget.spent)
    );
    Ok(())
}

pub fn cmd_budget_list(store: &dyn LedgerStore, today: NaiveDate, symbol: &str) -> Result<()> {
    let mut budgets = store.list_budgets()?;

    if budgets.is_empty() {
        println!("No budgets yet. Create one with:");
        println!("  tally budget set --category \"Food & Dining\" --limit 400");
        return Ok(());
    }

    // Newest month first, then by category
    budgets.sort_by(|a, b| b.month.cmp(&a.month).then_with(|| a.category.cmp(&b.category)));
    let current = month_key(today);

    println!();
    println!("💰 Budgets");
    println!("   ─────────────────────────────────────────────────────────────");

    for budget in &budgets {
        let percent = budget.percent_used();
        let status = if budget.is_over_limit() {
            format!(
                "\x1b[31mover by {}\x1b[0m",
                money(symbol, budget.spent - budget.limit)
            )
        } else {
            format!("{} left", money(symbol, budget.limit - budget.spent))
        };
        let marker = if budget.month == current { "*" } else { " " };

        println!(
            "  {}{} │ {:18} │ {} {:>5.1}% │ {} / {} │ {}",
            marker,
            budget.month,
            truncate(&budget.category, 18),
            progress_bar(percent, 10),
            percent,
            money(symbol, budget.spent),
            money(symbol, budget.limit),
            status
        );
    }

    println!();
    println!("   * current month. Run 'tally budget refresh' to recompute spending.");
    Ok(())
}

pub fn cmd_budget_suggest(
    store: &dyn LedgerStore,
    category: &str,
    today: NaiveDate,
    symbol: &str,
) -> Result<f64> {
    let transactions = store.list_transactions()?;
    let suggested = suggest_budget(&transactions, category, today);

    println!(
        "💡 Suggested monthly budget for {}: {}",
        category,
        money(symbol, suggested)
    );
    println!("   Based on the last 3 months of spending plus 10%.");
    println!(
        "   Apply it with: tally budget set --category \"{}\" --limit {}",
        category, suggested
    );
    Ok(suggested)
}

pub fn cmd_budget_refresh(
    store: &dyn LedgerStore,
    notifier: &dyn Notifier,
    today: NaiveDate,
) -> Result<()> {
    let changed = LedgerService::new(store, notifier)
        .refresh_budget_spent(today)
        .context("Failed to refresh budgets")?;

    if changed == 0 {
        println!("✅ Budgets for {} are up to date", month_key(today));
    } else {
        println!("✅ Refreshed spending on {} budgets for {}", changed, month_key(today));
    }
    Ok(())
}
