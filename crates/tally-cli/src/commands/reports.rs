//! Report command implementations

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tally_core::aggregate::{
    expenses_by_category, filter_by_date_range, largest_expense, monthly_trend, total_expenses,
    total_income,
};
use tally_core::detect::{detect_wasteful_expenses, find_spending_spikes};
use tally_core::{calculate_health_score, LedgerSnapshot, LedgerStore, Period};

use super::{money, progress_bar, truncate};

fn health_label(score: i32) -> &'static str {
    match score {
        80.. => "Excellent",
        60..=79 => "Good",
        40..=59 => "Fair",
        _ => "Needs attention",
    }
}

pub fn cmd_report_health(store: &dyn LedgerStore, today: NaiveDate, json: bool) -> Result<()> {
    let snapshot = LedgerSnapshot::load(store)?;
    let health = calculate_health_score(&snapshot, today);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&health).context("Failed to serialize health score")?
        );
        return Ok(());
    }

    println!();
    println!("❤️  Financial Health: {}/100 ({})", health.score, health_label(health.score));
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Savings ratio       {:>4} / 30", health.savings_ratio);
    println!("   Budget adherence    {:>4} / 30", health.budget_adherence);
    println!("   Expense stability   {:>4} / 20", health.expense_volatility);
    println!("   Goal progress       {:>4} / 20", health.goal_consistency);

    if health.savings_ratio < 0 {
        println!();
        println!("   ⚠️  You spent more than you earned this month.");
    }

    Ok(())
}

pub fn cmd_report_trend(
    store: &dyn LedgerStore,
    months: usize,
    today: NaiveDate,
    symbol: &str,
) -> Result<()> {
    if months == 0 {
        anyhow::bail!("--months must be at least 1");
    }

    let transactions = store.list_transactions()?;
    let trend = monthly_trend(&transactions, months, today);

    println!();
    println!("📈 Monthly Trend ({} months)", months);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:10} │ {:>12} │ {:>12} │ {:>12}",
        "Month", "Income", "Expenses", "Net"
    );
    println!("   ───────────┼──────────────┼──────────────┼──────────────");

    for point in &trend {
        let net = point.income - point.expenses;
        let net_str = if net < 0.0 {
            format!("\x1b[31m{:>12}\x1b[0m", money(symbol, net))
        } else {
            format!("{:>12}", money(symbol, net))
        };
        println!(
            "   {:10} │ {:>12} │ {:>12} │ {}",
            point.label,
            money(symbol, point.income),
            money(symbol, point.expenses),
            net_str
        );
    }

    Ok(())
}

pub fn cmd_report_categories(
    store: &dyn LedgerStore,
    period: &str,
    today: NaiveDate,
    symbol: &str,
) -> Result<()> {
    let period: Period = period.parse().map_err(anyhow::Error::msg)?;
    let (from, to) = period.date_range(today);

    let transactions = filter_by_date_range(&store.list_transactions()?, from, to);
    let breakdown = expenses_by_category(&transactions);

    println!();
    println!("📊 Spending by Category ({})", period);
    println!("   Period: {} to {}", from, to);
    println!("   ─────────────────────────────────────────────────────────────");

    if breakdown.is_empty() {
        println!("   No spending found in this period.");
        return Ok(());
    }

    let total = total_expenses(&transactions);
    println!(
        "   Income: {}   Expenses: {}",
        money(symbol, total_income(&transactions)),
        money(symbol, total)
    );
    println!();

    for category in &breakdown {
        let share = if total > 0.0 {
            category.amount / total * 100.0
        } else {
            0.0
        };
        println!(
            "   {:20} │ {:>12} │ {} {:>5.1}%",
            truncate(&category.category, 20),
            money(symbol, category.amount),
            progress_bar(share, 12),
            share
        );
    }

    if let Some(largest) = largest_expense(&transactions) {
        println!();
        println!(
            "   Largest expense: {} \"{}\" on {}",
            money(symbol, largest.amount),
            truncate(&largest.description, 30),
            largest.date
        );
    }

    Ok(())
}

pub fn cmd_report_spikes(store: &dyn LedgerStore, today: NaiveDate, symbol: &str) -> Result<()> {
    let transactions = store.list_transactions()?;
    let spikes = find_spending_spikes(&transactions, today);

    if spikes.is_empty() {
        println!("✅ No spending spikes compared to last month.");
        return Ok(());
    }

    println!();
    println!("📈 Spending Spikes");
    println!("   ─────────────────────────────────────────────────────────────");
    for spike in &spikes {
        println!("   ⚠️  {}", spike.message());
        println!(
            "      {} last month → {} this month",
            money(symbol, spike.previous),
            money(symbol, spike.current)
        );
    }

    Ok(())
}

pub fn cmd_report_waste(store: &dyn LedgerStore, today: NaiveDate, symbol: &str) -> Result<()> {
    let transactions = store.list_transactions()?;
    let wasteful = detect_wasteful_expenses(&transactions, today);

    if wasteful.is_empty() {
        println!("✅ No wasteful spending patterns this month.");
        return Ok(());
    }

    println!();
    println!("💸 Spending to Review");
    println!("   ─────────────────────────────────────────────────────────────");
    for item in &wasteful {
        println!("   {} ({})", item.category, money(symbol, item.amount));
        println!("      💡 {}", item.description);
    }

    Ok(())
}
