//! Savings goal command implementations

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tally_core::goals::{days_left, is_complete, monthly_required, progress_percent, remaining};
use tally_core::{LedgerService, LedgerStore, NewGoal, Notifier, SavingsGoal};

use super::{ensure_positive, money, parse_date, progress_bar, truncate};

#[allow(clippy::too_many_arguments)]
pub fn cmd_goal_add(
    store: &dyn LedgerStore,
    notifier: &dyn Notifier,
    name: &str,
    target: f64,
    current: f64,
    deadline: &str,
    today: NaiveDate,
    symbol: &str,
) -> Result<SavingsGoal> {
    ensure_positive(target, "Target")?;
    if !current.is_finite() || current < 0.0 {
        anyhow::bail!("Current amount cannot be negative, got {}", current);
    }
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Goal name cannot be empty");
    }
    let deadline = parse_date(deadline, "--deadline")?;

    let goal = LedgerService::new(store, notifier)
        .add_goal(
            NewGoal {
                name: name.to_string(),
                target_amount: target,
                current_amount: current,
                deadline,
            },
            today,
        )
        .context("Failed to add goal")?;

    println!(
        "🎯 Created goal \"{}\": {} by {}",
        goal.name,
        money(symbol, goal.target_amount),
        goal.deadline
    );
    println!("   ID: {}", goal.id);
    Ok(goal)
}

pub fn cmd_goal_fund(
    store: &dyn LedgerStore,
    notifier: &dyn Notifier,
    id: &str,
    amount: f64,
    symbol: &str,
) -> Result<SavingsGoal> {
    ensure_positive(amount, "Amount")?;

    let goal = LedgerService::new(store, notifier)
        .add_funds(id, amount)
        .with_context(|| format!("Failed to add funds to goal {}", id))?;

    println!(
        "✅ Added {} to \"{}\" ({} / {}, {:.0}%)",
        money(symbol, amount),
        goal.name,
        money(symbol, goal.current_amount),
        money(symbol, goal.target_amount),
        progress_percent(&goal)
    );
    if is_complete(&goal) {
        println!("🎉 Goal reached!");
    }
    Ok(goal)
}

pub fn cmd_goal_list(store: &dyn LedgerStore, today: NaiveDate, symbol: &str) -> Result<()> {
    let goals = store.list_goals()?;

    if goals.is_empty() {
        println!("No savings goals yet. Create one with:");
        println!("  tally goal add --name \"Emergency Fund\" --target 10000 --deadline 2026-12-31");
        return Ok(());
    }

    println!();
    println!("🎯 Savings Goals");
    println!("   ─────────────────────────────────────────────────────────────");

    for goal in &goals {
        let progress = progress_percent(goal);
        println!(
            "   {:24} {} {:>5.1}%  {} / {}",
            truncate(&goal.name, 24),
            progress_bar(progress, 16),
            progress,
            money(symbol, goal.current_amount),
            money(symbol, goal.target_amount)
        );

        if is_complete(goal) {
            println!("     🎉 Complete");
        } else {
            let days = days_left(goal, today);
            let timing = if days < 0 {
                format!("\x1b[31m{} days overdue\x1b[0m", -days)
            } else {
                format!("{} days left", days)
            };
            println!(
                "     {} to go │ {} │ save {}/month",
                money(symbol, remaining(goal)),
                timing,
                money(symbol, monthly_required(goal, today))
            );
        }
        println!("     \x1b[2m{}\x1b[0m", goal.id);
    }

    Ok(())
}

pub fn cmd_goal_delete(store: &dyn LedgerStore, notifier: &dyn Notifier, id: &str) -> Result<()> {
    LedgerService::new(store, notifier)
        .delete_goal(id)
        .with_context(|| format!("Goal {} not found", id))?;
    println!("🗑️  Deleted goal {}", id);
    Ok(())
}
