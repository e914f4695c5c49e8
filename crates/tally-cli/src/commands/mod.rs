//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - init, startup recurrence pass, `recur`, and shared utilities (open_ledger)
//! - `transactions` - add, list, edit, delete
//! - `budgets` - budget set/list/suggest/refresh
//! - `goals` - savings goal commands
//! - `reports` - health, trend, categories, spikes, waste
//! - `export` - CSV export

pub mod budgets;
pub mod core;
pub mod export;
pub mod goals;
pub mod reports;
pub mod transactions;

// Re-export command functions for main.rs
pub use budgets::*;
pub use self::core::*;
pub use export::*;
pub use goals::*;
pub use reports::*;
pub use transactions::*;

use anyhow::{Context, Result};
use chrono::NaiveDate;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Parse a YYYY-MM-DD date argument
pub fn parse_date(value: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid {} date '{}' (use YYYY-MM-DD)", flag, value))
}

/// Split a comma-separated tag list, dropping blanks
pub fn parse_tags(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reject zero, negative and non-finite amounts
pub fn ensure_positive(amount: f64, what: &str) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        anyhow::bail!("{} must be a positive number, got {}", what, amount);
    }
    Ok(())
}

/// Format an amount with the configured currency symbol
pub fn money(symbol: &str, amount: f64) -> String {
    if amount < 0.0 {
        format!("-{}{:.2}", symbol, amount.abs())
    } else {
        format!("{}{:.2}", symbol, amount)
    }
}

/// Fixed-width progress bar for a percentage
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
