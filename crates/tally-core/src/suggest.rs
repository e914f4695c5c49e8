//! Budget suggestions from recent spending

use chrono::{Months, NaiveDate};
use tracing::debug;

use crate::models::{round_half_up, Transaction};

/// Suggested limit for a category with no recent expenses
pub const DEFAULT_SUGGESTION: f64 = 500.0;

/// Trailing window the suggestion averages over
const LOOKBACK_MONTHS: u32 = 3;

/// Headroom added on top of the monthly average
const BUFFER: f64 = 1.10;

/// Suggest a monthly limit for `category`: the trailing 3-month average plus
/// 10%, rounded to a whole amount
///
/// The window opens the day after `today` minus three months (clamped to
/// month end) and has no upper bound, so future-dated expenses count too.
pub fn suggest_budget(transactions: &[Transaction], category: &str, today: NaiveDate) -> f64 {
    let since = today
        .checked_sub_months(Months::new(LOOKBACK_MONTHS))
        .unwrap_or(NaiveDate::MIN);

    let recent: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.is_expense() && t.category == category && t.date > since)
        .collect();

    if recent.is_empty() {
        debug!(category, "No recent expenses, using default suggestion");
        return DEFAULT_SUGGESTION;
    }

    let total: f64 = recent.iter().map(|t| t.amount).sum();
    let average = total / LOOKBACK_MONTHS as f64;
    round_half_up(average * BUFFER) as f64
}
