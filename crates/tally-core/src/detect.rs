//! Spending anomaly and waste detection
//!
//! Two independent passes over the current month's expenses:
//! - spikes: a category's total rose more than 30% over the previous
//!   calendar month
//! - waste: fixed heuristics for frequent dining out and heavy entertainment
//!   spending
//!
//! Thresholds are constants. Both passes report categories in the order
//! their first expense appears in the ledger.

use chrono::NaiveDate;
use tracing::debug;

use crate::aggregate::{
    category_amount, expenses_by_category, previous_month_key, transactions_in_month,
};
use crate::models::{month_key, SpendingSpike, Transaction, WastefulExpense};

/// Relative month-over-month increase that counts as a spike
pub const SPIKE_THRESHOLD: f64 = 0.30;

pub const FOOD_CATEGORY: &str = "Food & Dining";
/// More food transactions than this in one month is flagged
pub const FOOD_TRANSACTION_LIMIT: usize = 15;

pub const ENTERTAINMENT_CATEGORY: &str = "Entertainment";
/// Entertainment spending above this in one month is flagged
pub const ENTERTAINMENT_LIMIT: f64 = 300.0;

/// Categories whose spending this month exceeds last month's by more than 30%
///
/// Categories with nothing spent last month are skipped; there is no baseline
/// to compare against.
pub fn find_spending_spikes(transactions: &[Transaction], today: NaiveDate) -> Vec<SpendingSpike> {
    let current = expenses_by_category(&transactions_in_month(transactions, &month_key(today)));
    let previous =
        expenses_by_category(&transactions_in_month(transactions, &previous_month_key(today)));

    current
        .into_iter()
        .filter_map(|total| {
            let prior = category_amount(&previous, &total.category);
            if prior <= 0.0 {
                return None;
            }

            let increase = (total.amount - prior) / prior;
            if increase > SPIKE_THRESHOLD {
                debug!(
                    category = %total.category,
                    prior,
                    current = total.amount,
                    "Spending spike"
                );
                Some(SpendingSpike {
                    category: total.category,
                    previous: prior,
                    current: total.amount,
                    percent_increase: increase * 100.0,
                })
            } else {
                None
            }
        })
        .collect()
}

/// Spike alerts as display messages
pub fn detect_spending_spikes(transactions: &[Transaction], today: NaiveDate) -> Vec<String> {
    find_spending_spikes(transactions, today)
        .iter()
        .map(SpendingSpike::message)
        .collect()
}

/// Current-month categories matching the waste heuristics
pub fn detect_wasteful_expenses(
    transactions: &[Transaction],
    today: NaiveDate,
) -> Vec<WastefulExpense> {
    let month = transactions_in_month(transactions, &month_key(today));
    let mut wasteful = Vec::new();

    for total in expenses_by_category(&month) {
        if total.category == FOOD_CATEGORY {
            let count = month
                .iter()
                .filter(|t| t.is_expense() && t.category == FOOD_CATEGORY)
                .count();
            if count > FOOD_TRANSACTION_LIMIT {
                wasteful.push(WastefulExpense {
                    description: format!(
                        "{} food expenses this month. Consider meal planning.",
                        count
                    ),
                    category: total.category,
                    amount: total.amount,
                });
            }
        } else if total.category == ENTERTAINMENT_CATEGORY && total.amount > ENTERTAINMENT_LIMIT {
            wasteful.push(WastefulExpense {
                category: total.category,
                amount: total.amount,
                description: "High entertainment spending. Review subscriptions.".to_string(),
            });
        }
    }

    wasteful
}
