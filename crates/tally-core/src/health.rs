//! Financial health scoring
//!
//! A 0-100 score built from four independently capped parts, all evaluated
//! against the calendar month containing `today`:
//!
//! | part               | cap | source                                   |
//! |--------------------|-----|------------------------------------------|
//! | savings ratio      | 30  | current-month income vs expenses         |
//! | budget adherence   | 30  | current-month budgets over their limit   |
//! | expense volatility | 20  | 3-month trailing expense series          |
//! | goal consistency   | 20  | progress across all savings goals        |
//!
//! The raw parts are summed before rounding; each part is rounded on its own
//! only for display.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::aggregate::{monthly_trend, total_expenses, total_income, transactions_in_month};
use crate::goals::progress_percent;
use crate::ledger::LedgerSnapshot;
use crate::models::{month_key, round_half_up, Budget, FinancialHealthScore, SavingsGoal, Transaction};

pub const SAVINGS_RATIO_CAP: f64 = 30.0;
pub const BUDGET_ADHERENCE_CAP: f64 = 30.0;
pub const VOLATILITY_CAP: f64 = 20.0;
pub const GOAL_CONSISTENCY_CAP: f64 = 20.0;

/// Points lost for each current-month budget whose cached spend exceeds its limit
const OVER_BUDGET_PENALTY: f64 = 5.0;

/// Months in the volatility window
const VOLATILITY_MONTHS: usize = 3;

/// Unrounded score components
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HealthComponents {
    pub savings_ratio: f64,
    pub budget_adherence: f64,
    pub expense_volatility: f64,
    pub goal_consistency: f64,
}

impl HealthComponents {
    pub fn compute(snapshot: &LedgerSnapshot, today: NaiveDate) -> Self {
        let current_month = month_key(today);
        Self {
            savings_ratio: savings_ratio_score(&snapshot.transactions, &current_month),
            budget_adherence: budget_adherence_score(&snapshot.budgets, &current_month),
            expense_volatility: volatility_score(&snapshot.transactions, today),
            goal_consistency: goal_consistency_score(&snapshot.goals),
        }
    }

    pub fn raw_total(&self) -> f64 {
        self.savings_ratio + self.budget_adherence + self.expense_volatility + self.goal_consistency
    }

    /// Round for display; the total is rounded from the raw sum, then clamped to 0-100
    pub fn to_score(&self) -> FinancialHealthScore {
        let total = round_half_up(self.raw_total()).clamp(0, 100);
        FinancialHealthScore {
            score: total as i32,
            savings_ratio: round_half_up(self.savings_ratio) as i32,
            budget_adherence: round_half_up(self.budget_adherence) as i32,
            expense_volatility: round_half_up(self.expense_volatility) as i32,
            goal_consistency: round_half_up(self.goal_consistency) as i32,
        }
    }
}

/// Score a ledger snapshot as of `today`
pub fn calculate_health_score(snapshot: &LedgerSnapshot, today: NaiveDate) -> FinancialHealthScore {
    let components = HealthComponents::compute(snapshot, today);
    let score = components.to_score();

    debug!(
        savings_ratio = components.savings_ratio,
        budget_adherence = components.budget_adherence,
        expense_volatility = components.expense_volatility,
        goal_consistency = components.goal_consistency,
        score = score.score,
        "Financial health computed"
    );

    score
}

/// `min(30, savings / income * 100)`; 0 without income
///
/// Not floored: spending beyond income drives this negative and pulls the
/// total down with it.
pub fn savings_ratio_score(transactions: &[Transaction], month: &str) -> f64 {
    let in_month = transactions_in_month(transactions, month);
    let income = total_income(&in_month);
    let expenses = total_expenses(&in_month);

    if income > 0.0 {
        ((income - expenses) / income * 100.0).min(SAVINGS_RATIO_CAP)
    } else {
        0.0
    }
}

/// 30 minus 5 per current-month budget over its cached limit, floored at 0
pub fn budget_adherence_score(budgets: &[Budget], month: &str) -> f64 {
    let over = budgets
        .iter()
        .filter(|b| b.month == month && b.is_over_limit())
        .count();

    (BUDGET_ADHERENCE_CAP - OVER_BUDGET_PENALTY * over as f64).max(0.0)
}

/// `max(0, 20 - (variance / mean) * 10)` over the trailing 3-month expense series
pub fn volatility_score(transactions: &[Transaction], today: NaiveDate) -> f64 {
    let series: Vec<f64> = monthly_trend(transactions, VOLATILITY_MONTHS, today)
        .iter()
        .map(|p| p.expenses)
        .collect();

    (VOLATILITY_CAP - expense_volatility(&series) * 10.0).max(0.0)
}

/// Population variance divided by mean (index of dispersion); 0 when the mean is 0
pub fn expense_volatility(series: &[f64]) -> f64 {
    if series.is_empty() {
        return 0.0;
    }

    let n = series.len() as f64;
    let mean = series.iter().sum::<f64>() / n;
    if mean <= 0.0 {
        return 0.0;
    }

    let variance = series.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance / mean
}

/// Sum over goals of `min(progress / count, 20 / count)`; 0 with no goals
pub fn goal_consistency_score(goals: &[SavingsGoal]) -> f64 {
    if goals.is_empty() {
        return 0.0;
    }

    let count = goals.len() as f64;
    goals
        .iter()
        .map(|g| (progress_percent(g) / count).min(GOAL_CONSISTENCY_CAP / count))
        .sum()
}
