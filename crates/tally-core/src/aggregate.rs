//! Aggregation engine
//!
//! Pure functions over a transaction list: totals by type, expense breakdown
//! by category and multi-month income/expense trends.
//!
//! Month membership is decided by the `YYYY-MM` month key of each
//! transaction's date, never by a parsed date range. Dates are always ISO
//! calendar days, so the key is exactly the date string's 7-character prefix.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{month_key, CategoryTotal, Transaction, TransactionType, TrendPoint};

/// Sum of `amount` over transactions of the given type
pub fn total_by_type(transactions: &[Transaction], transaction_type: TransactionType) -> f64 {
    transactions
        .iter()
        .filter(|t| t.transaction_type == transaction_type)
        .map(|t| t.amount)
        .sum()
}

pub fn total_income(transactions: &[Transaction]) -> f64 {
    total_by_type(transactions, TransactionType::Income)
}

pub fn total_expenses(transactions: &[Transaction]) -> f64 {
    total_by_type(transactions, TransactionType::Expense)
}

/// Expense totals per category, in order of each category's first expense
///
/// Categories that only carry income never appear.
pub fn expenses_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for tx in transactions.iter().filter(|t| t.is_expense()) {
        match totals.iter_mut().find(|c| c.category == tx.category) {
            Some(existing) => existing.amount += tx.amount,
            None => totals.push(CategoryTotal {
                category: tx.category.clone(),
                amount: tx.amount,
            }),
        }
    }

    totals
}

/// Look up one category's amount in a breakdown (0 when absent)
pub fn category_amount(totals: &[CategoryTotal], category: &str) -> f64 {
    totals
        .iter()
        .find(|c| c.category == category)
        .map(|c| c.amount)
        .unwrap_or(0.0)
}

/// Transactions whose date falls in the given `YYYY-MM` month
pub fn transactions_in_month(transactions: &[Transaction], month: &str) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| t.in_month(month))
        .cloned()
        .collect()
}

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month `offset` months away from the month containing `date`
pub fn shift_month(date: NaiveDate, offset: i32) -> NaiveDate {
    let start = first_of_month(date);
    let months = Months::new(offset.unsigned_abs());
    let shifted = if offset >= 0 {
        start.checked_add_months(months)
    } else {
        start.checked_sub_months(months)
    };
    shifted.unwrap_or(start)
}

/// Month key of the month before the one containing `today`
pub fn previous_month_key(today: NaiveDate) -> String {
    month_key(shift_month(today, -1))
}

/// Income and expenses for the `months` calendar months ending with the
/// current one, oldest first
///
/// Always returns exactly `months` points; empty months are zeros.
pub fn monthly_trend(transactions: &[Transaction], months: usize, today: NaiveDate) -> Vec<TrendPoint> {
    (0..months)
        .rev()
        .map(|back| {
            let month_start = shift_month(today, -(back as i32));
            let key = month_key(month_start);
            let in_month = transactions_in_month(transactions, &key);

            TrendPoint {
                label: month_start.format("%b %Y").to_string(),
                month: key,
                income: total_income(&in_month),
                expenses: total_expenses(&in_month),
            }
        })
        .collect()
}

/// The largest single expense, if any
pub fn largest_expense(transactions: &[Transaction]) -> Option<&Transaction> {
    transactions
        .iter()
        .filter(|t| t.is_expense())
        .fold(None, |best: Option<&Transaction>, t| match best {
            Some(b) if b.amount >= t.amount => Some(b),
            _ => Some(t),
        })
}

/// Reporting window ending today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Inclusive (start, end) range for this period, ending at `today`
    pub fn date_range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = match self {
            Self::Daily => today,
            Self::Weekly => today - Duration::days(7),
            Self::Monthly => today.checked_sub_months(Months::new(1)).unwrap_or(today),
            Self::Yearly => today.checked_sub_months(Months::new(12)).unwrap_or(today),
        };
        (start, today)
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "day" => Ok(Self::Daily),
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            "yearly" | "year" => Ok(Self::Yearly),
            _ => Err(format!(
                "Unknown period: {}. Available: daily, weekly, monthly, yearly",
                s
            )),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transactions dated within `[start, end]`
pub fn filter_by_date_range(
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| t.date >= start && t.date <= end)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{expense, income};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_totals_partition_the_list() {
        let txs = vec![
            income(5000.0, "Salary", date(2026, 3, 1)),
            expense(450.0, "Food & Dining", date(2026, 3, 2)),
            expense(80.25, "Transportation", date(2026, 3, 3)),
        ];
        let all: f64 = txs.iter().map(|t| t.amount).sum();

        assert_eq!(total_income(&txs), 5000.0);
        assert_eq!(total_expenses(&txs), 530.25);
        assert_eq!(total_income(&txs) + total_expenses(&txs), all);
    }

    #[test]
    fn test_totals_empty() {
        assert_eq!(total_by_type(&[], TransactionType::Income), 0.0);
    }

    #[test]
    fn test_expenses_by_category_keeps_first_occurrence_order() {
        let txs = vec![
            expense(10.0, "Transportation", date(2026, 3, 1)),
            income(100.0, "Salary", date(2026, 3, 1)),
            expense(20.0, "Food & Dining", date(2026, 3, 2)),
            expense(5.0, "Transportation", date(2026, 3, 3)),
        ];

        let totals = expenses_by_category(&txs);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].category, "Transportation");
        assert_eq!(totals[0].amount, 15.0);
        assert_eq!(totals[1].category, "Food & Dining");
        assert_eq!(category_amount(&totals, "Salary"), 0.0);
    }

    #[test]
    fn test_shift_month_crosses_year_boundary() {
        assert_eq!(shift_month(date(2026, 1, 31), -1), date(2025, 12, 1));
        assert_eq!(shift_month(date(2026, 12, 15), 1), date(2027, 1, 1));
        assert_eq!(previous_month_key(date(2026, 3, 31)), "2026-02");
    }

    #[test]
    fn test_monthly_trend_always_has_n_entries() {
        let today = date(2026, 10, 17);
        let txs = vec![
            income(3000.0, "Salary", date(2026, 10, 1)),
            expense(200.0, "Bills & Utilities", date(2026, 8, 10)),
            // Outside the window
            expense(999.0, "Travel", date(2025, 1, 10)),
        ];

        let trend = monthly_trend(&txs, 6, today);
        assert_eq!(trend.len(), 6);
        assert_eq!(trend[0].month, "2026-05");
        assert_eq!(trend[5].month, "2026-10");
        assert_eq!(trend[5].label, "Oct 2026");
        assert_eq!(trend[5].income, 3000.0);
        assert_eq!(trend[3].expenses, 200.0);
        assert_eq!(trend[0].income + trend[0].expenses, 0.0);

        assert_eq!(monthly_trend(&[], 3, today).len(), 3);
        assert!(monthly_trend(&txs, 0, today).is_empty());
    }

    #[test]
    fn test_largest_expense() {
        let txs = vec![
            expense(10.0, "Shopping", date(2026, 3, 1)),
            income(9000.0, "Salary", date(2026, 3, 1)),
            expense(75.0, "Travel", date(2026, 3, 2)),
        ];
        assert_eq!(largest_expense(&txs).map(|t| t.amount), Some(75.0));
        assert!(largest_expense(&[]).is_none());
    }

    #[test]
    fn test_period_ranges() {
        let today = date(2026, 3, 31);
        assert_eq!(Period::Daily.date_range(today), (today, today));
        assert_eq!(Period::Weekly.date_range(today).0, date(2026, 3, 24));
        assert_eq!(Period::Monthly.date_range(today).0, date(2026, 2, 28));
        assert_eq!(Period::Yearly.date_range(today).0, date(2025, 3, 31));
        assert_eq!("week".parse::<Period>(), Ok(Period::Weekly));
    }

    #[test]
    fn test_filter_by_date_range_is_inclusive() {
        let txs = vec![
            expense(1.0, "Other", date(2026, 3, 1)),
            expense(2.0, "Other", date(2026, 3, 15)),
            expense(3.0, "Other", date(2026, 3, 31)),
        ];
        let filtered = filter_by_date_range(&txs, date(2026, 3, 1), date(2026, 3, 15));
        assert_eq!(filtered.len(), 2);
    }
}
