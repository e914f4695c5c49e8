//! Domain models for Tally
//!
//! Entities never reference each other by id. A budget "belongs to" a category
//! and month, and a transaction "counts toward" a budget, purely by matching
//! the category string and the `YYYY-MM` month key at read time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Expense categories offered by the entry forms
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Bills & Utilities",
    "Entertainment",
    "Healthcare",
    "Education",
    "Travel",
    "Groceries",
    "Personal Care",
    "Other",
];

/// Income categories offered by the entry forms
pub const INCOME_CATEGORIES: &[&str] = &[
    "Salary",
    "Freelance",
    "Investment",
    "Business",
    "Gift",
    "Other",
];

/// Generate a new collision-resistant entity id
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Month key (`YYYY-MM`) of a calendar day: the first 7 characters of its ISO form
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How often a recurring transaction repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecurringInterval {
    Daily,
    Weekly,
    /// Transactions stored before intervals existed are treated as monthly
    #[default]
    Monthly,
    Yearly,
}

impl RecurringInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl std::str::FromStr for RecurringInterval {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(format!("Unknown recurring interval: {}", s)),
        }
    }
}

impl std::fmt::Display for RecurringInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Always non-negative; direction comes from `transaction_type`
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_interval: Option<RecurringInterval>,
    /// Opaque pointer to a captured receipt (path, URI, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_reference: Option<String>,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    /// The `YYYY-MM` month this transaction falls in
    pub fn month_key(&self) -> String {
        month_key(self.date)
    }

    pub fn in_month(&self, month: &str) -> bool {
        self.month_key() == month
    }
}

/// A transaction before it has been given an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub tags: Vec<String>,
    pub is_recurring: bool,
    pub recurring_interval: Option<RecurringInterval>,
    pub receipt_reference: Option<String>,
}

impl NewTransaction {
    pub fn into_transaction(self, id: String) -> Transaction {
        Transaction {
            id,
            transaction_type: self.transaction_type,
            amount: self.amount,
            category: self.category,
            description: self.description,
            date: self.date,
            tags: self.tags,
            is_recurring: self.is_recurring,
            recurring_interval: self.recurring_interval,
            receipt_reference: self.receipt_reference,
        }
    }
}

/// A monthly spending limit for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub category: String,
    pub limit: f64,
    /// `YYYY-MM`
    pub month: String,
    /// Cached projection of the ledger; recomputed, never authoritative
    pub spent: f64,
}

impl Budget {
    pub fn is_over_limit(&self) -> bool {
        self.spent > self.limit
    }

    /// Cached spend as a percentage of the limit
    pub fn percent_used(&self) -> f64 {
        if self.limit > 0.0 {
            self.spent / self.limit * 100.0
        } else {
            0.0
        }
    }
}

/// A savings target with a deadline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: NaiveDate,
    pub created_at: NaiveDate,
}

/// A savings goal before it has been given an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: NaiveDate,
}

/// Composite financial health score, each part rounded for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialHealthScore {
    /// 0-100
    pub score: i32,
    /// At most 30; negative when spending exceeds income
    pub savings_ratio: i32,
    /// 0-30
    pub budget_adherence: i32,
    /// 0-20
    pub expense_volatility: i32,
    /// 0-20
    pub goal_consistency: i32,
}

/// Income and expenses for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// `YYYY-MM`
    pub month: String,
    /// Display label, e.g. "Oct 2026"
    pub label: String,
    pub income: f64,
    pub expenses: f64,
}

/// Summed expenses for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

/// A category flagged by the waste heuristics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WastefulExpense {
    pub category: String,
    pub amount: f64,
    pub description: String,
}

/// Month-over-month jump in a category's spending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingSpike {
    pub category: String,
    pub previous: f64,
    pub current: f64,
    /// Percent increase over the previous month, unrounded
    pub percent_increase: f64,
}

impl SpendingSpike {
    pub fn message(&self) -> String {
        format!(
            "Your {} spending increased {}% compared to last month.",
            self.category,
            round_half_up(self.percent_increase)
        )
    }
}

/// Request for the notification collaborator: a budget is close to its limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlert {
    pub category: String,
    pub spent_amount: f64,
    pub limit: f64,
}

impl BudgetAlert {
    pub fn percent_used(&self) -> f64 {
        if self.limit > 0.0 {
            self.spent_amount / self.limit * 100.0
        } else {
            0.0
        }
    }

    pub fn message(&self) -> String {
        format!(
            "You've used {}% of your {} budget! (${:.2} / ${:.2})",
            round_half_up(self.percent_used()),
            self.category,
            self.spent_amount,
            self.limit
        )
    }
}

/// Round to the nearest integer, ties toward positive infinity
///
/// `f64::round` sends -2.5 to -3; display scores need -2.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_transaction() -> Transaction {
        Transaction {
            id: "t1".to_string(),
            transaction_type: TransactionType::Expense,
            amount: 42.5,
            category: "Food & Dining".to_string(),
            description: "Lunch".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
            tags: vec!["work".to_string()],
            is_recurring: false,
            recurring_interval: None,
            receipt_reference: None,
        }
    }

    #[test]
    fn test_month_key_is_iso_prefix() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert_eq!(month_key(date), "2026-03");
        assert_eq!(month_key(date), &date.to_string()[..7]);
    }

    #[test]
    fn test_transaction_type_parsing() {
        assert_eq!("Income".parse::<TransactionType>(), Ok(TransactionType::Income));
        assert_eq!("expense".parse::<TransactionType>(), Ok(TransactionType::Expense));
        assert!("transfer".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_interval_defaults_to_monthly() {
        assert_eq!(RecurringInterval::default(), RecurringInterval::Monthly);
        assert_eq!("weekly".parse::<RecurringInterval>(), Ok(RecurringInterval::Weekly));
    }

    #[test]
    fn test_transaction_json_shape() {
        let tx = sample_transaction();
        let json = serde_json::to_value(&tx).unwrap();

        assert_eq!(json["type"], "expense");
        assert_eq!(json["date"], "2026-03-09");
        assert_eq!(json["isRecurring"], false);
        assert!(json.get("recurringInterval").is_none());
    }

    #[test]
    fn test_transaction_json_tolerates_missing_optional_fields() {
        let json = r#"{
            "id": "1",
            "type": "income",
            "amount": 5000,
            "category": "Salary",
            "description": "Monthly Salary",
            "date": "2026-02-01"
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();

        assert!(tx.is_income());
        assert!(tx.tags.is_empty());
        assert!(!tx.is_recurring);
        assert_eq!(tx.recurring_interval, None);
        assert_eq!(tx.month_key(), "2026-02");
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(40.4), 40);
        assert_eq!(round_half_up(0.0), 0);
    }

    #[test]
    fn test_spike_message() {
        let spike = SpendingSpike {
            category: "Shopping".to_string(),
            previous: 100.0,
            current: 140.0,
            percent_increase: 40.0,
        };
        assert_eq!(
            spike.message(),
            "Your Shopping spending increased 40% compared to last month."
        );
    }

    #[test]
    fn test_budget_alert_message() {
        let alert = BudgetAlert {
            category: "Food & Dining".to_string(),
            spent_amount: 510.0,
            limit: 600.0,
        };
        assert_eq!(alert.percent_used(), 85.0);
        assert_eq!(
            alert.message(),
            "You've used 85% of your Food & Dining budget! ($510.00 / $600.00)"
        );
    }

    #[test]
    fn test_budget_over_limit() {
        let budget = Budget {
            id: "b1".to_string(),
            category: "Travel".to_string(),
            limit: 200.0,
            month: "2026-03".to_string(),
            spent: 250.0,
        };
        assert!(budget.is_over_limit());
        assert_eq!(budget.percent_used(), 125.0);
    }
}
