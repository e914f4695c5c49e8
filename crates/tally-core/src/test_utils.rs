//! Test utilities for tally-core
//!
//! Transaction builders and a notifier that records every alert request,
//! for unit and integration tests.

use std::sync::Mutex;

use chrono::NaiveDate;

use crate::alerts::Notifier;
use crate::models::{
    new_id, Budget, BudgetAlert, RecurringInterval, SavingsGoal, Transaction, TransactionType,
};

/// Build a transaction with a fresh id and a description derived from the category
pub fn transaction(
    transaction_type: TransactionType,
    amount: f64,
    category: &str,
    date: NaiveDate,
) -> Transaction {
    Transaction {
        id: new_id(),
        transaction_type,
        amount,
        category: category.to_string(),
        description: format!("{} {}", category, transaction_type),
        date,
        tags: Vec::new(),
        is_recurring: false,
        recurring_interval: None,
        receipt_reference: None,
    }
}

pub fn expense(amount: f64, category: &str, date: NaiveDate) -> Transaction {
    transaction(TransactionType::Expense, amount, category, date)
}

pub fn income(amount: f64, category: &str, date: NaiveDate) -> Transaction {
    transaction(TransactionType::Income, amount, category, date)
}

/// A recurring transaction; `interval` of `None` mimics legacy records
pub fn recurring(
    transaction_type: TransactionType,
    amount: f64,
    description: &str,
    date: NaiveDate,
    interval: Option<RecurringInterval>,
) -> Transaction {
    Transaction {
        description: description.to_string(),
        is_recurring: true,
        recurring_interval: interval,
        ..transaction(transaction_type, amount, "Bills & Utilities", date)
    }
}

pub fn budget(category: &str, limit: f64, month: &str, spent: f64) -> Budget {
    Budget {
        id: new_id(),
        category: category.to_string(),
        limit,
        month: month.to_string(),
        spent,
    }
}

pub fn goal(name: &str, target_amount: f64, current_amount: f64, deadline: NaiveDate) -> SavingsGoal {
    SavingsGoal {
        id: new_id(),
        name: name.to_string(),
        target_amount,
        current_amount,
        deadline,
        created_at: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
    }
}

/// Notifier that keeps every alert request it receives
#[derive(Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<BudgetAlert>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<BudgetAlert> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.alerts.lock().unwrap().len()
    }
}

impl Notifier for RecordingNotifier {
    fn request_budget_alert(&self, alert: &BudgetAlert) {
        self.alerts.lock().unwrap().push(alert.clone());
    }
}
