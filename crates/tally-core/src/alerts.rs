//! Budget alerts
//!
//! After an expense is written, the trigger recomputes what has been spent in
//! that expense's category and month and asks the [`Notifier`] to warn once
//! spending reaches 80% of the budget. Spend is always recomputed from the
//! ledger; the budget's cached `spent` is not trusted.
//!
//! Alerts are not deduplicated: every qualifying mutation requests a new one.

use tracing::{debug, warn};

use crate::aggregate::total_expenses;
use crate::error::Result;
use crate::ledger::LedgerStore;
use crate::models::{BudgetAlert, Transaction};

/// Fraction of a budget's limit at which an alert is requested
pub const ALERT_THRESHOLD: f64 = 0.8;

/// Delivery of alert requests (push notification, log line, ...)
///
/// Fire-and-forget: delivery failures are the notifier's concern.
pub trait Notifier: Send + Sync {
    fn request_budget_alert(&self, alert: &BudgetAlert);
}

/// Notifier that writes alerts to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn request_budget_alert(&self, alert: &BudgetAlert) {
        warn!(
            category = %alert.category,
            spent = alert.spent_amount,
            limit = alert.limit,
            "{}",
            alert.message()
        );
    }
}

pub struct BudgetAlertTrigger<'a> {
    store: &'a dyn LedgerStore,
    notifier: &'a dyn Notifier,
}

impl<'a> BudgetAlertTrigger<'a> {
    pub fn new(store: &'a dyn LedgerStore, notifier: &'a dyn Notifier) -> Self {
        Self { store, notifier }
    }

    /// Check the budget `transaction` counts toward; request an alert if it is
    /// at or past the threshold
    ///
    /// Call after the transaction has been written.
    pub fn check(&self, transaction: &Transaction) -> Result<Option<BudgetAlert>> {
        if !transaction.is_expense() {
            return Ok(None);
        }

        let month = transaction.month_key();
        let budgets = self.store.list_budgets()?;
        let Some(budget) = budgets
            .iter()
            .find(|b| b.category == transaction.category && b.month == month)
        else {
            debug!(category = %transaction.category, month = %month, "No budget to check");
            return Ok(None);
        };

        let matching: Vec<Transaction> = self
            .store
            .list_transactions()?
            .into_iter()
            .filter(|t| t.category == budget.category && t.in_month(&month))
            .collect();
        let spent = total_expenses(&matching);

        if spent < budget.limit * ALERT_THRESHOLD {
            debug!(
                category = %budget.category,
                spent,
                limit = budget.limit,
                "Budget below alert threshold"
            );
            return Ok(None);
        }

        let alert = BudgetAlert {
            category: budget.category.clone(),
            spent_amount: spent,
            limit: budget.limit,
        };
        self.notifier.request_budget_alert(&alert);
        Ok(Some(alert))
    }
}
