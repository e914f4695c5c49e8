//! Ledger mutations
//!
//! [`LedgerService`] is the single entry point for changing the ledger. Writes
//! go through the [`LedgerStore`]; after an expense is created or updated the
//! budget alert trigger runs against the committed state.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::aggregate::{category_amount, expenses_by_category, transactions_in_month};
use crate::alerts::{BudgetAlertTrigger, Notifier};
use crate::error::{Error, Result};
use crate::ledger::LedgerStore;
use crate::models::{
    month_key, new_id, Budget, NewGoal, NewTransaction, SavingsGoal, Transaction,
};

pub struct LedgerService<'a> {
    store: &'a dyn LedgerStore,
    notifier: &'a dyn Notifier,
}

impl<'a> LedgerService<'a> {
    pub fn new(store: &'a dyn LedgerStore, notifier: &'a dyn Notifier) -> Self {
        Self { store, notifier }
    }

    pub fn store(&self) -> &'a dyn LedgerStore {
        self.store
    }

    fn check_budget(&self, transaction: &Transaction) -> Result<()> {
        BudgetAlertTrigger::new(self.store, self.notifier).check(transaction)?;
        Ok(())
    }

    /// Record a new transaction and check its budget
    pub fn add_transaction(&self, new: NewTransaction) -> Result<Transaction> {
        let transaction = new.into_transaction(new_id());
        self.store.append_transaction(transaction.clone())?;
        info!(
            id = %transaction.id,
            kind = %transaction.transaction_type,
            amount = transaction.amount,
            "Added transaction"
        );

        self.check_budget(&transaction)?;
        Ok(transaction)
    }

    /// Replace the transaction with `id` wholesale and check its budget
    pub fn update_transaction(&self, id: &str, transaction: Transaction) -> Result<Transaction> {
        let transaction = Transaction {
            id: id.to_string(),
            ..transaction
        };
        if !self.store.replace_transaction(id, transaction.clone())? {
            return Err(Error::NotFound(format!("transaction {}", id)));
        }
        info!(id, "Updated transaction");

        self.check_budget(&transaction)?;
        Ok(transaction)
    }

    pub fn delete_transaction(&self, id: &str) -> Result<()> {
        if !self.store.remove_transaction(id)? {
            return Err(Error::NotFound(format!("transaction {}", id)));
        }
        info!(id, "Deleted transaction");
        Ok(())
    }

    pub fn get_transaction(&self, id: &str) -> Result<Transaction> {
        self.store
            .list_transactions()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::NotFound(format!("transaction {}", id)))
    }

    /// Set the current month's limit for `category`
    ///
    /// An existing budget for the category and month keeps its id and cached
    /// spend; otherwise a new one starts with this month's spend so far.
    pub fn set_budget(&self, category: &str, limit: f64, today: NaiveDate) -> Result<Budget> {
        if limit <= 0.0 {
            return Err(Error::InvalidData(format!(
                "Budget limit must be positive, got {}",
                limit
            )));
        }

        let month = month_key(today);
        let existing = self
            .store
            .list_budgets()?
            .into_iter()
            .find(|b| b.category == category && b.month == month);

        if let Some(existing) = existing {
            let updated = Budget { limit, ..existing };
            self.store.replace_budget(&updated.id, updated.clone())?;
            info!(category, limit, month = %month, "Updated budget");
            return Ok(updated);
        }

        let spent = self.month_spend(category, &month)?;
        let budget = Budget {
            id: new_id(),
            category: category.to_string(),
            limit,
            month: month.clone(),
            spent,
        };
        self.store.append_budget(budget.clone())?;
        info!(category, limit, month = %month, "Created budget");
        Ok(budget)
    }

    fn month_spend(&self, category: &str, month: &str) -> Result<f64> {
        let transactions = self.store.list_transactions()?;
        let in_month = transactions_in_month(&transactions, month);
        Ok(category_amount(&expenses_by_category(&in_month), category))
    }

    /// Recompute the cached `spent` of this month's budgets from the ledger
    ///
    /// Returns how many budgets changed.
    pub fn refresh_budget_spent(&self, today: NaiveDate) -> Result<usize> {
        let month = month_key(today);
        let transactions = self.store.list_transactions()?;
        let totals = expenses_by_category(&transactions_in_month(&transactions, &month));

        let mut changed = 0;
        self.store.modify_budgets(&mut |budgets: &mut Vec<Budget>| {
            for budget in budgets.iter_mut().filter(|b| b.month == month) {
                let spent = category_amount(&totals, &budget.category);
                if budget.spent != spent {
                    debug!(category = %budget.category, old = budget.spent, new = spent, "Refreshed budget");
                    budget.spent = spent;
                    changed += 1;
                }
            }
        })?;

        Ok(changed)
    }

    pub fn add_goal(&self, new: NewGoal, today: NaiveDate) -> Result<SavingsGoal> {
        if new.target_amount <= 0.0 {
            return Err(Error::InvalidData(format!(
                "Goal target must be positive, got {}",
                new.target_amount
            )));
        }
        if new.current_amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "Goal starting amount cannot be negative, got {}",
                new.current_amount
            )));
        }

        let goal = SavingsGoal {
            id: new_id(),
            name: new.name,
            target_amount: new.target_amount,
            current_amount: new.current_amount,
            deadline: new.deadline,
            created_at: today,
        };
        self.store.append_goal(goal.clone())?;
        info!(id = %goal.id, name = %goal.name, "Added savings goal");
        Ok(goal)
    }

    /// Add `amount` to a goal's saved total
    pub fn add_funds(&self, goal_id: &str, amount: f64) -> Result<SavingsGoal> {
        if amount <= 0.0 {
            return Err(Error::InvalidData(format!(
                "Amount must be positive, got {}",
                amount
            )));
        }

        let mut updated = None;
        self.store.modify_goals(&mut |goals: &mut Vec<SavingsGoal>| {
            if let Some(goal) = goals.iter_mut().find(|g| g.id == goal_id) {
                goal.current_amount += amount;
                updated = Some(goal.clone());
            }
        })?;

        let goal = updated.ok_or_else(|| Error::NotFound(format!("goal {}", goal_id)))?;
        info!(id = goal_id, amount, total = goal.current_amount, "Added funds to goal");
        Ok(goal)
    }

    pub fn delete_goal(&self, goal_id: &str) -> Result<()> {
        if !self.store.remove_goal(goal_id)? {
            return Err(Error::NotFound(format!("goal {}", goal_id)));
        }
        info!(id = goal_id, "Deleted savings goal");
        Ok(())
    }
}
