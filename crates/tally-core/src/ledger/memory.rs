//! In-memory ledger backend, one lock per collection

use std::sync::RwLock;

use crate::error::{Error, Result};
use crate::models::{Budget, SavingsGoal, Transaction};

use super::LedgerStore;

#[derive(Debug, Default)]
pub struct MemoryLedger {
    transactions: RwLock<Vec<Transaction>>,
    budgets: RwLock<Vec<Budget>>,
    goals: RwLock<Vec<SavingsGoal>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(
        transactions: Vec<Transaction>,
        budgets: Vec<Budget>,
        goals: Vec<SavingsGoal>,
    ) -> Self {
        Self {
            transactions: RwLock::new(transactions),
            budgets: RwLock::new(budgets),
            goals: RwLock::new(goals),
        }
    }
}

fn read<T: Clone>(lock: &RwLock<Vec<T>>, name: &str) -> Result<Vec<T>> {
    let guard = lock
        .read()
        .map_err(|_| Error::Storage(format!("{} lock poisoned", name)))?;
    Ok(guard.clone())
}

fn modify<T>(lock: &RwLock<Vec<T>>, name: &str, f: &mut dyn FnMut(&mut Vec<T>)) -> Result<()> {
    let mut guard = lock
        .write()
        .map_err(|_| Error::Storage(format!("{} lock poisoned", name)))?;
    f(&mut *guard);
    Ok(())
}

impl LedgerStore for MemoryLedger {
    fn list_transactions(&self) -> Result<Vec<Transaction>> {
        read(&self.transactions, "transactions")
    }

    fn list_budgets(&self) -> Result<Vec<Budget>> {
        read(&self.budgets, "budgets")
    }

    fn list_goals(&self) -> Result<Vec<SavingsGoal>> {
        read(&self.goals, "goals")
    }

    fn modify_transactions(&self, f: &mut dyn FnMut(&mut Vec<Transaction>)) -> Result<()> {
        modify(&self.transactions, "transactions", f)
    }

    fn modify_budgets(&self, f: &mut dyn FnMut(&mut Vec<Budget>)) -> Result<()> {
        modify(&self.budgets, "budgets", f)
    }

    fn modify_goals(&self, f: &mut dyn FnMut(&mut Vec<SavingsGoal>)) -> Result<()> {
        modify(&self.goals, "goals", f)
    }
}
