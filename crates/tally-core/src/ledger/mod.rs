//! Ledger access
//!
//! The ledger is three independent collections (transactions, budgets,
//! goals). [`LedgerStore`] is the repository the rest of the crate is written
//! against; backends only supply whole-collection reads and an atomic
//! read-modify-write per collection, and the per-entity operations are built
//! on top of those.
//!
//! Backends:
//! - [`MemoryLedger`] - in-memory, for tests and embedding
//! - [`crate::db::Database`] - SQLite key-value store on disk

mod memory;

pub use memory::MemoryLedger;

use serde::Serialize;

use crate::error::Result;
use crate::models::{Budget, SavingsGoal, Transaction};

/// Repository for the three ledger collections
///
/// `modify_*` must run the closure while holding that collection's write lock
/// (or equivalent), so a read-check-write inside one call cannot interleave
/// with another writer. No cross-collection atomicity is offered or needed.
pub trait LedgerStore: Send + Sync {
    fn list_transactions(&self) -> Result<Vec<Transaction>>;
    fn list_budgets(&self) -> Result<Vec<Budget>>;
    fn list_goals(&self) -> Result<Vec<SavingsGoal>>;

    fn modify_transactions(&self, f: &mut dyn FnMut(&mut Vec<Transaction>)) -> Result<()>;
    fn modify_budgets(&self, f: &mut dyn FnMut(&mut Vec<Budget>)) -> Result<()>;
    fn modify_goals(&self, f: &mut dyn FnMut(&mut Vec<SavingsGoal>)) -> Result<()>;

    fn append_transaction(&self, transaction: Transaction) -> Result<()> {
        let mut pending = Some(transaction);
        self.modify_transactions(&mut |txs: &mut Vec<Transaction>| {
            txs.extend(pending.take())
        })
    }

    /// Replace the transaction with `id`; false if there is none
    fn replace_transaction(&self, id: &str, transaction: Transaction) -> Result<bool> {
        let mut pending = Some(transaction);
        let mut found = false;
        self.modify_transactions(&mut |txs: &mut Vec<Transaction>| {
            found = replace_by_id(txs, id, &mut pending)
        })?;
        Ok(found)
    }

    /// Remove the transaction with `id`; false if there is none
    fn remove_transaction(&self, id: &str) -> Result<bool> {
        let mut found = false;
        self.modify_transactions(&mut |txs: &mut Vec<Transaction>| {
            found = remove_by_id(txs, id)
        })?;
        Ok(found)
    }

    fn append_budget(&self, budget: Budget) -> Result<()> {
        let mut pending = Some(budget);
        self.modify_budgets(&mut |budgets: &mut Vec<Budget>| {
            budgets.extend(pending.take())
        })
    }

    fn replace_budget(&self, id: &str, budget: Budget) -> Result<bool> {
        let mut pending = Some(budget);
        let mut found = false;
        self.modify_budgets(&mut |budgets: &mut Vec<Budget>| {
            found = replace_by_id(budgets, id, &mut pending)
        })?;
        Ok(found)
    }

    fn append_goal(&self, goal: SavingsGoal) -> Result<()> {
        let mut pending = Some(goal);
        self.modify_goals(&mut |goals: &mut Vec<SavingsGoal>| {
            goals.extend(pending.take())
        })
    }

    fn replace_goal(&self, id: &str, goal: SavingsGoal) -> Result<bool> {
        let mut pending = Some(goal);
        let mut found = false;
        self.modify_goals(&mut |goals: &mut Vec<SavingsGoal>| {
            found = replace_by_id(goals, id, &mut pending)
        })?;
        Ok(found)
    }

    fn remove_goal(&self, id: &str) -> Result<bool> {
        let mut found = false;
        self.modify_goals(&mut |goals: &mut Vec<SavingsGoal>| {
            found = remove_by_id(goals, id)
        })?;
        Ok(found)
    }
}

/// Entities addressed by a string id
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Budget {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for SavingsGoal {
    fn id(&self) -> &str {
        &self.id
    }
}

fn replace_by_id<T: Identified>(items: &mut [T], id: &str, replacement: &mut Option<T>) -> bool {
    let Some(slot) = items.iter_mut().find(|item| item.id() == id) else {
        return false;
    };
    match replacement.take() {
        Some(item) => {
            *slot = item;
            true
        }
        None => false,
    }
}

fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

/// Point-in-time copy of all three collections, the input to analytics
#[derive(Debug, Clone, Default, Serialize)]
pub struct LedgerSnapshot {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub goals: Vec<SavingsGoal>,
}

impl LedgerSnapshot {
    pub fn load(store: &dyn LedgerStore) -> Result<Self> {
        Ok(Self {
            transactions: store.list_transactions()?,
            budgets: store.list_budgets()?,
            goals: store.list_goals()?,
        })
    }
}
