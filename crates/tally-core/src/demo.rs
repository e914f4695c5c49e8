//! Demo ledger
//!
//! February 2026 sample data for trying Tally out. Each collection is only
//! seeded when it is empty, so running this against a ledger in use leaves
//! existing data alone.

use chrono::NaiveDate;
use tracing::info;

use crate::error::{Error, Result};
use crate::ledger::LedgerStore;
use crate::models::{
    new_id, Budget, RecurringInterval, SavingsGoal, Transaction, TransactionType,
};

fn day(y: i32, m: u32, d: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| Error::InvalidData(format!("invalid demo date {}-{}-{}", y, m, d)))
}

struct DemoTransaction {
    transaction_type: TransactionType,
    amount: f64,
    category: &'static str,
    description: &'static str,
    day: u32,
    tag: &'static str,
    recurring: bool,
}

const DEMO_TRANSACTIONS: &[DemoTransaction] = &[
    DemoTransaction {
        transaction_type: TransactionType::Income,
        amount: 5000.0,
        category: "Salary",
        description: "Monthly Salary",
        day: 1,
        tag: "salary",
        recurring: true,
    },
    DemoTransaction {
        transaction_type: TransactionType::Expense,
        amount: 450.0,
        category: "Food & Dining",
        description: "Grocery shopping",
        day: 15,
        tag: "groceries",
        recurring: false,
    },
    DemoTransaction {
        transaction_type: TransactionType::Expense,
        amount: 80.0,
        category: "Transportation",
        description: "Uber rides",
        day: 14,
        tag: "transport",
        recurring: false,
    },
    DemoTransaction {
        transaction_type: TransactionType::Expense,
        amount: 200.0,
        category: "Bills & Utilities",
        description: "Electricity bill",
        day: 10,
        tag: "utilities",
        recurring: true,
    },
    DemoTransaction {
        transaction_type: TransactionType::Expense,
        amount: 120.0,
        category: "Entertainment",
        description: "Netflix, Spotify subscriptions",
        day: 5,
        tag: "subscriptions",
        recurring: true,
    },
];

/// (category, limit, spent)
const DEMO_BUDGETS: &[(&str, f64, f64)] = &[
    ("Food & Dining", 600.0, 450.0),
    ("Transportation", 200.0, 80.0),
    ("Entertainment", 150.0, 120.0),
];

const DEMO_MONTH: &str = "2026-02";

fn demo_transactions() -> Result<Vec<Transaction>> {
    DEMO_TRANSACTIONS
        .iter()
        .map(|demo| -> Result<Transaction> {
            Ok(Transaction {
                id: new_id(),
                transaction_type: demo.transaction_type,
                amount: demo.amount,
                category: demo.category.to_string(),
                description: demo.description.to_string(),
                date: day(2026, 2, demo.day)?,
                tags: vec![demo.tag.to_string()],
                is_recurring: demo.recurring,
                recurring_interval: demo.recurring.then_some(RecurringInterval::Monthly),
                receipt_reference: None,
            })
        })
        .collect()
}

fn demo_budgets() -> Vec<Budget> {
    DEMO_BUDGETS
        .iter()
        .map(|(category, limit, spent)| Budget {
            id: new_id(),
            category: category.to_string(),
            limit: *limit,
            month: DEMO_MONTH.to_string(),
            spent: *spent,
        })
        .collect()
}

fn demo_goals() -> Result<Vec<SavingsGoal>> {
    Ok(vec![
        SavingsGoal {
            id: new_id(),
            name: "Emergency Fund".to_string(),
            target_amount: 10000.0,
            current_amount: 3500.0,
            deadline: day(2026, 12, 31)?,
            created_at: day(2026, 1, 1)?,
        },
        SavingsGoal {
            id: new_id(),
            name: "Vacation to Europe".to_string(),
            target_amount: 5000.0,
            current_amount: 1200.0,
            deadline: day(2026, 8, 1)?,
            created_at: day(2026, 1, 15)?,
        },
    ])
}

/// Seed each empty collection with demo data; true if anything was written
pub fn seed_demo_data(store: &dyn LedgerStore) -> Result<bool> {
    let mut seeded = false;

    if store.list_transactions()?.is_empty() {
        let transactions = demo_transactions()?;
        let mut pending = Some(transactions);
        store.modify_transactions(&mut |txs: &mut Vec<Transaction>| {
            if txs.is_empty() {
                txs.extend(pending.take().unwrap_or_default());
            }
        })?;
        seeded |= pending.is_none();
    }

    if store.list_budgets()?.is_empty() {
        let mut pending = Some(demo_budgets());
        store.modify_budgets(&mut |budgets: &mut Vec<Budget>| {
            if budgets.is_empty() {
                budgets.extend(pending.take().unwrap_or_default());
            }
        })?;
        seeded |= pending.is_none();
    }

    if store.list_goals()?.is_empty() {
        let mut pending = Some(demo_goals()?);
        store.modify_goals(&mut |goals: &mut Vec<SavingsGoal>| {
            if goals.is_empty() {
                goals.extend(pending.take().unwrap_or_default());
            }
        })?;
        seeded |= pending.is_none();
    }

    if seeded {
        info!("Seeded demo data");
    }
    Ok(seeded)
}
