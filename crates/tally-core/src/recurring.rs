//! Recurring transaction generation
//!
//! Each recurring transaction is a template: when its next occurrence
//! (date + one interval) is due, a copy dated at that occurrence is appended
//! to the ledger. Runs are idempotent. An occurrence is skipped if the ledger
//! already holds a transaction with the same description, amount, type and
//! date, whichever run (or user) created it.
//!
//! A run advances each template by at most one step. The generated copy is
//! itself recurring, so a ledger that fell several intervals behind catches
//! up over successive runs.
//!
//! Generated expenses go through the budget alert check once the run's write
//! has committed, the same as any other new expense.

use std::collections::HashSet;

use chrono::{Duration, Months, NaiveDate};
use tracing::{debug, info};

use crate::alerts::{BudgetAlertTrigger, Notifier};
use crate::error::Result;
use crate::ledger::LedgerStore;
use crate::models::{new_id, RecurringInterval, Transaction, TransactionType};

/// The occurrence one interval after `date`
///
/// Month and year steps clamp to the last valid day (Jan 31 + 1 month is
/// Feb 28; Feb 29 + 1 year is Feb 28).
pub fn next_occurrence(date: NaiveDate, interval: RecurringInterval) -> NaiveDate {
    let next = match interval {
        RecurringInterval::Daily => date.checked_add_signed(Duration::days(1)),
        RecurringInterval::Weekly => date.checked_add_signed(Duration::days(7)),
        RecurringInterval::Monthly => date.checked_add_months(Months::new(1)),
        RecurringInterval::Yearly => date.checked_add_months(Months::new(12)),
    };
    next.unwrap_or(date)
}

/// Identity used for the duplicate check; amount compared bit-for-bit
type OccurrenceKey = (String, u64, TransactionType, NaiveDate);

fn occurrence_key(tx: &Transaction) -> OccurrenceKey {
    (
        tx.description.clone(),
        tx.amount.to_bits(),
        tx.transaction_type,
        tx.date,
    )
}

/// Appends due occurrences of recurring transactions
pub struct RecurrenceGenerator<'a> {
    store: &'a dyn LedgerStore,
    notifier: &'a dyn Notifier,
}

impl<'a> RecurrenceGenerator<'a> {
    pub fn new(store: &'a dyn LedgerStore, notifier: &'a dyn Notifier) -> Self {
        Self { store, notifier }
    }

    /// Generate every occurrence due on or before `today`; returns the new
    /// transactions
    pub fn run(&self, today: NaiveDate) -> Result<Vec<Transaction>> {
        let mut generated = Vec::new();

        self.store
            .modify_transactions(&mut |txs: &mut Vec<Transaction>| {
                generated = generate_due(txs, today);
            })?;

        if !generated.is_empty() {
            info!("Generated {} recurring transactions", generated.len());
        }

        let trigger = BudgetAlertTrigger::new(self.store, self.notifier);
        for tx in generated.iter().filter(|t| t.is_expense()) {
            trigger.check(tx)?;
        }

        Ok(generated)
    }
}

/// Append due occurrences to `transactions` in place and return them
///
/// Templates are the recurring transactions present on entry. Occurrences
/// appended during this pass take part in the duplicate check but are not
/// advanced again.
fn generate_due(transactions: &mut Vec<Transaction>, today: NaiveDate) -> Vec<Transaction> {
    let mut seen: HashSet<OccurrenceKey> = transactions.iter().map(occurrence_key).collect();
    let templates: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.is_recurring)
        .cloned()
        .collect();

    let mut generated = Vec::new();
    for template in templates {
        let interval = template.recurring_interval.unwrap_or_default();
        let next = next_occurrence(template.date, interval);
        if next > today {
            continue;
        }

        let occurrence = Transaction {
            id: new_id(),
            date: next,
            is_recurring: true,
            recurring_interval: Some(interval),
            ..template
        };

        if !seen.insert(occurrence_key(&occurrence)) {
            debug!(
                description = %occurrence.description,
                date = %next,
                "Occurrence already recorded"
            );
            continue;
        }

        debug!(
            description = %occurrence.description,
            date = %next,
            interval = %interval,
            "Generating occurrence"
        );
        transactions.push(occurrence.clone());
        generated.push(occurrence);
    }

    generated
}

/// Give recurring transactions stored without an interval the monthly default
///
/// Returns the number of transactions updated.
pub fn migrate_recurring_intervals(store: &dyn LedgerStore) -> Result<usize> {
    let mut migrated = 0;

    store.modify_transactions(&mut |txs: &mut Vec<Transaction>| {
        for tx in txs.iter_mut() {
            if tx.is_recurring && tx.recurring_interval.is_none() {
                tx.recurring_interval = Some(RecurringInterval::default());
                migrated += 1;
            }
        }
    })?;

    if migrated > 0 {
        info!("Set default interval on {} recurring transactions", migrated);
    }
    Ok(migrated)
}
