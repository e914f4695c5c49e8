//! Tally Core Library
//!
//! Analytics and rules engine for the Tally personal finance tracker:
//! - Ledger store trait with in-memory and SQLite backends
//! - Aggregation (totals, category breakdowns, monthly trends)
//! - Financial health scoring
//! - Spending spike and waste detection
//! - Budget suggestions and budget alerts
//! - Recurring transaction generation
//! - Savings goal planning, CSV export and demo data

pub mod aggregate;
pub mod alerts;
pub mod config;
pub mod db;
pub mod demo;
pub mod detect;
pub mod error;
pub mod export;
pub mod goals;
pub mod health;
pub mod ledger;
pub mod models;
pub mod recurring;
pub mod service;
pub mod suggest;

/// Test utilities: entity builders and a recording notifier
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::Period;
pub use alerts::{BudgetAlertTrigger, LogNotifier, Notifier};
pub use config::Config;
pub use db::Database;
pub use error::{Error, Result};
pub use health::{calculate_health_score, HealthComponents};
pub use ledger::{LedgerSnapshot, LedgerStore, MemoryLedger};
pub use models::{
    Budget, BudgetAlert, CategoryTotal, FinancialHealthScore, NewGoal, NewTransaction,
    RecurringInterval, SavingsGoal, SpendingSpike, Transaction, TransactionType, TrendPoint,
    WastefulExpense,
};
pub use recurring::{migrate_recurring_intervals, RecurrenceGenerator};
pub use service::LedgerService;
