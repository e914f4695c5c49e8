//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Tally - Track spending, budgets and savings goals
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Personal finance tracker with budgets, goals and spending insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the ledger database (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file (defaults to <data dir>/tally/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the ledger database
    Init {
        /// Seed empty collections with demo data
        #[arg(long)]
        demo: bool,
    },

    /// Record a transaction
    Add(AddArgs),

    /// List transactions, newest first
    List {
        /// Only this type: income or expense
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        /// Only this category
        #[arg(short, long)]
        category: Option<String>,

        /// Match description, category or tags (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Maximum number to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Change fields of an existing transaction
    Edit(EditArgs),

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },

    /// Manage monthly budgets
    Budget {
        #[command(subcommand)]
        action: BudgetAction,
    },

    /// Manage savings goals
    Goal {
        #[command(subcommand)]
        action: GoalAction,
    },

    /// Spending reports and insights
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },

    /// Generate due recurring transactions and show what was created
    Recur,

    /// Export transactions to CSV
    Export {
        /// Output file (defaults to tally_transactions_<date>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Transaction type: income or expense
    #[arg(short = 't', long = "type")]
    pub kind: String,

    /// Amount (positive; direction comes from --type)
    #[arg(short, long)]
    pub amount: f64,

    /// Category (e.g. "Food & Dining", "Salary")
    #[arg(short, long)]
    pub category: String,

    /// Description
    #[arg(short, long)]
    pub description: String,

    /// Date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<String>,

    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,

    /// Repeat this transaction automatically
    #[arg(long)]
    pub recurring: bool,

    /// Repeat interval: daily, weekly, monthly, yearly (default monthly)
    #[arg(long, requires = "recurring")]
    pub interval: Option<String>,

    /// Reference to a receipt (path or URI)
    #[arg(long)]
    pub receipt: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct EditArgs {
    /// Transaction ID
    pub id: String,

    /// New type: income or expense
    #[arg(short = 't', long = "type")]
    pub kind: Option<String>,

    #[arg(short, long)]
    pub amount: Option<f64>,

    #[arg(short, long)]
    pub category: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    /// New date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Replace tags (comma-separated; empty string clears)
    #[arg(long)]
    pub tags: Option<String>,

    /// Turn repetition on or off
    #[arg(long)]
    pub recurring: Option<bool>,

    /// New repeat interval: daily, weekly, monthly, yearly
    #[arg(long)]
    pub interval: Option<String>,
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Set this month's limit for a category
    Set {
        #[arg(short, long)]
        category: String,

        #[arg(short, long)]
        limit: f64,
    },

    /// List budgets with spending so far
    List,

    /// Suggest a limit from the last three months of spending
    Suggest {
        /// Category to suggest a budget for
        category: String,
    },

    /// Recompute this month's budget spending from transactions
    Refresh,
}

#[derive(Subcommand)]
pub enum GoalAction {
    /// Create a savings goal
    Add {
        #[arg(short, long)]
        name: String,

        /// Target amount
        #[arg(short, long)]
        target: f64,

        /// Amount already saved
        #[arg(short, long, default_value = "0")]
        current: f64,

        /// Deadline (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: String,
    },

    /// Add money to a goal
    Fund {
        /// Goal ID
        id: String,

        /// Amount to add
        amount: f64,
    },

    /// List goals with progress
    List,

    /// Delete a goal
    Delete {
        /// Goal ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ReportAction {
    /// Financial health score (0-100)
    Health {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Income and expenses per month
    Trend {
        /// Number of months (defaults to config trend_months)
        #[arg(short, long)]
        months: Option<usize>,
    },

    /// Expenses by category
    Categories {
        /// Period: daily, weekly, monthly, yearly
        #[arg(short, long, default_value = "monthly")]
        period: String,
    },

    /// Categories whose spending jumped over last month
    Spikes,

    /// Spending habits worth reviewing
    Waste,
}
