//! Tally CLI - Personal finance tracker
//!
//! Usage:
//!   tally init --demo          Initialize the ledger (optionally with demo data)
//!   tally add --type expense   Record a transaction
//!   tally budget set           Set this month's budget for a category
//!   tally report health        Show the financial health score
//!
//! Every command first brings recurring transactions up to date.

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use clap::Parser;
use tally_core::{Config, LogNotifier};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir);
    }
    let symbol = config.currency_symbol.clone();

    let db = commands::open_ledger(&config)?;
    let notifier = LogNotifier;
    let today = chrono::Local::now().date_naive();

    // `recur` runs the pass itself so it can report what it created
    if !matches!(cli.command, Commands::Recur) {
        commands::run_startup(&db, &notifier, today)?;
    }

    match cli.command {
        Commands::Init { demo } => commands::cmd_init(&db, demo),
        Commands::Add(args) => commands::cmd_add(&db, &notifier, &args, today, &symbol).map(|_| ()),
        Commands::List {
            kind,
            category,
            search,
            limit,
            json,
        } => {
            let filter = commands::ListFilter {
                kind,
                category,
                search,
                limit,
            };
            commands::cmd_list(&db, &filter, json, &symbol)
        }
        Commands::Edit(args) => commands::cmd_edit(&db, &notifier, &args).map(|_| ()),
        Commands::Delete { id } => commands::cmd_delete(&db, &notifier, &id),
        Commands::Budget { action } => match action {
            BudgetAction::Set { category, limit } => {
                commands::cmd_budget_set(&db, &notifier, &category, limit, today, &symbol)
            }
            BudgetAction::List => commands::cmd_budget_list(&db, today, &symbol),
            BudgetAction::Suggest { category } => {
                commands::cmd_budget_suggest(&db, &category, today, &symbol).map(|_| ())
            }
            BudgetAction::Refresh => commands::cmd_budget_refresh(&db, &notifier, today),
        },
        Commands::Goal { action } => match action {
            GoalAction::Add {
                name,
                target,
                current,
                deadline,
            } => commands::cmd_goal_add(
                &db, &notifier, &name, target, current, &deadline, today, &symbol,
            )
            .map(|_| ()),
            GoalAction::Fund { id, amount } => {
                commands::cmd_goal_fund(&db, &notifier, &id, amount, &symbol).map(|_| ())
            }
            GoalAction::List => commands::cmd_goal_list(&db, today, &symbol),
            GoalAction::Delete { id } => commands::cmd_goal_delete(&db, &notifier, &id),
        },
        Commands::Report { action } => match action {
            ReportAction::Health { json } => commands::cmd_report_health(&db, today, json),
            ReportAction::Trend { months } => commands::cmd_report_trend(
                &db,
                months.unwrap_or(config.trend_months),
                today,
                &symbol,
            ),
            ReportAction::Categories { period } => {
                commands::cmd_report_categories(&db, &period, today, &symbol)
            }
            ReportAction::Spikes => commands::cmd_report_spikes(&db, today, &symbol),
            ReportAction::Waste => commands::cmd_report_waste(&db, today, &symbol),
        },
        Commands::Recur => commands::cmd_recur(&db, &notifier, today, &symbol),
        Commands::Export { output } => {
            commands::cmd_export(&db, output.as_deref(), today).map(|_| ())
        }
    }
}
