//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use chrono::NaiveDate;
use tally_core::db::Database;
use tally_core::test_utils::{budget, expense, goal, recurring, RecordingNotifier};
use tally_core::{
    Config, LedgerStore, MemoryLedger, RecurringInterval, Transaction, TransactionType,
};

use crate::cli::{AddArgs, EditArgs};
use crate::commands::{self, truncate, ListFilter};

const SYMBOL: &str = "$";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    date(2026, 3, 15)
}

fn add_args(kind: &str, amount: f64, category: &str, description: &str) -> AddArgs {
    AddArgs {
        kind: kind.to_string(),
        amount,
        category: category.to_string(),
        description: description.to_string(),
        date: None,
        tags: None,
        recurring: false,
        interval: None,
        receipt: None,
    }
}

fn setup_test_ledger() -> MemoryLedger {
    MemoryLedger::with_data(
        vec![
            expense(45.0, "Food & Dining", date(2026, 3, 2)),
            expense(120.0, "Shopping", date(2026, 3, 5)),
            expense(80.0, "Shopping", date(2026, 2, 5)),
        ],
        vec![budget("Shopping", 150.0, "2026-03", 120.0)],
        vec![goal("Emergency Fund", 10000.0, 3500.0, date(2026, 12, 31))],
    )
}

// ========== Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("exactly ten", 11), "exactly ten");
    assert_eq!(truncate("this is a long description", 10), "this is...");
    // Multi-byte characters are not split
    assert_eq!(truncate("Café crème brûlée", 8), "Café ...");
}

#[test]
fn test_parse_tags() {
    assert_eq!(
        commands::parse_tags(" work, lunch ,,team "),
        vec!["work", "lunch", "team"]
    );
    assert!(commands::parse_tags("").is_empty());
}

#[test]
fn test_parse_date() {
    assert_eq!(commands::parse_date("2026-03-09", "--date").unwrap(), date(2026, 3, 9));
    let err = commands::parse_date("03/09/2026", "--date").unwrap_err();
    assert!(err.to_string().contains("YYYY-MM-DD"));
}

#[test]
fn test_money_and_progress_bar() {
    assert_eq!(commands::money("$", 12.5), "$12.50");
    assert_eq!(commands::money("€", -3.0), "-€3.00");
    assert_eq!(commands::progress_bar(50.0, 10), "█████░░░░░");
    assert_eq!(commands::progress_bar(250.0, 4), "████");
}

// ========== Startup / Recurrence Tests ==========

#[test]
fn test_run_startup_generates_once() {
    let store = MemoryLedger::with_data(
        vec![recurring(
            TransactionType::Income,
            5000.0,
            "Monthly Salary",
            date(2026, 2, 1),
            None,
        )],
        vec![],
        vec![],
    );

    let notifier = RecordingNotifier::new();
    assert_eq!(
        commands::run_startup(&store, &notifier, date(2026, 3, 1)).unwrap(),
        1
    );
    assert_eq!(
        commands::run_startup(&store, &notifier, date(2026, 3, 1)).unwrap(),
        0
    );

    let txs = store.list_transactions().unwrap();
    assert_eq!(txs.len(), 2);
    // Migration gave the legacy template its monthly interval
    assert!(txs
        .iter()
        .all(|t| t.recurring_interval == Some(RecurringInterval::Monthly)));
}

#[test]
fn test_cmd_recur() {
    let store = MemoryLedger::with_data(
        vec![recurring(
            TransactionType::Expense,
            9.99,
            "Streaming",
            date(2026, 3, 1),
            Some(RecurringInterval::Weekly),
        )],
        vec![],
        vec![],
    );
    let notifier = RecordingNotifier::new();
    commands::cmd_recur(&store, &notifier, today(), SYMBOL).unwrap();
    assert_eq!(store.list_transactions().unwrap().len(), 2);
}

#[test]
fn test_run_startup_alerts_on_generated_bill() {
    let store = MemoryLedger::with_data(
        vec![recurring(
            TransactionType::Expense,
            200.0,
            "Electricity bill",
            date(2026, 2, 10),
            Some(RecurringInterval::Monthly),
        )],
        vec![budget("Bills & Utilities", 200.0, "2026-03", 0.0)],
        vec![],
    );
    let notifier = RecordingNotifier::new();

    assert_eq!(commands::run_startup(&store, &notifier, today()).unwrap(), 1);

    let alerts = notifier.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].category, "Bills & Utilities");
    assert_eq!(alerts[0].spent_amount, 200.0);
}

#[test]
fn test_cmd_init_with_demo() {
    let db = Database::in_memory().unwrap();
    commands::cmd_init(&db, true).unwrap();
    assert_eq!(db.list_transactions().unwrap().len(), 5);
    assert_eq!(db.list_goals().unwrap().len(), 2);

    // Second init leaves the data alone
    commands::cmd_init(&db, true).unwrap();
    assert_eq!(db.list_transactions().unwrap().len(), 5);
}

#[test]
fn test_open_ledger_creates_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default().with_data_dir(dir.path().join("nested").join("tally"));

    let db = commands::open_ledger(&config).unwrap();
    assert!(config.data_dir.is_dir());
    assert!(db.path().ends_with("tally.db"));
}

// ========== Transaction Command Tests ==========

#[test]
fn test_cmd_add_defaults() {
    let store = MemoryLedger::new();
    let notifier = RecordingNotifier::new();

    let tx = commands::cmd_add(
        &store,
        &notifier,
        &add_args("expense", 12.5, "Food & Dining", "Lunch"),
        today(),
        SYMBOL,
    )
    .unwrap();

    assert_eq!(tx.date, today());
    assert_eq!(tx.transaction_type, TransactionType::Expense);
    assert!(!tx.is_recurring);
    assert_eq!(tx.recurring_interval, None);
    assert_eq!(store.list_transactions().unwrap(), vec![tx]);
}

#[test]
fn test_cmd_add_recurring_with_tags() {
    let store = MemoryLedger::new();
    let notifier = RecordingNotifier::new();
    let args = AddArgs {
        date: Some("2026-03-01".to_string()),
        tags: Some("work,salary".to_string()),
        recurring: true,
        ..add_args("income", 5000.0, "Salary", "Monthly Salary")
    };

    let tx = commands::cmd_add(&store, &notifier, &args, today(), SYMBOL).unwrap();
    assert_eq!(tx.date, date(2026, 3, 1));
    assert_eq!(tx.tags, vec!["work", "salary"]);
    assert_eq!(tx.recurring_interval, Some(RecurringInterval::Monthly));

    let weekly = AddArgs {
        interval: Some("weekly".to_string()),
        ..args
    };
    let tx = commands::cmd_add(&store, &notifier, &weekly, today(), SYMBOL).unwrap();
    assert_eq!(tx.recurring_interval, Some(RecurringInterval::Weekly));
}

#[test]
fn test_cmd_add_rejects_bad_input() {
    let store = MemoryLedger::new();
    let notifier = RecordingNotifier::new();

    let cases = [
        add_args("expense", 0.0, "Other", "Zero"),
        add_args("expense", -5.0, "Other", "Negative"),
        add_args("transfer", 5.0, "Other", "Bad type"),
        add_args("expense", 5.0, "  ", "No category"),
        AddArgs {
            date: Some("yesterday".to_string()),
            ..add_args("expense", 5.0, "Other", "Bad date")
        },
        AddArgs {
            recurring: true,
            interval: Some("hourly".to_string()),
            ..add_args("expense", 5.0, "Other", "Bad interval")
        },
    ];

    for args in &cases {
        assert!(
            commands::cmd_add(&store, &notifier, args, today(), SYMBOL).is_err(),
            "accepted {:?}",
            args
        );
    }
    assert!(store.list_transactions().unwrap().is_empty());
}

#[test]
fn test_cmd_add_triggers_budget_alert() {
    let store = setup_test_ledger();
    let notifier = RecordingNotifier::new();

    // 120 already spent of 150; 80% is 120
    commands::cmd_add(
        &store,
        &notifier,
        &add_args("expense", 5.0, "Shopping", "Socks"),
        today(),
        SYMBOL,
    )
    .unwrap();

    let alerts = notifier.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].category, "Shopping");
    assert_eq!(alerts[0].spent_amount, 125.0);
}

#[test]
fn test_filter_transactions() {
    let mut tagged = expense(9.0, "Other", date(2026, 3, 9));
    tagged.tags = vec!["Coffee".to_string()];
    let txs: Vec<Transaction> = vec![
        expense(45.0, "Food & Dining", date(2026, 3, 2)),
        tagged,
        expense(120.0, "Shopping", date(2026, 3, 5)),
    ];

    let newest_first = commands::filter_transactions(
        txs.clone(),
        &ListFilter {
            limit: 10,
            ..Default::default()
        },
    )
    .unwrap();
    let dates: Vec<NaiveDate> = newest_first.iter().map(|t| t.date).collect();
    assert_eq!(dates, vec![date(2026, 3, 9), date(2026, 3, 5), date(2026, 3, 2)]);

    let by_category = commands::filter_transactions(
        txs.clone(),
        &ListFilter {
            category: Some("shopping".to_string()),
            limit: 10,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(by_category.len(), 1);

    let by_tag = commands::filter_transactions(
        txs.clone(),
        &ListFilter {
            search: Some("coffee".to_string()),
            limit: 10,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(by_tag.len(), 1);

    let income_only = commands::filter_transactions(
        txs.clone(),
        &ListFilter {
            kind: Some("income".to_string()),
            limit: 10,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(income_only.is_empty());

    let limited = commands::filter_transactions(
        txs,
        &ListFilter {
            limit: 1,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(limited.len(), 1);
}

#[test]
fn test_cmd_list() {
    let store = setup_test_ledger();
    let filter = ListFilter {
        limit: 20,
        ..Default::default()
    };
    assert!(commands::cmd_list(&store, &filter, false, SYMBOL).is_ok());
    assert!(commands::cmd_list(&store, &filter, true, SYMBOL).is_ok());
    assert!(commands::cmd_list(&MemoryLedger::new(), &filter, false, SYMBOL).is_ok());
}

#[test]
fn test_cmd_edit() {
    let store = setup_test_ledger();
    let notifier = RecordingNotifier::new();
    let id = store.list_transactions().unwrap()[0].id.clone();

    let args = EditArgs {
        id: id.clone(),
        amount: Some(50.0),
        description: Some("Team lunch".to_string()),
        recurring: Some(true),
        ..Default::default()
    };
    let saved = commands::cmd_edit(&store, &notifier, &args).unwrap();
    assert_eq!(saved.amount, 50.0);
    assert_eq!(saved.description, "Team lunch");
    assert_eq!(saved.recurring_interval, Some(RecurringInterval::Monthly));

    let stored = store.list_transactions().unwrap();
    assert_eq!(stored[0].id, id);
    assert_eq!(stored[0].amount, 50.0);

    // Switching recurrence off drops the interval
    let off = EditArgs {
        id: id.clone(),
        recurring: Some(false),
        ..Default::default()
    };
    let saved = commands::cmd_edit(&store, &notifier, &off).unwrap();
    assert_eq!(saved.recurring_interval, None);
}

#[test]
fn test_cmd_edit_unknown_and_invalid() {
    let store = setup_test_ledger();
    let notifier = RecordingNotifier::new();

    let missing = EditArgs {
        id: "missing".to_string(),
        amount: Some(5.0),
        ..Default::default()
    };
    let err = commands::cmd_edit(&store, &notifier, &missing).unwrap_err();
    assert!(err.to_string().contains("not found"));

    let id = store.list_transactions().unwrap()[0].id.clone();
    let negative = EditArgs {
        id,
        amount: Some(-1.0),
        ..Default::default()
    };
    assert!(commands::cmd_edit(&store, &notifier, &negative).is_err());
    assert_eq!(store.list_transactions().unwrap()[0].amount, 45.0);
}

#[test]
fn test_cmd_delete() {
    let store = setup_test_ledger();
    let notifier = RecordingNotifier::new();
    let id = store.list_transactions().unwrap()[1].id.clone();

    commands::cmd_delete(&store, &notifier, &id).unwrap();
    assert_eq!(store.list_transactions().unwrap().len(), 2);
    assert!(commands::cmd_delete(&store, &notifier, &id).is_err());
    assert_eq!(notifier.count(), 0);
}

// ========== Budget Command Tests ==========

#[test]
fn test_cmd_budget_set_and_list() {
    let store = setup_test_ledger();
    let notifier = RecordingNotifier::new();

    commands::cmd_budget_set(&store, &notifier, "Food & Dining", 300.0, today(), SYMBOL).unwrap();
    let budgets = store.list_budgets().unwrap();
    assert_eq!(budgets.len(), 2);
    let food = budgets.iter().find(|b| b.category == "Food & Dining").unwrap();
    assert_eq!(food.spent, 45.0);
    assert_eq!(food.month, "2026-03");

    assert!(commands::cmd_budget_set(&store, &notifier, "Travel", 0.0, today(), SYMBOL).is_err());
    assert!(commands::cmd_budget_list(&store, today(), SYMBOL).is_ok());
    assert!(commands::cmd_budget_list(&MemoryLedger::new(), today(), SYMBOL).is_ok());
}

#[test]
fn test_cmd_budget_suggest() {
    let store = setup_test_ledger();
    assert_eq!(
        commands::cmd_budget_suggest(&store, "Travel", today(), SYMBOL).unwrap(),
        500.0
    );
    // (120 + 80) / 3 * 1.1
    assert_eq!(
        commands::cmd_budget_suggest(&store, "Shopping", today(), SYMBOL).unwrap(),
        73.0
    );
}

#[test]
fn test_cmd_budget_refresh() {
    let store = MemoryLedger::with_data(
        vec![expense(70.0, "Travel", date(2026, 3, 2))],
        vec![budget("Travel", 100.0, "2026-03", 0.0)],
        vec![],
    );
    let notifier = RecordingNotifier::new();

    commands::cmd_budget_refresh(&store, &notifier, today()).unwrap();
    assert_eq!(store.list_budgets().unwrap()[0].spent, 70.0);
}

// ========== Goal Command Tests ==========

#[test]
fn test_cmd_goal_add_fund_delete() {
    let store = MemoryLedger::new();
    let notifier = RecordingNotifier::new();

    let goal = commands::cmd_goal_add(
        &store, &notifier, "Bike", 800.0, 100.0, "2026-09-01", today(), SYMBOL,
    )
    .unwrap();
    assert_eq!(goal.created_at, today());

    let funded = commands::cmd_goal_fund(&store, &notifier, &goal.id, 700.0, SYMBOL).unwrap();
    assert_eq!(funded.current_amount, 800.0);

    assert!(commands::cmd_goal_list(&store, today(), SYMBOL).is_ok());

    commands::cmd_goal_delete(&store, &notifier, &goal.id).unwrap();
    assert!(store.list_goals().unwrap().is_empty());
    assert!(commands::cmd_goal_delete(&store, &notifier, &goal.id).is_err());
}

#[test]
fn test_cmd_goal_validation() {
    let store = MemoryLedger::new();
    let notifier = RecordingNotifier::new();

    assert!(commands::cmd_goal_add(
        &store, &notifier, "Bike", 0.0, 0.0, "2026-09-01", today(), SYMBOL
    )
    .is_err());
    assert!(commands::cmd_goal_add(
        &store, &notifier, "Bike", 800.0, -1.0, "2026-09-01", today(), SYMBOL
    )
    .is_err());
    assert!(commands::cmd_goal_add(
        &store, &notifier, "Bike", 800.0, 0.0, "next year", today(), SYMBOL
    )
    .is_err());
    assert!(commands::cmd_goal_fund(&store, &notifier, "missing", 5.0, SYMBOL).is_err());
    assert!(store.list_goals().unwrap().is_empty());
}

// ========== Report Command Tests ==========

#[test]
fn test_report_commands() {
    let store = setup_test_ledger();

    assert!(commands::cmd_report_health(&store, today(), false).is_ok());
    assert!(commands::cmd_report_health(&store, today(), true).is_ok());
    assert!(commands::cmd_report_trend(&store, 6, today(), SYMBOL).is_ok());
    assert!(commands::cmd_report_categories(&store, "monthly", today(), SYMBOL).is_ok());
    assert!(commands::cmd_report_categories(&store, "weekly", today(), SYMBOL).is_ok());
    assert!(commands::cmd_report_spikes(&store, today(), SYMBOL).is_ok());
    assert!(commands::cmd_report_waste(&store, today(), SYMBOL).is_ok());
}

#[test]
fn test_report_rejects_bad_arguments() {
    let store = setup_test_ledger();
    assert!(commands::cmd_report_trend(&store, 0, today(), SYMBOL).is_err());
    let err = commands::cmd_report_categories(&store, "fortnightly", today(), SYMBOL).unwrap_err();
    assert!(err.to_string().contains("Unknown period"));
}

// ========== Export Command Tests ==========

#[test]
fn test_cmd_export() {
    let store = setup_test_ledger();
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("export.csv");

    let path = commands::cmd_export(&store, Some(&output), today()).unwrap();
    assert_eq!(path, output);

    let contents = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "Date,Type,Category,Description,Amount,Recurring");
    assert_eq!(lines.len(), 4);
    // Newest first
    assert!(lines[1].starts_with("2026-03-05"));
}
