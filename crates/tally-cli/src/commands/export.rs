//! Export command implementation

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tally_core::export::{default_export_filename, export_transactions_to_file};
use tally_core::LedgerStore;

pub fn cmd_export(store: &dyn LedgerStore, output: Option<&Path>, today: NaiveDate) -> Result<PathBuf> {
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(default_export_filename(today)));

    let mut transactions = store.list_transactions()?;
    transactions.sort_by(|a, b| b.date.cmp(&a.date));

    let count = export_transactions_to_file(&path, &transactions)
        .with_context(|| format!("Failed to export to {}", path.display()))?;

    println!("📤 Exported {} transactions to {}", count, path.display());
    Ok(path)
}
