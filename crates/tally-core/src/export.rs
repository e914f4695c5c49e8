//! Transaction export
//!
//! CSV with one row per transaction:
//! `Date,Type,Category,Description,Amount,Recurring`. Amounts carry two
//! decimals and the recurring flag is `Yes`/`No`. Quoting of commas, quotes
//! and newlines is left to the csv writer.

use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::Transaction;

const HEADER: [&str; 6] = ["Date", "Type", "Category", "Description", "Amount", "Recurring"];

/// Write `transactions` as CSV to any writer
pub fn write_transactions_csv<W: Write>(writer: W, transactions: &[Transaction]) -> Result<W> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;

    for tx in transactions {
        let date = tx.date.to_string();
        let amount = format!("{:.2}", tx.amount);
        csv_writer.write_record([
            date.as_str(),
            tx.transaction_type.as_str(),
            tx.category.as_str(),
            tx.description.as_str(),
            amount.as_str(),
            if tx.is_recurring { "Yes" } else { "No" },
        ])?;
    }

    csv_writer.flush()?;
    csv_writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))
}

/// Render `transactions` as a CSV document
pub fn export_transactions_csv(transactions: &[Transaction]) -> Result<String> {
    let bytes = write_transactions_csv(Vec::new(), transactions)?;
    String::from_utf8(bytes).map_err(|e| Error::InvalidData(format!("CSV is not UTF-8: {}", e)))
}

/// Write the CSV export to `path`, returning the number of rows written
pub fn export_transactions_to_file(path: &Path, transactions: &[Transaction]) -> Result<usize> {
    let file = std::fs::File::create(path)?;
    write_transactions_csv(file, transactions)?;

    info!("Exported {} transactions to {}", transactions.len(), path.display());
    Ok(transactions.len())
}

/// Default export file name for a given day
pub fn default_export_filename(today: NaiveDate) -> String {
    format!("tally_transactions_{}.csv", today.format("%Y-%m-%d"))
}
