//! Enriched transaction export
//!
//! Writes the table with its derived calendar fields as CSV:
//! `date,type,category,amount,day,month,year,day_of_week,is_weekend`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::Transaction;
use crate::table::TransactionTable;

/// Category label written for rows without one
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One exported row
#[derive(Debug, Clone, Serialize)]
struct EnrichedRow<'a> {
    date: NaiveDate,
    #[serde(rename = "type")]
    kind: &'a str,
    category: &'a str,
    amount: f64,
    day: u32,
    month: u32,
    year: i32,
    day_of_week: u32,
    is_weekend: bool,
}

impl<'a> From<&'a Transaction> for EnrichedRow<'a> {
    fn from(tx: &'a Transaction) -> Self {
        Self {
            date: tx.date,
            kind: &tx.kind,
            category: tx.category.as_deref().unwrap_or(UNCATEGORIZED),
            amount: tx.amount,
            day: tx.day,
            month: tx.month,
            year: tx.year,
            day_of_week: tx.day_of_week,
            is_weekend: tx.is_weekend,
        }
    }
}

/// Write every row (including unclassified ones) to `writer`
///
/// Returns the number of rows written.
pub fn export_csv<W: Write>(table: &TransactionTable, writer: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);

    for tx in table.rows() {
        wtr.serialize(EnrichedRow::from(tx))?;
    }
    wtr.flush()?;

    Ok(table.len())
}

/// Export to an in-memory string
pub fn export_csv_string(table: &TransactionTable) -> Result<String> {
    let mut buf = Vec::new();
    export_csv(table, &mut buf)?;
    String::from_utf8(buf).map_err(|e| Error::InvalidData(format!("Export is not UTF-8: {}", e)))
}

/// Export to a file, creating or truncating it
pub fn export_to_path(table: &TransactionTable, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let count = export_csv(table, file)?;
    info!(file = %path.display(), rows = count, "Exported enriched transactions");
    Ok(count)
}
