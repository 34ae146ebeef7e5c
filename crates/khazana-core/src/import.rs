//! CSV loader for Khazana transaction exports
//!
//! Expected header (case-insensitive, any column order):
//! `date,amount,type[,category][,details|description]`
//!
//! Any row that fails to parse aborts the whole load.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{Classifier, RawTransaction};
use crate::table::{Schema, TransactionTable};

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub amount: usize,
    pub kind: usize,
    pub category: Option<usize>,
    pub details: Option<usize>,
}

impl ColumnMap {
    pub fn schema(&self) -> Schema {
        Schema {
            has_category: self.category.is_some(),
            has_details: self.details.is_some(),
        }
    }
}

/// Resolve column positions from a header record
pub fn resolve_columns(headers: &StringRecord) -> Result<ColumnMap> {
    let find = |names: &[&str]| {
        headers.iter().position(|h| {
            let h = h.trim().trim_start_matches('\u{feff}').to_lowercase();
            names.iter().any(|n| *n == h)
        })
    };

    let date = find(&["date"]).ok_or_else(|| Error::MissingColumn("date".into()))?;
    let amount = find(&["amount"]).ok_or_else(|| Error::MissingColumn("amount".into()))?;
    let kind = find(&["type"]).ok_or_else(|| Error::MissingColumn("type".into()))?;

    Ok(ColumnMap {
        date,
        amount,
        kind,
        category: find(&["category"]),
        details: find(&["details", "description"]),
    })
}

/// Load and enrich a transaction export from disk
pub fn load_csv(path: impl AsRef<Path>, classifier: &Classifier) -> Result<TransactionTable> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| Error::Import(format!("Cannot open {}: {}", path.display(), e)))?;

    let table = parse_csv(file, classifier)?;
    info!(
        file = %path.display(),
        rows = table.len(),
        "Loaded transactions"
    );
    Ok(table)
}

/// Parse a transaction export and build the enriched table
pub fn parse_csv<R: Read>(reader: R, classifier: &Classifier) -> Result<TransactionTable> {
    let (records, schema) = read_records(reader)?;
    Ok(TransactionTable::new(records, schema, classifier))
}

/// Parse raw records without deriving features
pub fn read_records<R: Read>(reader: R) -> Result<(Vec<RawTransaction>, Schema)> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = resolve_columns(&headers)?;
    let mut transactions = Vec::new();

    for (index, result) in rdr.records().enumerate() {
        let record = result?;
        // Header is line 1
        let line = index + 2;

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let date_str = record
            .get(columns.date)
            .ok_or_else(|| Error::Import(format!("Line {}: missing date", line)))?;
        let date = parse_date(date_str).map_err(|e| at_line(line, e))?;

        let amount_str = record
            .get(columns.amount)
            .ok_or_else(|| Error::Import(format!("Line {}: missing amount", line)))?;
        let amount = parse_amount(amount_str).map_err(|e| at_line(line, e))?;

        let kind = record
            .get(columns.kind)
            .ok_or_else(|| Error::Import(format!("Line {}: missing type", line)))?
            .to_string();

        let optional = |col: Option<usize>| {
            col.and_then(|c| record.get(c))
                .map(|s| s.to_string())
                .filter(|s| !s.is_empty())
        };

        transactions.push(RawTransaction {
            date,
            amount,
            kind,
            category: optional(columns.category),
            details: optional(columns.details),
        });
    }

    debug!("Parsed {} transaction rows", transactions.len());
    Ok((transactions, columns.schema()))
}

fn at_line(line: usize, err: Error) -> Error {
    match err {
        Error::Import(msg) => Error::Import(format!("Line {}: {}", line, msg)),
        other => other,
    }
}

/// Parse a date string in any of the supported export formats
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    // %y before %Y: %Y accepts a two-digit year as year 24
    let formats = [
        "%Y-%m-%d", // 2024-01-15
        "%m/%d/%y", // 01/15/24
        "%m/%d/%Y", // 01/15/2024
        "%d-%m-%Y", // 15-01-2024
        "%Y/%m/%d", // 2024/01/15
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    // Timestamps ("2024-01-15T10:30:00", "2024-01-15 10:30:00") keep the date part
    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ];
    let trimmed = s.trim_end_matches('Z');
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt.date());
        }
    }

    Err(Error::Import(format!("Unable to parse date: {}", s)))
}

/// Parse a non-negative amount, tolerating currency symbols and thousands separators
///
/// The type column decides expense vs income, so a signed amount is rejected.
pub fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s.trim().replace(['$', '₹', '€', '£', ',', ' '], "");

    let amount = cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::Import(format!("Unable to parse amount: {}", s)))?;

    if amount < 0.0 {
        return Err(Error::Import(format!("negative amount: {}", s)));
    }
    Ok(amount)
}
