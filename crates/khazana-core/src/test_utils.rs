//! Test utilities for building transaction tables
//!
//! Compiled for unit tests and behind the `test-utils` feature so the CLI
//! crate can build fixtures without going through CSV.

use chrono::NaiveDate;

use crate::models::{Classifier, RawTransaction};
use crate::table::{Schema, TransactionTable};

/// Fluent builder for [`TransactionTable`] fixtures
///
/// Dates are `YYYY-MM-DD` strings; rows keep insertion order.
#[derive(Debug, Default, Clone)]
pub struct TableBuilder {
    rows: Vec<RawTransaction>,
    schema: Schema,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the table as having a category column
    pub fn with_category(mut self) -> Self {
        self.schema.has_category = true;
        self
    }

    pub fn with_details(mut self) -> Self {
        self.schema.has_details = true;
        self
    }

    /// Add a row with an arbitrary type
    pub fn row(mut self, date: &str, amount: f64, kind: &str) -> Self {
        self.rows.push(RawTransaction {
            date: parse(date),
            amount,
            kind: kind.to_string(),
            category: None,
            details: None,
        });
        self
    }

    pub fn expense(self, date: &str, amount: f64) -> Self {
        self.row(date, amount, "withdrawal")
    }

    pub fn income(self, date: &str, amount: f64) -> Self {
        self.row(date, amount, "deposit")
    }

    pub fn expense_in(self, date: &str, amount: f64, category: &str) -> Self {
        self.expense(date, amount).categorized(category)
    }

    pub fn income_in(self, date: &str, amount: f64, category: &str) -> Self {
        self.income(date, amount).categorized(category)
    }

    /// Set the details text of the last added row
    pub fn described(mut self, details: &str) -> Self {
        if let Some(last) = self.rows.last_mut() {
            last.details = Some(details.to_string());
        }
        self
    }

    /// Add `count` identical expense rows on consecutive days starting at `start`
    pub fn repeated_expenses(mut self, start: &str, count: usize, amount: f64) -> Self {
        let mut date = parse(start);
        for _ in 0..count {
            self.rows.push(RawTransaction {
                date,
                amount,
                kind: "withdrawal".to_string(),
                category: None,
                details: None,
            });
            date = date.succ_opt().expect("date overflow in fixture");
        }
        self
    }

    pub fn build(self) -> TransactionTable {
        self.build_with(&Classifier::default())
    }

    pub fn build_with(self, classifier: &Classifier) -> TransactionTable {
        TransactionTable::new(self.rows, self.schema, classifier)
    }

    fn categorized(mut self, category: &str) -> Self {
        if let Some(last) = self.rows.last_mut() {
            last.category = Some(category.to_string());
        }
        self
    }
}

fn parse(date: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("fixture dates use YYYY-MM-DD")
}

/// Sample export in the Khazana CSV layout, with a category column
pub fn sample_csv() -> &'static str {
    r#"date,type,category,amount,details
2024-01-01,deposit,Salary,50000,January salary
2024-01-03,withdrawal,Food,450,Groceries
2024-01-06,withdrawal,Entertainment,1200,Movie night
2024-01-07,transfer,Family,5000,Sent home
2024-01-15,withdrawal,Food,300,Lunch
2024-01-20,withdrawal,Shopping,2500,Shoes
2024-02-01,deposit,Salary,50000,February salary
2024-02-03,withdrawal,Food,520,Groceries
2024-02-10,withdrawal,Entertainment,800,Concert
2024-02-14,withdrawal,Shopping,3000,Gift
2024-02-18,received,Refund,400,Returned item
2024-02-25,withdrawal,Rent,15000,February rent"#
}
