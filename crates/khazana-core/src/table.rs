//! Immutable enriched transaction table
//!
//! The table is built once per load and passed by reference into every
//! aggregate, forecast and insight. Nothing mutates it afterwards.

use tracing::{debug, warn};

use crate::features;
use crate::models::{Classification, Classifier, RawTransaction, Transaction};

/// Optional columns present in the source export, decided once at load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schema {
    pub has_category: bool,
    pub has_details: bool,
}

/// Loaded transactions with calendar features attached
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionTable {
    rows: Vec<Transaction>,
    schema: Schema,
}

impl TransactionTable {
    /// Derive features for every raw row and freeze the table
    pub fn new(raw: Vec<RawTransaction>, schema: Schema, classifier: &Classifier) -> Self {
        let rows: Vec<Transaction> = raw
            .into_iter()
            .map(|r| features::derive(r, classifier))
            .collect();

        let table = Self { rows, schema };

        let unclassified = table.unclassified_count();
        if unclassified > 0 {
            warn!(
                rows = unclassified,
                "Transactions with unrecognized types are excluded from all totals"
            );
        }
        debug!(
            rows = table.len(),
            has_category = schema.has_category,
            "Built transaction table"
        );

        table
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn has_category(&self) -> bool {
        self.schema.has_category
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Expense rows in table order
    pub fn expenses(&self) -> Vec<&Transaction> {
        self.by_classification(Classification::Expense)
    }

    /// Income rows in table order
    pub fn income(&self) -> Vec<&Transaction> {
        self.by_classification(Classification::Income)
    }

    pub fn unclassified_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|t| t.classification == Classification::Unclassified)
            .count()
    }

    /// Partition into expense and income sets (table order preserved)
    pub fn split(&self) -> Split<'_> {
        let mut expenses = Vec::new();
        let mut income = Vec::new();
        for tx in &self.rows {
            match tx.classification {
                Classification::Expense => expenses.push(tx),
                Classification::Income => income.push(tx),
                Classification::Unclassified => {}
            }
        }
        Split {
            expenses,
            income,
            has_category: self.schema.has_category,
        }
    }

    fn by_classification(&self, classification: Classification) -> Vec<&Transaction> {
        self.rows
            .iter()
            .filter(|t| t.classification == classification)
            .collect()
    }
}

/// The expense/income partition of a table
#[derive(Debug, Clone)]
pub struct Split<'a> {
    pub expenses: Vec<&'a Transaction>,
    pub income: Vec<&'a Transaction>,
    pub has_category: bool,
}

impl Split<'_> {
    pub fn total_expense(&self) -> f64 {
        self.expenses.iter().map(|t| t.amount).sum()
    }

    pub fn total_income(&self) -> f64 {
        self.income.iter().map(|t| t.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw(kind: &str, amount: f64) -> RawTransaction {
        RawTransaction {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            amount,
            kind: kind.to_string(),
            category: None,
            details: None,
        }
    }

    #[test]
    fn test_split_is_disjoint_and_ordered() {
        let table = TransactionTable::new(
            vec![
                raw("withdrawal", 10.0),
                raw("deposit", 100.0),
                raw("transfer", 20.0),
                raw("refund", 5.0),
                raw("received", 50.0),
            ],
            Schema::default(),
            &Classifier::default(),
        );

        let split = table.split();
        let expense_amounts: Vec<f64> = split.expenses.iter().map(|t| t.amount).collect();
        let income_amounts: Vec<f64> = split.income.iter().map(|t| t.amount).collect();

        assert_eq!(expense_amounts, vec![10.0, 20.0]);
        assert_eq!(income_amounts, vec![100.0, 50.0]);
        assert_eq!(table.unclassified_count(), 1);
        assert_eq!(split.total_expense(), 30.0);
        assert_eq!(split.total_income(), 150.0);
    }

    #[test]
    fn test_schema_capability() {
        let table = TransactionTable::new(
            vec![],
            Schema {
                has_category: true,
                has_details: false,
            },
            &Classifier::default(),
        );
        assert!(table.is_empty());
        assert!(table.has_category());
        assert!(table.split().has_category);
    }

    #[test]
    fn test_expenses_matches_split() {
        let table = TransactionTable::new(
            vec![raw("withdrawal", 1.0), raw("deposit", 2.0)],
            Schema::default(),
            &Classifier::default(),
        );
        assert_eq!(table.expenses().len(), 1);
        assert_eq!(table.income().len(), 1);
        assert_eq!(table.expenses(), table.split().expenses);
    }
}
