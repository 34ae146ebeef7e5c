//! Domain models for Khazana

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Short weekday labels indexed by `day_of_week` (0 = Monday)
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Default transaction types counted as expenses
pub const DEFAULT_EXPENSE_TYPES: [&str; 2] = ["withdrawal", "transfer"];

/// Default transaction types counted as income
pub const DEFAULT_INCOME_TYPES: [&str; 2] = ["deposit", "received"];

/// A transaction as read from the export, before feature derivation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub date: NaiveDate,
    pub amount: f64,
    /// Transaction type as written in the export (`withdrawal`, `deposit`, ...)
    pub kind: String,
    pub category: Option<String>,
    pub details: Option<String>,
}

/// Which side of the ledger a transaction lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Expense,
    Income,
    /// Type is in neither vocabulary; excluded from every aggregate
    Unclassified,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
            Self::Unclassified => "unclassified",
        }
    }
}

impl std::str::FromStr for Classification {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            "unclassified" => Ok(Self::Unclassified),
            _ => Err(format!("Unknown classification: {}", s)),
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Maps transaction types onto expense/income
///
/// Matching is case-insensitive and ignores surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    expense_types: Vec<String>,
    income_types: Vec<String>,
}

impl Classifier {
    pub fn new<S: AsRef<str>>(expense_types: &[S], income_types: &[S]) -> Self {
        let normalize = |types: &[S]| {
            types
                .iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .collect::<Vec<_>>()
        };
        Self {
            expense_types: normalize(expense_types),
            income_types: normalize(income_types),
        }
    }

    pub fn classify(&self, kind: &str) -> Classification {
        let kind = kind.trim().to_lowercase();
        if self.expense_types.iter().any(|t| *t == kind) {
            Classification::Expense
        } else if self.income_types.iter().any(|t| *t == kind) {
            Classification::Income
        } else {
            Classification::Unclassified
        }
    }

    pub fn expense_types(&self) -> &[String] {
        &self.expense_types
    }

    pub fn income_types(&self) -> &[String] {
        &self.income_types
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&DEFAULT_EXPENSE_TYPES, &DEFAULT_INCOME_TYPES)
    }
}

/// A transaction enriched with calendar features and its classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub amount: f64,
    pub kind: String,
    pub category: Option<String>,
    pub details: Option<String>,
    pub day: u32,
    pub month: u32,
    pub year: i32,
    /// 0 = Monday .. 6 = Sunday
    pub day_of_week: u32,
    pub is_weekend: bool,
    pub classification: Classification,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.classification == Classification::Expense
    }

    pub fn is_income(&self) -> bool {
        self.classification == Classification::Income
    }

    /// Year-month key used by monthly summaries and trend series (e.g. "2024-03")
    pub fn period_key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

// ========== Report Models ==========

/// Total spending for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Per-category totals with counts and averages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub total: f64,
    pub transaction_count: usize,
    pub average: f64,
}

/// Expense totals split by the weekend flag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeekendSplit {
    pub weekend_total: f64,
    pub weekday_total: f64,
}

impl WeekendSplit {
    pub fn total(&self) -> f64 {
        self.weekend_total + self.weekday_total
    }
}

/// Overall income/expense statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialStatistics {
    pub total_income: f64,
    pub total_expense: f64,
    pub net_balance: f64,
    pub income_count: usize,
    pub expense_count: usize,
    /// Rows whose type matched neither vocabulary
    pub unclassified_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_income: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_expense: Option<f64>,
    pub savings_rate: f64,
}

/// Income and expense for one calendar month (year-scoped)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    /// "YYYY-MM"
    pub period: String,
    pub year: i32,
    pub month: u32,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
    pub transaction_count: usize,
}

/// A single data point in a monthly trend series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendDataPoint {
    pub period: String,
    pub amount: f64,
    pub transaction_count: usize,
}

/// Expense total for one calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAmount {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Expense total for one weekday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayTotal {
    pub day_of_week: u32,
    pub label: String,
    pub amount: f64,
}

/// Everything the chart renderer consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub monthly_expense: Vec<TrendDataPoint>,
    pub monthly_income: Vec<TrendDataPoint>,
    /// Empty when the export has no category column
    pub categories: Vec<CategoryTotal>,
    /// Always seven entries, Monday first, zero-filled
    pub weekday_totals: Vec<WeekdayTotal>,
    pub daily_expense: Vec<DailyAmount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifier_defaults() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify("withdrawal"), Classification::Expense);
        assert_eq!(classifier.classify("transfer"), Classification::Expense);
        assert_eq!(classifier.classify("deposit"), Classification::Income);
        assert_eq!(classifier.classify("received"), Classification::Income);
        assert_eq!(classifier.classify("refund"), Classification::Unclassified);
    }

    #[test]
    fn test_classifier_normalizes_case_and_whitespace() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify(" Withdrawal "), Classification::Expense);
        assert_eq!(classifier.classify("DEPOSIT"), Classification::Income);

        let custom = Classifier::new(&["  Purchase"], &["Salary "]);
        assert_eq!(custom.classify("purchase"), Classification::Expense);
        assert_eq!(custom.classify("salary"), Classification::Income);
        assert_eq!(custom.classify("withdrawal"), Classification::Unclassified);
    }

    #[test]
    fn test_classification_round_trip_str() {
        use std::str::FromStr;
        assert_eq!(
            Classification::from_str("Expense").unwrap(),
            Classification::Expense
        );
        assert_eq!(Classification::Income.to_string(), "income");
        assert!(Classification::from_str("other").is_err());
    }
}
