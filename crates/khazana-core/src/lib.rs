//! Khazana Core Library
//!
//! Analysis engine for personal-finance transaction exports:
//! - CSV loading with flexible column, date and amount formats
//! - Calendar feature derivation and expense/income classification
//! - Aggregates (monthly, weekday, category, savings rate, weekend split)
//! - Moving-average expense forecast
//! - Pluggable rule-based insight engine
//! - Full analysis report and enriched CSV export

pub mod aggregate;
pub mod config;
pub mod error;
pub mod export;
pub mod features;
pub mod forecast;
pub mod import;
pub mod insights;
pub mod models;
pub mod report;
pub mod table;

/// Table builders and sample fixtures
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{AnalyzerConfig, ClassificationConfig, InsightThresholds, ReportLimits};
pub use error::{Error, Result};
pub use forecast::{predict_next_period, Forecast, ForecastParams, Forecaster};
pub use import::{load_csv, parse_csv};
pub use insights::{AnalysisContext, Finding, Insight, InsightEngine, InsightType, Severity};
pub use models::{Classification, Classifier, Transaction};
pub use report::{AnalysisReport, SpendingPatterns};
pub use table::{Schema, Split, TransactionTable};
