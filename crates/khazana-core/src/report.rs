//! Full analysis report
//!
//! Bundles every aggregate, the forecast and the insight findings for one
//! table into a single serializable value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate;
use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::forecast::{Forecast, Forecaster};
use crate::insights::{AnalysisContext, Finding, InsightEngine};
use crate::models::{
    CategoryBreakdown, CategoryTotal, ChartSeries, FinancialStatistics, MonthSummary, Transaction,
    WeekendSplit,
};
use crate::table::{Split, TransactionTable};

/// Spending patterns over the expense set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingPatterns {
    /// Month (1..12) -> mean expense, all years combined
    pub monthly_average: BTreeMap<u32, f64>,
    /// Weekday (0 = Monday) -> mean expense
    pub weekday_average: BTreeMap<u32, f64>,
    /// Highest-spending categories (empty without a category column)
    pub category_totals: Vec<CategoryTotal>,
    pub weekend_split: WeekendSplit,
}

impl SpendingPatterns {
    /// Compute patterns, keeping at most `top_categories` category rows
    pub fn analyze(split: &Split<'_>, top_categories: usize) -> Self {
        let mut category_totals = if split.has_category {
            aggregate::total_by_category(&split.expenses)
        } else {
            Vec::new()
        };
        category_totals.truncate(top_categories);

        Self {
            monthly_average: aggregate::average_by_month(&split.expenses),
            weekday_average: aggregate::average_by_weekday(&split.expenses),
            category_totals,
            weekend_split: aggregate::weekend_split(&split.expenses),
        }
    }
}

/// Everything the analyzer knows about one export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub transaction_count: usize,
    pub has_category: bool,
    pub statistics: FinancialStatistics,
    pub patterns: SpendingPatterns,
    pub monthly_summary: Vec<MonthSummary>,
    pub category_breakdown: Vec<CategoryBreakdown>,
    pub top_expenses: Vec<Transaction>,
    /// `None` when there are no expense rows
    pub forecast: Option<Forecast>,
    pub insights: Vec<Finding>,
    pub charts: ChartSeries,
}

impl AnalysisReport {
    pub fn build(table: &TransactionTable, config: &AnalyzerConfig) -> Self {
        let split = table.split();

        let forecast = Forecaster::with_params(config.forecast).predict(&split.expenses);
        let statistics = aggregate::statistics(&split, table.unclassified_count());
        let patterns = SpendingPatterns::analyze(&split, config.report.top_categories);
        let monthly_summary = aggregate::monthly_summary(&split);
        let category_breakdown = aggregate::category_breakdown(&split.expenses);
        let top_expenses = aggregate::top_expenses(&split.expenses, config.report.top_expenses)
            .into_iter()
            .cloned()
            .collect();
        let charts = aggregate::chart_series(&split);

        let ctx = AnalysisContext::from_split(split, config.insights);
        let insights = InsightEngine::new().analyze_all(&ctx);

        debug!(
            rows = table.len(),
            findings = insights.len(),
            "Built analysis report"
        );

        Self {
            transaction_count: table.len(),
            has_category: table.has_category(),
            statistics,
            patterns,
            monthly_summary,
            category_breakdown,
            top_expenses,
            forecast,
            insights,
            charts,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
