//! Insight engine - runs every registered rule over one table

use tracing::{debug, warn};

use crate::config::InsightThresholds;
use crate::table::{Split, TransactionTable};
use crate::Result;

use super::types::{Finding, InsightType};
use super::{SavingsRateInsight, SpendingTrendInsight, TopCategoryInsight, WeekendSpendingInsight};

/// Context provided to insight rules
pub struct AnalysisContext<'a> {
    /// Expense/income partition of the table
    pub split: Split<'a>,
    pub thresholds: InsightThresholds,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(table: &'a TransactionTable, thresholds: InsightThresholds) -> Self {
        Self {
            split: table.split(),
            thresholds,
        }
    }

    pub fn from_split(split: Split<'a>, thresholds: InsightThresholds) -> Self {
        Self { split, thresholds }
    }
}

/// Trait for insight rules
pub trait Insight: Send + Sync {
    /// Unique identifier for this insight type
    fn id(&self) -> InsightType;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule; an empty result means the rule does not apply
    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>>;
}

/// The main insight engine
pub struct InsightEngine {
    insights: Vec<Box<dyn Insight>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in rules
    pub fn new() -> Self {
        let mut engine = Self::empty();

        engine.register(Box::new(SavingsRateInsight::new()));
        engine.register(Box::new(WeekendSpendingInsight::new()));
        engine.register(Box::new(TopCategoryInsight::new()));
        engine.register(Box::new(SpendingTrendInsight::new()));

        engine
    }

    /// Create an engine with no rules registered
    pub fn empty() -> Self {
        Self { insights: vec![] }
    }

    pub fn register(&mut self, insight: Box<dyn Insight>) {
        self.insights.push(insight);
    }

    /// Run all rules and collect findings, most severe first
    ///
    /// A failing rule is logged and skipped. Findings of equal severity keep
    /// registration order.
    pub fn analyze_all(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        let mut all_findings = vec![];

        for insight in &self.insights {
            match insight.analyze(ctx) {
                Ok(findings) => {
                    debug!(
                        insight = insight.id().as_str(),
                        count = findings.len(),
                        "Insight analysis complete"
                    );
                    all_findings.extend(findings);
                }
                Err(e) => {
                    warn!(
                        insight = insight.id().as_str(),
                        error = %e,
                        "Insight analysis failed"
                    );
                }
            }
        }

        all_findings.sort_by(|a, b| b.severity.priority().cmp(&a.severity.priority()));
        all_findings
    }

    /// Get list of registered insight types
    pub fn insight_types(&self) -> Vec<InsightType> {
        self.insights.iter().map(|i| i.id()).collect()
    }
}
