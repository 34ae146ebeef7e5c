//! Savings Rate Insight
//!
//! Always emitted: buckets the share of income left after expenses.

use crate::aggregate;
use crate::error::Result;

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightData, InsightType, SavingsBucket, SavingsRateData};

pub struct SavingsRateInsight;

impl SavingsRateInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SavingsRateInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for SavingsRateInsight {
    fn id(&self) -> InsightType {
        InsightType::SavingsRate
    }

    fn name(&self) -> &'static str {
        "Savings Rate"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
        let total_income = ctx.split.total_income();
        let total_expense = ctx.split.total_expense();
        let rate = aggregate::savings_rate(total_income, total_expense);
        let bucket = SavingsBucket::classify(
            rate,
            ctx.thresholds.excellent_threshold,
            ctx.thresholds.good_threshold,
        );

        Ok(vec![Finding::new(
            self.id(),
            format!("savings_rate:{}", bucket),
            bucket.severity(),
            InsightData::SavingsRate(SavingsRateData {
                rate,
                bucket,
                total_income,
                total_expense,
            }),
        )])
    }
}
