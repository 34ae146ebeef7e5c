//! Spending Trend Insight
//!
//! Compares the mean of the last `trend_window` expense rows with the mean
//! of the `trend_window` rows before them (table order).

use crate::error::Result;
use crate::models::Transaction;

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightData, InsightType, Severity, SpendingTrendData, TrendDirection};

pub struct SpendingTrendInsight;

impl SpendingTrendInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SpendingTrendInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for SpendingTrendInsight {
    fn id(&self) -> InsightType {
        InsightType::SpendingTrend
    }

    fn name(&self) -> &'static str {
        "Spending Trend"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
        let window = ctx.thresholds.trend_window;
        let expenses = &ctx.split.expenses;

        let recent_start = expenses.len().saturating_sub(window);
        let previous_start = recent_start.saturating_sub(window);
        let recent = &expenses[recent_start..];
        let previous = &expenses[previous_start..recent_start];

        let (Some(recent_average), Some(previous_average)) = (mean(recent), mean(previous)) else {
            return Ok(vec![]);
        };

        let direction = if recent_average > previous_average * ctx.thresholds.trend_increase_ratio
        {
            TrendDirection::Increasing
        } else if recent_average < previous_average * ctx.thresholds.trend_decrease_ratio {
            TrendDirection::Decreasing
        } else {
            return Ok(vec![]);
        };

        let severity = match direction {
            TrendDirection::Increasing => Severity::Attention,
            TrendDirection::Decreasing => Severity::Info,
        };

        Ok(vec![Finding::new(
            self.id(),
            format!("spending_trend:{}", direction),
            severity,
            InsightData::SpendingTrend(SpendingTrendData {
                direction,
                recent_average,
                previous_average,
                window,
            }),
        )])
    }
}

fn mean(rows: &[&Transaction]) -> Option<f64> {
    if rows.is_empty() {
        return None;
    }
    Some(rows.iter().map(|t| t.amount).sum::<f64>() / rows.len() as f64)
}
