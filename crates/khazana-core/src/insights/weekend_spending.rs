//! Weekend Spending Insight
//!
//! Emitted only when weekend expenses exceed weekday expenses.

use crate::aggregate;
use crate::error::Result;

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightData, InsightType, Severity, WeekendSpendingData};

pub struct WeekendSpendingInsight;

impl WeekendSpendingInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WeekendSpendingInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for WeekendSpendingInsight {
    fn id(&self) -> InsightType {
        InsightType::WeekendSpending
    }

    fn name(&self) -> &'static str {
        "Weekend Spending"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
        let split = aggregate::weekend_split(&ctx.split.expenses);
        let total = split.total();

        if split.weekend_total <= split.weekday_total || total <= 0.0 {
            return Ok(vec![]);
        }

        Ok(vec![Finding::new(
            self.id(),
            "weekend_spending",
            Severity::Attention,
            InsightData::WeekendSpending(WeekendSpendingData {
                weekend_total: split.weekend_total,
                weekday_total: split.weekday_total,
                weekend_share: split.weekend_total / total * 100.0,
            }),
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InsightThresholds;
    use crate::test_utils::TableBuilder;

    #[test]
    fn test_weekend_dominant() {
        // Sat + Sun vs Monday
        let table = TableBuilder::new()
            .expense("2024-01-06", 300.0)
            .expense("2024-01-07", 100.0)
            .expense("2024-01-08", 100.0)
            .build();
        let ctx = AnalysisContext::new(&table, InsightThresholds::default());
        let findings = WeekendSpendingInsight::new().analyze(&ctx).unwrap();

        assert_eq!(findings.len(), 1);
        match &findings[0].data {
            InsightData::WeekendSpending(d) => {
                assert_eq!(d.weekend_total, 400.0);
                assert_eq!(d.weekday_total, 100.0);
                assert!((d.weekend_share - 80.0).abs() < 1e-9);
            }
            other => panic!("unexpected data {:?}", other),
        }
    }

    #[test]
    fn test_equal_split_not_reported() {
        let table = TableBuilder::new()
            .expense("2024-01-06", 100.0)
            .expense("2024-01-08", 100.0)
            .build();
        let ctx = AnalysisContext::new(&table, InsightThresholds::default());
        assert!(WeekendSpendingInsight::new().analyze(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_no_expenses_not_reported() {
        let table = TableBuilder::new().income("2024-01-06", 100.0).build();
        let ctx = AnalysisContext::new(&table, InsightThresholds::default());
        assert!(WeekendSpendingInsight::new().analyze(&ctx).unwrap().is_empty());
    }
}
