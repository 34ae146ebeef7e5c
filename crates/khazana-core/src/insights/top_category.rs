//! Top Category Insight

use crate::aggregate;
use crate::error::Result;

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightData, InsightType, Severity, TopCategoryData};

/// Reports the highest-spending category when the export has categories
pub struct TopCategoryInsight;

impl TopCategoryInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TopCategoryInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for TopCategoryInsight {
    fn id(&self) -> InsightType {
        InsightType::TopCategory
    }

    fn name(&self) -> &'static str {
        "Top Category"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
        if !ctx.split.has_category {
            return Ok(vec![]);
        }

        let Some(top) = aggregate::top_category(&ctx.split.expenses) else {
            return Ok(vec![]);
        };

        let total_expense = ctx.split.total_expense();
        let share = if total_expense > 0.0 {
            top.total / total_expense * 100.0
        } else {
            0.0
        };

        Ok(vec![Finding::new(
            self.id(),
            format!("top_category:{}", top.category),
            Severity::Info,
            InsightData::TopCategory(TopCategoryData {
                category: top.category,
                total: top.total,
                share,
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
    fn test_top_category_share() {
        let table = TableBuilder::new()
            .with_category()
            .expense_in("2024-01-01", 300.0, "Rent")
            .expense_in("2024-01-02", 100.0, "Food")
            .expense_in("2024-01-03", 100.0, "Food")
            .build();
        let ctx = AnalysisContext::new(&table, InsightThresholds::default());
        let findings = TopCategoryInsight::new().analyze(&ctx).unwrap();

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].key, "top_category:Rent");
        match &findings[0].data {
            InsightData::TopCategory(d) => {
                assert_eq!(d.category, "Rent");
                assert_eq!(d.total, 300.0);
                assert!((d.share - 60.0).abs() < 1e-9);
            }
            other => panic!("unexpected data {:?}", other),
        }
    }

    #[test]
    fn test_without_category_column() {
        let table = TableBuilder::new().expense("2024-01-01", 300.0).build();
        let ctx = AnalysisContext::new(&table, InsightThresholds::default());
        assert!(TopCategoryInsight::new().analyze(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_column_present_but_all_blank() {
        let table = TableBuilder::new()
            .with_category()
            .expense("2024-01-01", 300.0)
            .build();
        let ctx = AnalysisContext::new(&table, InsightThresholds::default());
        assert!(TopCategoryInsight::new().analyze(&ctx).unwrap().is_empty());
    }
}
