//! Insight engine - rule-based financial insights
//!
//! Each rule implements [`Insight`] and turns aggregates of one table into
//! zero or more structured [`Finding`]s. Formatting is left to the caller.
//!
//! ## Built-in rules
//!
//! - **Savings Rate** - buckets the savings rate (always emitted)
//! - **Weekend Spending** - weekend expenses above weekday expenses
//! - **Top Category** - highest-spending category (needs a category column)
//! - **Spending Trend** - recent expenses vs the window before them
//!
//! ## Usage
//!
//! ```rust,ignore
//! use khazana_core::insights::{AnalysisContext, InsightEngine};
//!
//! let ctx = AnalysisContext::new(&table, config.insights);
//! let findings = InsightEngine::new().analyze_all(&ctx);
//! ```

pub mod engine;
pub mod savings_rate;
pub mod spending_trend;
pub mod top_category;
pub mod types;
pub mod weekend_spending;

pub use engine::{AnalysisContext, Insight, InsightEngine};
pub use savings_rate::SavingsRateInsight;
pub use spending_trend::SpendingTrendInsight;
pub use top_category::TopCategoryInsight;
pub use types::{
    Finding, InsightData, InsightType, SavingsBucket, SavingsRateData, Severity,
    SpendingTrendData, TopCategoryData, TrendDirection, WeekendSpendingData,
};
pub use weekend_spending::WeekendSpendingInsight;
