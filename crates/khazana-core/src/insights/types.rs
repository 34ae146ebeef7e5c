//! Core types for the insight engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Types of insights that can be generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    /// Share of income left after expenses
    SavingsRate,
    /// Weekend spending outweighs weekday spending
    WeekendSpending,
    /// Category with the highest expense total
    TopCategory,
    /// Recent expenses vs the window before them
    SpendingTrend,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::SavingsRate => "savings_rate",
            InsightType::WeekendSpending => "weekend_spending",
            InsightType::TopCategory => "top_category",
            InsightType::SpendingTrend => "spending_trend",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "savings_rate" => Ok(InsightType::SavingsRate),
            "weekend_spending" => Ok(InsightType::WeekendSpending),
            "top_category" => Ok(InsightType::TopCategory),
            "spending_trend" => Ok(InsightType::SpendingTrend),
            _ => Err(format!("Unknown insight type: {}", s)),
        }
    }
}

/// Severity level of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational - no action needed
    Info,
    /// Worth attention but not urgent
    Attention,
    /// Should be addressed soon
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Attention => "attention",
            Severity::Warning => "warning",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Info => 1,
            Severity::Attention => 2,
            Severity::Warning => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Severity::Info),
            "attention" => Ok(Severity::Attention),
            "warning" => Ok(Severity::Warning),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// Savings-rate bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavingsBucket {
    Excellent,
    Good,
    Low,
}

impl SavingsBucket {
    /// Bucket a rate given the two thresholds
    ///
    /// Both comparisons are strict: a rate equal to `good` is low and a rate
    /// equal to `excellent` is good.
    pub fn classify(rate: f64, excellent: f64, good: f64) -> Self {
        if rate > excellent {
            SavingsBucket::Excellent
        } else if rate > good {
            SavingsBucket::Good
        } else {
            SavingsBucket::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SavingsBucket::Excellent => "excellent",
            SavingsBucket::Good => "good",
            SavingsBucket::Low => "low",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            SavingsBucket::Excellent | SavingsBucket::Good => Severity::Info,
            SavingsBucket::Low => Severity::Warning,
        }
    }
}

impl fmt::Display for SavingsBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of recent spending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A finding produced by an insight rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Type of insight that generated this finding
    pub insight_type: InsightType,
    /// Stable key (e.g. "savings_rate:low", "top_category:Rent")
    pub key: String,
    pub severity: Severity,
    /// Insight-specific structured data
    pub data: InsightData,
}

impl Finding {
    pub fn new(
        insight_type: InsightType,
        key: impl Into<String>,
        severity: Severity,
        data: InsightData,
    ) -> Self {
        Self {
            insight_type,
            key: key.into(),
            severity,
            data,
        }
    }
}

/// Structured payload of a finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InsightData {
    SavingsRate(SavingsRateData),
    WeekendSpending(WeekendSpendingData),
    TopCategory(TopCategoryData),
    SpendingTrend(SpendingTrendData),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsRateData {
    /// Percentage, 0 when there is no income
    pub rate: f64,
    pub bucket: SavingsBucket,
    pub total_income: f64,
    pub total_expense: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekendSpendingData {
    pub weekend_total: f64,
    pub weekday_total: f64,
    /// Weekend total as a percentage of total expense
    pub weekend_share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCategoryData {
    pub category: String,
    pub total: f64,
    /// Percentage of total expense
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingTrendData {
    pub direction: TrendDirection,
    pub recent_average: f64,
    pub previous_average: f64,
    /// Rows in each compared window
    pub window: usize,
}
