//! Analyzer configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. Explicit path, or the override in the data dir
//!    (~/.local/share/khazana/config/analyzer.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::forecast::ForecastParams;
use crate::models::{Classifier, DEFAULT_EXPENSE_TYPES, DEFAULT_INCOME_TYPES};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analyzer.toml");

/// Thresholds used by the insight rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InsightThresholds {
    /// Savings rate strictly above this is excellent
    pub excellent_threshold: f64,
    /// Savings rate strictly above this (and not excellent) is good
    pub good_threshold: f64,
    pub trend_window: usize,
    pub trend_increase_ratio: f64,
    pub trend_decrease_ratio: f64,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            excellent_threshold: 30.0,
            good_threshold: 10.0,
            trend_window: 10,
            trend_increase_ratio: 1.2,
            trend_decrease_ratio: 0.8,
        }
    }
}

/// Transaction type vocabularies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationConfig {
    pub expense_types: Vec<String>,
    pub income_types: Vec<String>,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            expense_types: DEFAULT_EXPENSE_TYPES.iter().map(|s| s.to_string()).collect(),
            income_types: DEFAULT_INCOME_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ClassificationConfig {
    pub fn classifier(&self) -> Classifier {
        Classifier::new(&self.expense_types, &self.income_types)
    }
}

/// Row limits for report listings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportLimits {
    pub top_categories: usize,
    pub top_expenses: usize,
}

impl Default for ReportLimits {
    fn default() -> Self {
        Self {
            top_categories: 5,
            top_expenses: 5,
        }
    }
}

/// Full analyzer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    pub forecast: ForecastParams,
    pub insights: InsightThresholds,
    pub classification: ClassificationConfig,
    pub report: ReportLimits,
    /// Directory chart SVGs are written to
    pub chart_dir: PathBuf,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            forecast: ForecastParams::default(),
            insights: InsightThresholds::default(),
            classification: ClassificationConfig::default(),
            report: ReportLimits::default(),
            chart_dir: PathBuf::from("khazana_charts"),
        }
    }
}

impl AnalyzerConfig {
    /// Load from the explicit path if given, else the data-dir override, else defaults
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let content = match resolve_path(override_path) {
            Some(path) => {
                debug!(path = %path.display(), "Loading analyzer config");
                fs::read_to_string(&path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?
            }
            None => DEFAULT_CONFIG.to_string(),
        };

        parse_config(&content)
    }

    /// Parse config from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }

    pub fn classifier(&self) -> Classifier {
        self.classification.classifier()
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("khazana").join("config").join("analyzer.toml"))
}

/// Which file (if any) the config will be read from
///
/// An explicit path is always returned, even when missing, so that a typo
/// surfaces as a read error instead of silently using defaults.
pub fn resolve_path(override_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path.to_path_buf());
    }
    default_config_path().filter(|p| p.exists())
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    forecast: Option<RawForecast>,
    insights: Option<RawInsights>,
    classification: Option<RawClassification>,
    report: Option<RawReport>,
    charts: Option<RawCharts>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    window_size: Option<usize>,
    period_length: Option<u32>,
    budget_buffer: Option<f64>,
    savings_goal_ratio: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawInsights {
    excellent_threshold: Option<f64>,
    good_threshold: Option<f64>,
    trend_window: Option<usize>,
    trend_increase_ratio: Option<f64>,
    trend_decrease_ratio: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawClassification {
    expense_types: Option<Vec<String>>,
    income_types: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawReport {
    top_categories: Option<usize>,
    top_expenses: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawCharts {
    output_dir: Option<PathBuf>,
}

fn parse_config(content: &str) -> Result<AnalyzerConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = AnalyzerConfig::default();

    if let Some(forecast) = raw.forecast {
        if let Some(window) = forecast.window_size {
            config.forecast.window_size = window;
        }
        if let Some(period) = forecast.period_length {
            config.forecast.period_length = period;
        }
        if let Some(buffer) = forecast.budget_buffer {
            config.forecast.budget_buffer = buffer;
        }
        if let Some(ratio) = forecast.savings_goal_ratio {
            config.forecast.savings_goal_ratio = ratio;
        }
    }

    if let Some(insights) = raw.insights {
        if let Some(t) = insights.excellent_threshold {
            config.insights.excellent_threshold = t;
        }
        if let Some(t) = insights.good_threshold {
            config.insights.good_threshold = t;
        }
        if let Some(w) = insights.trend_window {
            config.insights.trend_window = w;
        }
        if let Some(r) = insights.trend_increase_ratio {
            config.insights.trend_increase_ratio = r;
        }
        if let Some(r) = insights.trend_decrease_ratio {
            config.insights.trend_decrease_ratio = r;
        }
    }

    if let Some(classification) = raw.classification {
        if let Some(types) = classification.expense_types {
            config.classification.expense_types = types;
        }
        if let Some(types) = classification.income_types {
            config.classification.income_types = types;
        }
    }

    if let Some(report) = raw.report {
        if let Some(n) = report.top_categories {
            config.report.top_categories = n;
        }
        if let Some(n) = report.top_expenses {
            config.report.top_expenses = n;
        }
    }

    if let Some(charts) = raw.charts {
        if let Some(dir) = charts.output_dir {
            config.chart_dir = dir;
        }
    }

    validate(&config)?;
    Ok(config)
}

fn validate(config: &AnalyzerConfig) -> Result<()> {
    if config.insights.good_threshold > config.insights.excellent_threshold {
        return Err(Error::Config(format!(
            "good_threshold ({}) must not exceed excellent_threshold ({})",
            config.insights.good_threshold, config.insights.excellent_threshold
        )));
    }

    let overlap = config
        .classification
        .expense_types
        .iter()
        .find(|t| {
            config
                .classification
                .income_types
                .iter()
                .any(|i| i.trim().eq_ignore_ascii_case(t.trim()))
        });
    if let Some(t) = overlap {
        return Err(Error::Config(format!(
            "Type '{}' is listed as both expense and income",
            t
        )));
    }

    Ok(())
}
