//! Next-period expense forecast
//!
//! The "recent" sample is the last `window_size` expense rows in table
//! order, not the last N calendar days. `daily_average` is the mean amount
//! per transaction in that sample; no resampling to calendar days happens.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Transaction;

/// Forecast knobs (all configurable through `[forecast]` in the config file)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastParams {
    /// Number of trailing expense rows to average
    pub window_size: usize,
    /// Length of the projected period in days
    pub period_length: u32,
    /// Budget headroom on top of the prediction (0.10 = 10%)
    pub budget_buffer: f64,
    /// Share of the prediction suggested as a savings goal
    pub savings_goal_ratio: f64,
}

impl Default for ForecastParams {
    fn default() -> Self {
        Self {
            window_size: 90,
            period_length: 30,
            budget_buffer: 0.10,
            savings_goal_ratio: 0.20,
        }
    }
}

/// Result of a next-period forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Rows actually averaged (min of window size and expense count)
    pub sample_size: usize,
    pub window_size: usize,
    pub period_length: u32,
    pub daily_average: f64,
    pub predicted_total: f64,
    pub recommended_budget: f64,
    pub savings_goal: f64,
}

/// Naive moving-average forecaster
#[derive(Debug, Clone, Default)]
pub struct Forecaster {
    params: ForecastParams,
}

impl Forecaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: ForecastParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ForecastParams {
        &self.params
    }

    /// Forecast the next period, or `None` when there are no expense rows
    pub fn predict(&self, expenses: &[&Transaction]) -> Option<Forecast> {
        let sample = recent_window(expenses, self.params.window_size);
        if sample.is_empty() {
            debug!("No expense rows in forecast window");
            return None;
        }

        let daily_average = sample.iter().map(|t| t.amount).sum::<f64>() / sample.len() as f64;
        let predicted_total = daily_average * self.params.period_length as f64;

        Some(Forecast {
            sample_size: sample.len(),
            window_size: self.params.window_size,
            period_length: self.params.period_length,
            daily_average,
            predicted_total,
            recommended_budget: predicted_total * (1.0 + self.params.budget_buffer),
            savings_goal: predicted_total * self.params.savings_goal_ratio,
        })
    }
}

/// The last `window_size` rows, or all of them when there are fewer
pub fn recent_window<'s, 'a>(
    expenses: &'s [&'a Transaction],
    window_size: usize,
) -> &'s [&'a Transaction] {
    let start = expenses.len().saturating_sub(window_size);
    &expenses[start..]
}

/// Forecast with the default buffer and savings ratio
pub fn predict_next_period(
    expenses: &[&Transaction],
    window_size: usize,
    period_length: u32,
) -> Option<Forecast> {
    Forecaster::with_params(ForecastParams {
        window_size,
        period_length,
        ..ForecastParams::default()
    })
    .predict(expenses)
}
