//! Next-period forecast command

use anyhow::Result;
use khazana_core::{ForecastParams, Forecaster};

use super::core::{format_amount, print_header, print_json, Output, Session};

/// Forecast with config params, overridden by `--window` / `--period`
pub fn cmd_predict(
    session: &Session,
    window: Option<usize>,
    period: Option<u32>,
    output: Output,
) -> Result<()> {
    let params = ForecastParams {
        window_size: window.unwrap_or(session.config.forecast.window_size),
        period_length: period.unwrap_or(session.config.forecast.period_length),
        ..session.config.forecast
    };

    let split = session.table.split();
    let forecast = Forecaster::with_params(params).predict(&split.expenses);

    if output.json {
        return print_json(&forecast);
    }

    print_header("🔮 Next Period Prediction");

    let Some(forecast) = forecast else {
        println!("   Not enough data: no expenses to base a forecast on.");
        return Ok(());
    };

    println!(
        "   Predicted total ({} days): {:>14}",
        forecast.period_length,
        format_amount(forecast.predicted_total)
    );
    println!(
        "   Average per transaction:   {:>14}",
        format_amount(forecast.daily_average)
    );
    println!(
        "   🎯 Recommended budget:     {:>14}   ({:.0}% buffer)",
        format_amount(forecast.recommended_budget),
        params.budget_buffer * 100.0
    );
    println!(
        "   💰 Savings goal:           {:>14}",
        format_amount(forecast.savings_goal)
    );
    println!(
        "   Based on the last {} of {} allowed expense rows",
        forecast.sample_size, forecast.window_size
    );

    Ok(())
}
