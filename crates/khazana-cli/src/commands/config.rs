//! Config inspection command

use std::path::Path;

use anyhow::Result;
use khazana_core::config;

use super::core::{load_config, print_header, print_json, Output};

pub fn cmd_config(config_path: Option<&Path>, output: Output) -> Result<()> {
    let config = load_config(config_path)?;

    if output.json {
        return print_json(&config);
    }

    print_header("⚙️  Analyzer Config");
    match config::resolve_path(config_path) {
        Some(path) => println!("   Source: {}", path.display()),
        None => {
            println!("   Source: built-in defaults");
            if let Some(path) = config::default_config_path() {
                println!("   Override: {} (not present)", path.display());
            }
        }
    }

    let f = &config.forecast;
    println!();
    println!("   [forecast]");
    println!("     window_size        = {}", f.window_size);
    println!("     period_length      = {}", f.period_length);
    println!("     budget_buffer      = {}", f.budget_buffer);
    println!("     savings_goal_ratio = {}", f.savings_goal_ratio);

    let i = &config.insights;
    println!("   [insights]");
    println!("     excellent_threshold  = {}", i.excellent_threshold);
    println!("     good_threshold       = {}", i.good_threshold);
    println!("     trend_window         = {}", i.trend_window);
    println!("     trend_increase_ratio = {}", i.trend_increase_ratio);
    println!("     trend_decrease_ratio = {}", i.trend_decrease_ratio);

    println!("   [classification]");
    println!(
        "     expense_types = {}",
        config.classification.expense_types.join(", ")
    );
    println!(
        "     income_types  = {}",
        config.classification.income_types.join(", ")
    );

    println!("   [report]");
    println!("     top_categories = {}", config.report.top_categories);
    println!("     top_expenses   = {}", config.report.top_expenses);

    println!("   [charts]");
    println!("     output_dir = {}", config.chart_dir.display());

    Ok(())
}
