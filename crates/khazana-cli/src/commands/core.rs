//! Shared command utilities
//!
//! This module contains:
//! - `Session` - the loaded transaction table plus resolved config
//! - `Output` - text vs JSON output mode
//! - Formatting helpers shared by the command modules

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Month;
use khazana_core::{load_csv, AnalyzerConfig, TransactionTable};
use serde::Serialize;

/// How command results are printed
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    pub json: bool,
}

/// A loaded transaction export and the config it was loaded with
pub struct Session {
    pub table: TransactionTable,
    pub config: AnalyzerConfig,
}

impl Session {
    /// Resolve the config and load the transaction file
    pub fn open(file: Option<&Path>, config_path: Option<&Path>) -> Result<Self> {
        let file = file.context("No transaction file given. Use --file <CSV>")?;
        let config = load_config(config_path)?;
        let table = load_csv(file, &config.classifier())
            .with_context(|| format!("Failed to load {}", file.display()))?;

        Ok(Self { table, config })
    }

    pub fn new(table: TransactionTable, config: AnalyzerConfig) -> Self {
        Self { table, config }
    }
}

pub fn load_config(config_path: Option<&Path>) -> Result<AnalyzerConfig> {
    AnalyzerConfig::load(config_path).context("Failed to load analyzer config")
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Section header in the style used by every command
pub fn print_header(title: &str) {
    println!();
    println!("{}", title);
    println!("   ─────────────────────────────────────────────");
}

pub fn format_amount(amount: f64) -> String {
    format!("₹{:.2}", amount)
}

/// English month name for 1..=12
pub fn month_name(month: u32) -> String {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name().to_string())
        .unwrap_or_else(|| format!("Month {}", month))
}

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
