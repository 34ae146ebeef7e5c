//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Khazana - Analyze, forecast and explain your spending
#[derive(Parser)]
#[command(name = "khazana")]
#[command(about = "Expense analyzer for Khazana transaction exports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Transaction CSV exported from Khazana
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Analyzer config file (TOML)
    ///
    /// Defaults to ~/.local/share/khazana/config/analyzer.toml when present,
    /// otherwise built-in defaults.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print structured JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Average expense by month and weekday, top categories
    Patterns,

    /// Predict next period's expense
    Predict {
        /// Trailing expense rows to average (overrides config)
        #[arg(short, long)]
        window: Option<usize>,

        /// Days in the predicted period (overrides config)
        #[arg(short, long)]
        period: Option<u32>,
    },

    /// Savings rate, weekend spending, top category and trend insights
    Insights,

    /// Income/expense totals, counts and averages
    Stats,

    /// Income, expense and net per month
    Months,

    /// Totals, counts and averages per category
    Categories,

    /// Largest expenses
    Top {
        /// Number of expenses to show (overrides config)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Render SVG charts
    Visualize {
        /// Output directory (overrides config)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Patterns, prediction, insights and charts
    Full,

    /// Full analysis report as JSON
    Report {
        /// Write to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the enriched transaction table as CSV
    Export {
        /// Write to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interactive menu
    Menu,

    /// Show the resolved analyzer config
    Config,
}
