//! Khazana CLI - Expense analyzer
//!
//! Usage:
//!   khazana --file tx.csv patterns     Spending patterns
//!   khazana --file tx.csv predict      Next-period forecast
//!   khazana --file tx.csv insights     Rule-based insights
//!   khazana --file tx.csv full         Everything, charts included
//!   khazana menu                       Interactive menu

mod charts;
mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;
use commands::{Output, Session};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let output = Output { json: cli.json };
    let config_path = cli.config.as_deref();
    let file = cli.file.as_deref();
    let open = || Session::open(file, config_path);

    match cli.command {
        Commands::Patterns => commands::cmd_patterns(&open()?, output),
        Commands::Predict { window, period } => {
            commands::cmd_predict(&open()?, window, period, output)
        }
        Commands::Insights => commands::cmd_insights(&open()?, output),
        Commands::Stats => commands::cmd_stats(&open()?, output),
        Commands::Months => commands::cmd_months(&open()?, output),
        Commands::Categories => commands::cmd_categories(&open()?, output),
        Commands::Top { limit } => commands::cmd_top(&open()?, limit, output),
        Commands::Visualize { out } => {
            commands::cmd_visualize(&open()?, out.as_deref(), output)
        }
        Commands::Full => commands::cmd_full(&open()?, output),
        Commands::Report { output: path } => commands::cmd_report(&open()?, path.as_deref()),
        Commands::Export { output: path } => commands::cmd_export(&open()?, path.as_deref()),
        Commands::Menu => {
            let stdin = std::io::stdin();
            commands::cmd_menu(file, config_path, stdin.lock())
        }
        Commands::Config => commands::cmd_config(config_path, output),
    }
}
