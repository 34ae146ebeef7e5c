//! Report and export commands

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use khazana_core::export;
use khazana_core::AnalysisReport;
use tracing::info;

use super::core::{print_json, Output, Session};
use super::{cmd_insights, cmd_patterns, cmd_predict, cmd_visualize};
use crate::charts;

/// Patterns, prediction, insights and charts in one go
///
/// With `--json` stdout carries only the report; the chart count goes to the log.
pub fn cmd_full(session: &Session, output: Output) -> Result<()> {
    if output.json {
        let report = AnalysisReport::build(&session.table, &session.config);
        let written = charts::render_charts(&report.charts, &session.config.chart_dir)?;
        info!(
            charts = written.len(),
            dir = %session.config.chart_dir.display(),
            "Rendered charts"
        );
        return print_json(&report);
    }

    cmd_patterns(session, output)?;
    cmd_predict(session, None, None, output)?;
    cmd_insights(session, output)?;
    cmd_visualize(session, None, output)
}

pub fn cmd_report(session: &Session, output_path: Option<&Path>) -> Result<()> {
    let report = AnalysisReport::build(&session.table, &session.config);
    let json = report.to_json()?;

    match output_path {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✅ Report written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

pub fn cmd_export(session: &Session, output_path: Option<&Path>) -> Result<()> {
    match output_path {
        Some(path) => {
            let count = export::export_to_path(&session.table, path)
                .with_context(|| format!("Failed to export to {}", path.display()))?;
            println!("✅ Exported {} transactions to {}", count, path.display());
        }
        None => {
            export::export_csv(&session.table, io::stdout().lock())?;
        }
    }

    Ok(())
}
