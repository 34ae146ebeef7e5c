//! Chart rendering command

use std::path::Path;

use anyhow::Result;
use khazana_core::aggregate;

use super::core::{print_header, print_json, Output, Session};
use crate::charts;

pub fn cmd_visualize(session: &Session, out_dir: Option<&Path>, output: Output) -> Result<()> {
    let out_dir = out_dir.unwrap_or(session.config.chart_dir.as_path());
    let series = aggregate::chart_series(&session.table.split());
    let written = charts::render_charts(&series, out_dir)?;

    if output.json {
        return print_json(&written);
    }

    print_header("📈 Charts");
    if written.is_empty() {
        println!("   Nothing to plot.");
    }
    for path in &written {
        println!("   ✅ {}", path.display());
    }
    if !session.table.has_category() {
        println!("   (no category column, category chart skipped)");
    }

    Ok(())
}
