//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analysis` - Descriptive commands (patterns, stats, months, categories, top)
//! - `config` - Show the resolved analyzer config
//! - `core` - Shared utilities (Session, Output, formatting)
//! - `forecast` - Next-period prediction
//! - `insights` - Rule-based insights and their text rendering
//! - `menu` - Interactive menu loop
//! - `report` - Full analysis, JSON report and CSV export
//! - `visualize` - SVG chart rendering

pub mod analysis;
pub mod config;
pub mod core;
pub mod forecast;
pub mod insights;
pub mod menu;
pub mod report;
pub mod visualize;

// Re-export command functions for main.rs
pub use analysis::*;
pub use config::*;
pub use self::core::*;
pub use forecast::*;
pub use insights::*;
pub use menu::*;
pub use report::*;
pub use visualize::*;
