//! Interactive menu

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use super::core::{Output, Session};
use super::{cmd_full, cmd_insights, cmd_patterns, cmd_predict, cmd_visualize};

/// Menu entries as (key, label)
pub const MENU_ITEMS: [(&str, &str); 6] = [
    ("1", "Analyze Spending Patterns"),
    ("2", "Predict Next Month Expense"),
    ("3", "Generate Insights"),
    ("4", "Visualize Trends"),
    ("5", "Full Analysis (All Above)"),
    ("6", "Exit"),
];

/// A parsed menu selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Patterns,
    Predict,
    Insights,
    Visualize,
    Full,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Patterns),
            "2" => Some(MenuChoice::Predict),
            "3" => Some(MenuChoice::Insights),
            "4" => Some(MenuChoice::Visualize),
            "5" => Some(MenuChoice::Full),
            "6" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Prompt for a file when none was given, load it and run the menu loop
pub fn cmd_menu<R: BufRead>(
    file: Option<&Path>,
    config_path: Option<&Path>,
    mut input: R,
) -> Result<()> {
    println!("╔════════════════════════════════════════════════════════╗");
    println!("║              KHAZANA EXPENSE ANALYZER                  ║");
    println!("╚════════════════════════════════════════════════════════╝");

    let file = match file {
        Some(path) => path.to_path_buf(),
        None => {
            prompt("\nEnter CSV file path (exported from Khazana): ")?;
            match read_line(&mut input)? {
                Some(line) if !line.is_empty() => PathBuf::from(line),
                _ => anyhow::bail!("No transaction file given"),
            }
        }
    };

    let session = Session::open(Some(&file), config_path)?;
    println!("✅ Loaded {} transactions", session.table.len());

    run_menu(&session, input)
}

/// Menu loop over an already loaded session; returns on Exit or end of input
pub fn run_menu<R: BufRead>(session: &Session, mut input: R) -> Result<()> {
    let output = Output::default();

    loop {
        println!();
        println!("   ─────────────────────────────");
        for (key, label) in MENU_ITEMS {
            println!("   {}. {}", key, label);
        }
        prompt("\nEnter choice: ")?;

        let Some(line) = read_line(&mut input)? else {
            break;
        };

        let result = match MenuChoice::parse(&line) {
            Some(MenuChoice::Patterns) => cmd_patterns(session, output),
            Some(MenuChoice::Predict) => cmd_predict(session, None, None, output),
            Some(MenuChoice::Insights) => cmd_insights(session, output),
            Some(MenuChoice::Visualize) => cmd_visualize(session, None, output),
            Some(MenuChoice::Full) => cmd_full(session, output),
            Some(MenuChoice::Exit) => {
                println!("\n✅ Thank you for using Khazana!");
                return Ok(());
            }
            None => {
                println!("❌ Invalid choice: {:?}", line);
                Ok(())
            }
        };

        // A failed action is reported without leaving the menu
        if let Err(e) = result {
            println!("❌ Error: {:#}", e);
        }

        prompt("\nPress Enter to continue...")?;
        if read_line(&mut input)?.is_none() {
            break;
        }
    }

    debug!("Menu input closed");
    Ok(())
}

fn prompt(text: &str) -> Result<()> {
    print!("{}", text);
    io::stdout().flush()?;
    Ok(())
}

/// Next trimmed line, or `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
