//! Descriptive analysis commands (patterns, stats, months, categories, top)

use anyhow::Result;
use khazana_core::aggregate;
use khazana_core::models::{Transaction, WEEKDAY_LABELS};
use khazana_core::SpendingPatterns;

use super::core::{format_amount, month_name, print_header, print_json, truncate, Output, Session};

pub fn cmd_patterns(session: &Session, output: Output) -> Result<()> {
    let split = session.table.split();
    let patterns = SpendingPatterns::analyze(&split, session.config.report.top_categories);

    if output.json {
        return print_json(&patterns);
    }

    print_header("📅 Spending Pattern Analysis");

    if split.expenses.is_empty() {
        println!("   No expenses found.");
        return Ok(());
    }

    println!("   Average expense by month:");
    for (month, avg) in &patterns.monthly_average {
        println!("     {:12} {:>14}", month_name(*month), format_amount(*avg));
    }

    println!();
    println!("   Average expense by day:");
    for (dow, avg) in &patterns.weekday_average {
        let day = WEEKDAY_LABELS.get(*dow as usize).copied().unwrap_or("?");
        println!("     {:12} {:>14}", day, format_amount(*avg));
    }

    if session.table.has_category() {
        println!();
        println!("   🗂️  Total spending by category:");
        for cat in &patterns.category_totals {
            println!(
                "     {:20} {:>14}",
                truncate(&cat.category, 20),
                format_amount(cat.total)
            );
        }
    }

    println!();
    println!(
        "   Weekend: {}   Weekday: {}",
        format_amount(patterns.weekend_split.weekend_total),
        format_amount(patterns.weekend_split.weekday_total)
    );

    Ok(())
}

pub fn cmd_stats(session: &Session, output: Output) -> Result<()> {
    let split = session.table.split();
    let stats = aggregate::statistics(&split, session.table.unclassified_count());

    if output.json {
        return print_json(&stats);
    }

    let average = |v: Option<f64>| v.map(format_amount).unwrap_or_else(|| "-".to_string());

    print_header("📊 Financial Statistics");
    println!("   Total income:     {:>14}", format_amount(stats.total_income));
    println!("   Total expense:    {:>14}", format_amount(stats.total_expense));
    println!("   Net balance:      {:>14}", format_amount(stats.net_balance));
    println!("   Savings rate:     {:>13.1}%", stats.savings_rate);
    println!();
    println!(
        "   Income rows:  {:>6}   average {}",
        stats.income_count,
        average(stats.average_income)
    );
    println!(
        "   Expense rows: {:>6}   average {}",
        stats.expense_count,
        average(stats.average_expense)
    );
    if stats.unclassified_count > 0 {
        println!(
            "   ⚠️  {} rows with an unknown type were ignored",
            stats.unclassified_count
        );
    }

    Ok(())
}

pub fn cmd_months(session: &Session, output: Output) -> Result<()> {
    let split = session.table.split();
    let months = aggregate::monthly_summary(&split);

    if output.json {
        return print_json(&months);
    }

    print_header("📆 Monthly Summary");

    if months.is_empty() {
        println!("   No transactions found.");
        return Ok(());
    }

    println!(
        "   {:8} │ {:>12} │ {:>12} │ {:>12} │ {:>5}",
        "Month", "Income", "Expense", "Net", "Count"
    );
    println!("   ─────────┼──────────────┼──────────────┼──────────────┼──────");
    for m in &months {
        println!(
            "   {:8} │ {:>12.2} │ {:>12.2} │ {:>12.2} │ {:>5}",
            m.period, m.income, m.expense, m.net, m.transaction_count
        );
    }

    Ok(())
}

pub fn cmd_categories(session: &Session, output: Output) -> Result<()> {
    let split = session.table.split();
    let breakdown = aggregate::category_breakdown(&split.expenses);

    if output.json {
        return print_json(&breakdown);
    }

    print_header("🗂️  Category Breakdown");

    if !session.table.has_category() {
        println!("   This export has no category column.");
        return Ok(());
    }
    if breakdown.is_empty() {
        println!("   No categorized expenses found.");
        return Ok(());
    }

    let total = split.total_expense();
    println!(
        "   {:20} │ {:>12} │ {:>6} │ {:>5} │ {:>10}",
        "Category", "Total", "%", "Count", "Average"
    );
    println!("   ─────────────────────┼──────────────┼────────┼───────┼───────────");
    for cat in &breakdown {
        let share = if total > 0.0 {
            cat.total / total * 100.0
        } else {
            0.0
        };
        println!(
            "   {:20} │ {:>12.2} │ {:>5.1}% │ {:>5} │ {:>10.2}",
            truncate(&cat.category, 20),
            cat.total,
            share,
            cat.transaction_count,
            cat.average
        );
    }

    Ok(())
}

pub fn cmd_top(session: &Session, limit: Option<usize>, output: Output) -> Result<()> {
    let limit = limit.unwrap_or(session.config.report.top_expenses);
    let split = session.table.split();
    let top = aggregate::top_expenses(&split.expenses, limit);

    if output.json {
        return print_json(&top);
    }

    print_header(&format!("💸 Top {} Expenses", limit));

    if top.is_empty() {
        println!("   No expenses found.");
        return Ok(());
    }

    for (i, tx) in top.iter().enumerate() {
        println!(
            "   {:>2}. {}  {:>14}  {}",
            i + 1,
            tx.date,
            format_amount(tx.amount),
            truncate(expense_label(tx), 40)
        );
    }

    Ok(())
}

/// Details text, else category, else the raw type
pub fn expense_label(tx: &Transaction) -> &str {
    tx.details
        .as_deref()
        .or(tx.category.as_deref())
        .unwrap_or(tx.kind.as_str())
}
