//! Integration tests for khazana-core
//!
//! These tests exercise the full load → aggregate → forecast → insight workflow.

use std::io::Write;

use khazana_core::{
    aggregate,
    export::export_csv_string,
    insights::{InsightData, SavingsBucket, TrendDirection},
    load_csv, parse_csv, AnalysisContext, AnalysisReport, AnalyzerConfig, Classifier, Error,
    InsightEngine, InsightType,
};

/// Two months of a household export, with a category column
///
/// - 2 salaries of 40000 and one refund of 1000 (income 81000)
/// - 13 expense rows, the last 10 noticeably larger than the first 3
/// - one "fee" row that matches neither vocabulary
fn household_csv() -> &'static str {
    r#"Date,Type,Category,Amount,Description
2024-03-01,deposit,Salary,"40,000",March salary
2024-03-02,withdrawal,Food,200,Groceries
2024-03-03,withdrawal,Food,200,Groceries
2024-03-04,withdrawal,Transport,200,Fuel
2024-03-09,withdrawal,Entertainment,1000,Weekend trip
2024-03-10,withdrawal,Entertainment,1000,Weekend trip
2024-03-15,fee,Bank,25,Card fee
2024-03-16,transfer,Family,3000,Sent home
2024-03-17,withdrawal,Food,1000,Dinner out
2024-03-23,withdrawal,Shopping,2000,Clothes
2024-04-01,deposit,Salary,"40,000",April salary
2024-04-06,withdrawal,Rent,12000,April rent
2024-04-07,withdrawal,Food,1000,Party
2024-04-13,withdrawal,Shopping,1500,Gadget
2024-04-14,received,Refund,1000,Returned gadget
2024-04-20,withdrawal,Food,800,Groceries
2024-04-21,withdrawal,Entertainment,900,Concert"#
}

fn load() -> khazana_core::TransactionTable {
    parse_csv(household_csv().as_bytes(), &Classifier::default()).expect("fixture parses")
}

// =============================================================================
// Load + Aggregate
// =============================================================================

#[test]
fn test_load_classifies_rows() {
    let table = load();
    let split = table.split();

    assert_eq!(table.len(), 17);
    assert!(table.has_category());
    assert_eq!(split.expenses.len(), 13);
    assert_eq!(split.income.len(), 3);
    assert_eq!(table.unclassified_count(), 1);
    assert_eq!(split.total_income(), 81000.0);
}

#[test]
fn test_category_totals_cover_all_expenses() {
    let table = load();
    let split = table.split();

    let totals = aggregate::total_by_category(&split.expenses);
    let sum: f64 = totals.iter().map(|c| c.total).sum();
    assert!((sum - split.total_expense()).abs() < 1e-9);
    assert_eq!(totals[0].category, "Rent");

    // Unclassified "Bank" fee never shows up
    assert!(totals.iter().all(|c| c.category != "Bank"));
}

#[test]
fn test_monthly_average_keys_in_range() {
    let table = load();
    let split = table.split();

    let averages = aggregate::average_by_month(&split.expenses);
    assert_eq!(averages.keys().copied().collect::<Vec<_>>(), vec![3, 4]);
    assert!(averages.keys().all(|m| (1..=12).contains(m)));

    let march: Vec<f64> = split
        .expenses
        .iter()
        .filter(|t| t.month == 3)
        .map(|t| t.amount)
        .collect();
    let expected = march.iter().sum::<f64>() / march.len() as f64;
    assert!((averages[&3] - expected).abs() < 1e-9);
}

// =============================================================================
// Insights
// =============================================================================

#[test]
fn test_insights_on_household_export() {
    let table = load();
    let ctx = AnalysisContext::new(&table, AnalyzerConfig::default().insights);
    let findings = InsightEngine::new().analyze_all(&ctx);

    let savings = findings
        .iter()
        .find_map(|f| match &f.data {
            InsightData::SavingsRate(d) => Some(d),
            _ => None,
        })
        .expect("savings finding is always present");
    // 81000 income, 24800 expense
    assert!((savings.total_expense - 24800.0).abs() < 1e-9);
    assert_eq!(savings.bucket, SavingsBucket::Excellent);

    let top = findings
        .iter()
        .find(|f| f.insight_type == InsightType::TopCategory)
        .expect("category column present");
    assert_eq!(top.key, "top_category:Rent");

    let trend = findings
        .iter()
        .find_map(|f| match &f.data {
            InsightData::SpendingTrend(d) => Some(d),
            _ => None,
        })
        .expect("trend detected");
    assert_eq!(trend.direction, TrendDirection::Increasing);
    assert!((trend.previous_average - 200.0).abs() < 1e-9);
}

// =============================================================================
// Report + Export
// =============================================================================

#[test]
fn test_full_report_workflow() {
    let config = AnalyzerConfig::default();
    let table = parse_csv(household_csv().as_bytes(), &config.classifier()).unwrap();
    let report = AnalysisReport::build(&table, &config);

    let forecast = report.forecast.as_ref().expect("expenses present");
    assert_eq!(forecast.sample_size, 13);
    assert!((forecast.predicted_total - 24800.0 / 13.0 * 30.0).abs() < 1e-6);

    assert_eq!(report.statistics.unclassified_count, 1);
    assert_eq!(report.monthly_summary.len(), 2);
    assert_eq!(report.monthly_summary[0].period, "2024-03");
    assert_eq!(report.top_expenses[0].details.as_deref(), Some("April rent"));

    let json = report.to_json().unwrap();
    assert!(json.contains("\"savings_rate\""));
}

#[test]
fn test_export_after_load() {
    let table = load();
    let out = export_csv_string(&table).unwrap();

    assert_eq!(out.lines().count(), 18);
    assert!(out.contains("2024-03-09,withdrawal,Entertainment,1000.0,9,3,2024,5,true"));
}

#[test]
fn test_custom_vocabulary_from_config() {
    let config = AnalyzerConfig::from_toml(
        r#"
[classification]
expense_types = ["withdrawal", "transfer", "fee"]
"#,
    )
    .unwrap();
    let table = parse_csv(household_csv().as_bytes(), &config.classifier()).unwrap();

    assert_eq!(table.unclassified_count(), 0);
    assert_eq!(table.split().expenses.len(), 14);
}

#[test]
fn test_load_from_disk_and_errors() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(household_csv().as_bytes()).unwrap();

    let table = load_csv(file.path(), &Classifier::default()).unwrap();
    assert_eq!(table.len(), 17);

    let mut broken = tempfile::NamedTempFile::new().unwrap();
    writeln!(broken, "date,type,amount").unwrap();
    writeln!(broken, "2024-01-01,withdrawal,lots").unwrap();
    let err = load_csv(broken.path(), &Classifier::default()).unwrap_err();
    assert!(matches!(err, Error::Import(_)));
}
