//! Insight command and finding formatting

use anyhow::Result;
use khazana_core::insights::{InsightData, SavingsBucket, TrendDirection};
use khazana_core::{AnalysisContext, Finding, InsightEngine};

use super::core::{format_amount, print_header, print_json, Output, Session};

pub fn cmd_insights(session: &Session, output: Output) -> Result<()> {
    let ctx = AnalysisContext::new(&session.table, session.config.insights);
    let findings = InsightEngine::new().analyze_all(&ctx);

    if output.json {
        return print_json(&findings);
    }

    print_header("🤖 Insights");
    for finding in &findings {
        for line in describe_finding(finding) {
            println!("   {}", line);
        }
        println!();
    }

    Ok(())
}

/// Human-readable lines for a finding
pub fn describe_finding(finding: &Finding) -> Vec<String> {
    match &finding.data {
        InsightData::SavingsRate(d) => {
            let advice = match d.bucket {
                SavingsBucket::Excellent => "✅ Excellent! You're saving well.",
                SavingsBucket::Good => {
                    "👍 Good! Try to increase to 30% for better financial health."
                }
                SavingsBucket::Low => "⚠️  Low savings. Consider reducing expenses.",
            };
            vec![
                format!("💰 Savings Rate: {:.1}%", d.rate),
                format!("   {}", advice),
            ]
        }
        InsightData::WeekendSpending(d) => vec![
            format!("🎉 Weekend Spending: {:.1}% of total", d.weekend_share),
            "   💡 Tip: Plan weekend activities within budget to save more!".to_string(),
        ],
        InsightData::TopCategory(d) => vec![
            format!("📊 Top Spending Category: {}", d.category),
            format!("   Amount: {} ({:.1}%)", format_amount(d.total), d.share),
        ],
        InsightData::SpendingTrend(d) => {
            let (headline, tip) = match d.direction {
                TrendDirection::Increasing => (
                    "📈 Spending is increasing",
                    "   ⚠️  Recent expenses are well above the previous ones.",
                ),
                TrendDirection::Decreasing => (
                    "📉 Spending is decreasing",
                    "   ✅ Keep it up!",
                ),
            };
            vec![
                headline.to_string(),
                format!(
                    "   Last {} expenses averaged {} vs {} before",
                    d.window,
                    format_amount(d.recent_average),
                    format_amount(d.previous_average)
                ),
                tip.to_string(),
            ]
        }
    }
}
