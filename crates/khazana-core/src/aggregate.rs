//! Aggregations over the enriched transaction table
//!
//! All functions are pure reads. Grouped means only contain keys that have
//! at least one row; nothing is zero-filled except the weekday chart series.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::models::{
    CategoryBreakdown, CategoryTotal, ChartSeries, DailyAmount, FinancialStatistics, MonthSummary,
    Transaction, TrendDataPoint, WeekdayTotal, WeekendSplit, WEEKDAY_LABELS,
};
use crate::table::Split;

/// Running sum and count for one group
#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn add(&mut self, amount: f64) {
        self.sum += amount;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

fn mean_by<F>(rows: &[&Transaction], key: F) -> BTreeMap<u32, f64>
where
    F: Fn(&Transaction) -> u32,
{
    let mut groups: BTreeMap<u32, Accumulator> = BTreeMap::new();
    for tx in rows {
        groups.entry(key(*tx)).or_default().add(tx.amount);
    }
    groups.into_iter().map(|(k, acc)| (k, acc.mean())).collect()
}

/// Mean expense per calendar month (1-12), years combined
pub fn average_by_month(expenses: &[&Transaction]) -> BTreeMap<u32, f64> {
    mean_by(expenses, |t| t.month)
}

/// Mean expense per weekday (0 = Monday)
pub fn average_by_weekday(expenses: &[&Transaction]) -> BTreeMap<u32, f64> {
    mean_by(expenses, |t| t.day_of_week)
}

/// Group categorized rows, keeping first-encountered order
fn group_by_category(rows: &[&Transaction]) -> Vec<(String, Accumulator)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, Accumulator)> = Vec::new();

    for tx in rows {
        let Some(category) = tx.category.as_deref() else {
            continue;
        };
        let slot = *index.entry(category).or_insert_with(|| {
            groups.push((category.to_string(), Accumulator::default()));
            groups.len() - 1
        });
        groups[slot].1.add(tx.amount);
    }

    // Stable: ties keep first-encountered order
    groups.sort_by(|a, b| {
        b.1.sum
            .partial_cmp(&a.1.sum)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    groups
}

/// Total expense per category, highest first
///
/// Rows without a category are skipped, so a table without a category
/// column yields an empty result.
pub fn total_by_category(expenses: &[&Transaction]) -> Vec<CategoryTotal> {
    group_by_category(expenses)
        .into_iter()
        .map(|(category, acc)| CategoryTotal {
            category,
            total: acc.sum,
        })
        .collect()
}

/// The single highest-spending category, if any
pub fn top_category(expenses: &[&Transaction]) -> Option<CategoryTotal> {
    total_by_category(expenses).into_iter().next()
}

/// Totals, counts and averages per category, highest total first
pub fn category_breakdown(expenses: &[&Transaction]) -> Vec<CategoryBreakdown> {
    group_by_category(expenses)
        .into_iter()
        .map(|(category, acc)| CategoryBreakdown {
            category,
            total: acc.sum,
            transaction_count: acc.count,
            average: acc.mean(),
        })
        .collect()
}

/// `(income - expense) / income * 100`, or 0 when there is no income
pub fn savings_rate(total_income: f64, total_expense: f64) -> f64 {
    if total_income > 0.0 {
        (total_income - total_expense) * 100.0 / total_income
    } else {
        0.0
    }
}

/// Expense totals on weekends vs weekdays
pub fn weekend_split(expenses: &[&Transaction]) -> WeekendSplit {
    let mut split = WeekendSplit {
        weekend_total: 0.0,
        weekday_total: 0.0,
    };
    for tx in expenses {
        if tx.is_weekend {
            split.weekend_total += tx.amount;
        } else {
            split.weekday_total += tx.amount;
        }
    }
    split
}

/// Overall statistics for the classified rows
pub fn statistics(split: &Split<'_>, unclassified_count: usize) -> FinancialStatistics {
    let total_income = split.total_income();
    let total_expense = split.total_expense();
    let income_count = split.income.len();
    let expense_count = split.expenses.len();

    FinancialStatistics {
        total_income,
        total_expense,
        net_balance: total_income - total_expense,
        income_count,
        expense_count,
        unclassified_count,
        average_income: (income_count > 0).then(|| total_income / income_count as f64),
        average_expense: (expense_count > 0).then(|| total_expense / expense_count as f64),
        savings_rate: savings_rate(total_income, total_expense),
    }
}

fn month_entry<'m>(
    months: &'m mut BTreeMap<(i32, u32), MonthSummary>,
    tx: &Transaction,
) -> &'m mut MonthSummary {
    months
        .entry((tx.year, tx.month))
        .or_insert_with(|| MonthSummary {
            period: tx.period_key(),
            year: tx.year,
            month: tx.month,
            income: 0.0,
            expense: 0.0,
            net: 0.0,
            transaction_count: 0,
        })
}

/// Income, expense and net per year-month, oldest first
pub fn monthly_summary(split: &Split<'_>) -> Vec<MonthSummary> {
    let mut months: BTreeMap<(i32, u32), MonthSummary> = BTreeMap::new();

    for tx in &split.income {
        let m = month_entry(&mut months, tx);
        m.income += tx.amount;
        m.transaction_count += 1;
    }
    for tx in &split.expenses {
        let m = month_entry(&mut months, tx);
        m.expense += tx.amount;
        m.transaction_count += 1;
    }

    months
        .into_values()
        .map(|mut m| {
            m.net = m.income - m.expense;
            m
        })
        .collect()
}

/// The `limit` largest expenses; equal amounts keep table order
pub fn top_expenses<'a>(expenses: &[&'a Transaction], limit: usize) -> Vec<&'a Transaction> {
    let mut sorted = expenses.to_vec();
    sorted.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.truncate(limit);
    sorted
}

/// Sum per year-month, oldest first
pub fn monthly_totals(rows: &[&Transaction]) -> Vec<TrendDataPoint> {
    let mut months: BTreeMap<(i32, u32), Accumulator> = BTreeMap::new();
    for tx in rows {
        months.entry((tx.year, tx.month)).or_default().add(tx.amount);
    }
    months
        .into_iter()
        .map(|((year, month), acc)| TrendDataPoint {
            period: format!("{:04}-{:02}", year, month),
            amount: acc.sum,
            transaction_count: acc.count,
        })
        .collect()
}

/// Expense sum per weekday, all seven days present
pub fn weekday_totals(expenses: &[&Transaction]) -> Vec<WeekdayTotal> {
    let mut totals = [0.0_f64; 7];
    for tx in expenses {
        totals[tx.day_of_week as usize] += tx.amount;
    }
    totals
        .iter()
        .enumerate()
        .map(|(i, amount)| WeekdayTotal {
            day_of_week: i as u32,
            label: WEEKDAY_LABELS[i].to_string(),
            amount: *amount,
        })
        .collect()
}

/// Expense sum per calendar date, oldest first
pub fn daily_totals(expenses: &[&Transaction]) -> Vec<DailyAmount> {
    let mut days: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for tx in expenses {
        *days.entry(tx.date).or_insert(0.0) += tx.amount;
    }
    days.into_iter()
        .map(|(date, amount)| DailyAmount { date, amount })
        .collect()
}

/// All series consumed by the chart renderer
pub fn chart_series(split: &Split<'_>) -> ChartSeries {
    ChartSeries {
        monthly_expense: monthly_totals(&split.expenses),
        monthly_income: monthly_totals(&split.income),
        categories: if split.has_category {
            total_by_category(&split.expenses)
        } else {
            Vec::new()
        },
        weekday_totals: weekday_totals(&split.expenses),
        daily_expense: daily_totals(&split.expenses),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TableBuilder;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_average_by_month_groups_across_years() {
        let table = TableBuilder::new()
            .expense("2023-01-10", 100.0)
            .expense("2024-01-05", 300.0)
            .expense("2024-03-01", 50.0)
            .income("2024-02-01", 1000.0)
            .build();
        let split = table.split();

        let avg = average_by_month(&split.expenses);
        assert_eq!(avg.len(), 2);
        assert!(approx(avg[&1], 200.0));
        assert!(approx(avg[&3], 50.0));
        // February only has income, so it is absent
        assert!(!avg.contains_key(&2));
    }

    #[test]
    fn test_average_by_month_keys_in_range() {
        let mut builder = TableBuilder::new();
        for m in 1..=12 {
            builder = builder.expense(&format!("2024-{:02}-15", m), m as f64 * 10.0);
        }
        let table = builder.build();
        let avg = average_by_month(&table.expenses());
        assert!(avg.keys().all(|m| (1..=12).contains(m)));
        assert_eq!(avg.len(), 12);
        assert!(approx(avg[&7], 70.0));
    }

    #[test]
    fn test_average_by_weekday() {
        // 2024-01-15 Mon, 2024-01-22 Mon, 2024-01-20 Sat
        let table = TableBuilder::new()
            .expense("2024-01-15", 10.0)
            .expense("2024-01-22", 30.0)
            .expense("2024-01-20", 99.0)
            .build();
        let avg = average_by_weekday(&table.expenses());
        assert_eq!(avg.len(), 2);
        assert!(approx(avg[&0], 20.0));
        assert!(approx(avg[&5], 99.0));
    }

    #[test]
    fn test_total_by_category_sorted_and_stable() {
        let table = TableBuilder::new()
            .with_category()
            .expense_in("2024-01-01", 50.0, "Travel")
            .expense_in("2024-01-02", 100.0, "Food")
            .expense_in("2024-01-03", 50.0, "Books")
            .expense_in("2024-01-04", 25.0, "Travel")
            .expense_in("2024-01-05", 75.0, "Books")
            .build();

        let totals = total_by_category(&table.expenses());
        let names: Vec<&str> = totals.iter().map(|c| c.category.as_str()).collect();
        // Books 125, Food 100, Travel 75
        assert_eq!(names, vec!["Books", "Food", "Travel"]);
        assert!(approx(totals[0].total, 125.0));
    }

    #[test]
    fn test_total_by_category_ties_keep_first_seen() {
        let table = TableBuilder::new()
            .with_category()
            .expense_in("2024-01-01", 40.0, "Zeta")
            .expense_in("2024-01-02", 40.0, "Alpha")
            .expense_in("2024-01-03", 40.0, "Mid")
            .build();

        let names: Vec<String> = total_by_category(&table.expenses())
            .into_iter()
            .map(|c| c.category)
            .collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_category_totals_partition_total_expense() {
        let table = TableBuilder::new()
            .with_category()
            .expense_in("2024-01-01", 12.5, "A")
            .expense_in("2024-01-02", 7.5, "B")
            .expense_in("2024-01-03", 30.0, "A")
            .expense_in("2024-01-04", 0.25, "C")
            .income_in("2024-01-05", 500.0, "Salary")
            .build();
        let split = table.split();

        let sum: f64 = total_by_category(&split.expenses)
            .iter()
            .map(|c| c.total)
            .sum();
        assert!(approx(sum, split.total_expense()));
    }

    #[test]
    fn test_total_by_category_without_column() {
        let table = TableBuilder::new().expense("2024-01-01", 10.0).build();
        assert!(total_by_category(&table.expenses()).is_empty());
        assert!(top_category(&table.expenses()).is_none());
    }

    #[test]
    fn test_blank_category_cells_do_not_contribute() {
        let table = TableBuilder::new()
            .with_category()
            .expense_in("2024-01-01", 40.0, "Food")
            .expense("2024-01-02", 500.0)
            .expense_in("2024-01-03", 20.0, "Food")
            .expense("2024-01-04", 300.0)
            .build();

        let totals = total_by_category(&table.expenses());
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].category, "Food");
        assert!(approx(totals[0].total, 60.0));

        let breakdown = category_breakdown(&table.expenses());
        assert_eq!(breakdown[0].transaction_count, 2);
        assert!(approx(breakdown[0].average, 30.0));
        assert_eq!(top_category(&table.expenses()).unwrap().category, "Food");
    }

    #[test]
    fn test_top_category() {
        let table = TableBuilder::new()
            .with_category()
            .expense_in("2024-01-01", 10.0, "Food")
            .expense_in("2024-01-02", 90.0, "Rent")
            .build();
        let top = top_category(&table.expenses()).unwrap();
        assert_eq!(top.category, "Rent");
        assert!(approx(top.total, 90.0));

        let empty = TableBuilder::new().with_category().build();
        assert!(top_category(&empty.expenses()).is_none());
    }

    #[test]
    fn test_category_breakdown() {
        let table = TableBuilder::new()
            .with_category()
            .expense_in("2024-01-01", 10.0, "Food")
            .expense_in("2024-01-02", 30.0, "Food")
            .expense_in("2024-01-03", 5.0, "Fun")
            .build();
        let breakdown = category_breakdown(&table.expenses());
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, "Food");
        assert_eq!(breakdown[0].transaction_count, 2);
        assert!(approx(breakdown[0].average, 20.0));
    }

    #[test]
    fn test_savings_rate() {
        assert!(approx(savings_rate(1000.0, 100.0), 90.0));
        assert!(approx(savings_rate(1000.0, 1500.0), -50.0));
        assert_eq!(savings_rate(0.0, 500.0), 0.0);
        assert_eq!(savings_rate(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_weekend_split() {
        let table = TableBuilder::new()
            .expense("2024-01-20", 100.0) // Sat
            .expense("2024-01-21", 50.0) // Sun
            .expense("2024-01-22", 25.0) // Mon
            .build();
        let split = weekend_split(&table.expenses());
        assert!(approx(split.weekend_total, 150.0));
        assert!(approx(split.weekday_total, 25.0));
        assert!(approx(split.total(), 175.0));
    }

    #[test]
    fn test_statistics() {
        let table = TableBuilder::new()
            .expense("2024-01-01", 100.0)
            .expense("2024-01-02", 300.0)
            .income("2024-01-03", 1000.0)
            .row("2024-01-04", 70.0, "refund")
            .build();
        let stats = statistics(&table.split(), table.unclassified_count());

        assert!(approx(stats.total_income, 1000.0));
        assert!(approx(stats.total_expense, 400.0));
        assert!(approx(stats.net_balance, 600.0));
        assert_eq!(stats.income_count, 1);
        assert_eq!(stats.expense_count, 2);
        assert_eq!(stats.unclassified_count, 1);
        assert_eq!(stats.average_expense, Some(200.0));
        assert!(approx(stats.savings_rate, 60.0));
    }

    #[test]
    fn test_statistics_empty() {
        let table = TableBuilder::new().build();
        let stats = statistics(&table.split(), 0);
        assert_eq!(stats.average_income, None);
        assert_eq!(stats.average_expense, None);
        assert_eq!(stats.savings_rate, 0.0);
    }

    #[test]
    fn test_monthly_summary_is_year_scoped() {
        let table = TableBuilder::new()
            .expense("2024-01-10", 100.0)
            .income("2024-01-01", 500.0)
            .expense("2023-01-10", 40.0)
            .expense("2024-02-10", 60.0)
            .build();
        let months = monthly_summary(&table.split());

        let periods: Vec<&str> = months.iter().map(|m| m.period.as_str()).collect();
        assert_eq!(periods, vec!["2023-01", "2024-01", "2024-02"]);
        assert!(approx(months[1].income, 500.0));
        assert!(approx(months[1].expense, 100.0));
        assert!(approx(months[1].net, 400.0));
        assert_eq!(months[1].transaction_count, 2);
        assert!(approx(months[2].net, -60.0));
    }

    #[test]
    fn test_top_expenses() {
        let table = TableBuilder::new()
            .expense("2024-01-01", 5.0)
            .expense("2024-01-02", 50.0)
            .expense("2024-01-03", 20.0)
            .expense("2024-01-04", 50.0)
            .build();
        let expenses = table.expenses();
        let top = top_expenses(&expenses, 3);
        let dates: Vec<String> = top.iter().map(|t| t.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-02", "2024-01-04", "2024-01-03"]);

        assert_eq!(top_expenses(&expenses, 10).len(), 4);
        assert!(top_expenses(&expenses, 0).is_empty());
    }

    #[test]
    fn test_chart_series() {
        let table = TableBuilder::new()
            .with_category()
            .expense_in("2024-01-20", 10.0, "Food")
            .expense_in("2024-01-20", 15.0, "Food")
            .expense_in("2024-02-01", 5.0, "Fun")
            .income_in("2024-01-01", 100.0, "Salary")
            .build();
        let series = chart_series(&table.split());

        assert_eq!(series.monthly_expense.len(), 2);
        assert!(approx(series.monthly_expense[0].amount, 25.0));
        assert_eq!(series.monthly_income.len(), 1);
        assert_eq!(series.categories.len(), 2);
        assert_eq!(series.weekday_totals.len(), 7);
        assert!(approx(series.weekday_totals[5].amount, 25.0));
        assert_eq!(series.weekday_totals[5].label, "Sat");
        assert!(approx(series.weekday_totals[0].amount, 0.0));
        assert_eq!(series.daily_expense.len(), 2);
        assert!(approx(series.daily_expense[0].amount, 25.0));
    }

    #[test]
    fn test_aggregates_are_idempotent() {
        let table = TableBuilder::new()
            .with_category()
            .expense_in("2024-01-01", 1.0, "A")
            .expense_in("2024-01-02", 2.0, "B")
            .build();
        let expenses = table.expenses();
        assert_eq!(average_by_month(&expenses), average_by_month(&expenses));
        assert_eq!(total_by_category(&expenses), total_by_category(&expenses));
        assert_eq!(chart_series(&table.split()), chart_series(&table.split()));
    }
}
