//! SVG chart rendering
//!
//! Draws the four analysis charts from a [`ChartSeries`]:
//! monthly income vs expense, category distribution, spending by weekday
//! and daily spending. Each chart is its own file in the output directory.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use khazana_core::models::{CategoryTotal, ChartSeries, DailyAmount, TrendDataPoint, WeekdayTotal};
use svg::node::element::path::Data;
use svg::node::element::{Circle, Line, Path as SvgPath, Rectangle, Text};
use svg::Document;
use tracing::debug;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 400.0;
const MARGIN: f64 = 60.0;
const STROKE_WIDTH: f64 = 2.0;

const EXPENSE_COLOR: &str = "#d62728";
const INCOME_COLOR: &str = "#2ca02c";
const BAR_COLOR: &str = "steelblue";
const AREA_COLOR: &str = "coral";
const CATEGORY_COLORS: [&str; 8] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
];

pub const MONTHLY_TREND_FILE: &str = "monthly_trend.svg";
pub const CATEGORY_FILE: &str = "category_distribution.svg";
pub const WEEKDAY_FILE: &str = "weekday_spending.svg";
pub const DAILY_FILE: &str = "daily_spending.svg";

/// Plot area mapping data coordinates to SVG coordinates
struct Frame {
    max: f64,
}

impl Frame {
    fn new(max: f64) -> Self {
        Self {
            max: if max > 0.0 { max } else { 1.0 },
        }
    }

    fn plot_width(&self) -> f64 {
        WIDTH - 2.0 * MARGIN
    }

    fn plot_height(&self) -> f64 {
        HEIGHT - 2.0 * MARGIN
    }

    /// Centre of slot `i` out of `n`
    fn x(&self, i: usize, n: usize) -> f64 {
        let slot = self.plot_width() / n.max(1) as f64;
        MARGIN + slot * (i as f64 + 0.5)
    }

    fn y(&self, value: f64) -> f64 {
        let clamped = value.max(0.0);
        HEIGHT - MARGIN - clamped / self.max * self.plot_height()
    }

    fn baseline(&self) -> f64 {
        HEIGHT - MARGIN
    }
}

/// Render every chart that has data and return the written paths
pub fn render_charts(series: &ChartSeries, out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create chart directory {}", out_dir.display()))?;

    let charts = [
        (
            MONTHLY_TREND_FILE,
            monthly_trend_chart(&series.monthly_expense, &series.monthly_income),
        ),
        (CATEGORY_FILE, category_chart(&series.categories)),
        (WEEKDAY_FILE, weekday_chart(&series.weekday_totals)),
        (DAILY_FILE, daily_chart(&series.daily_expense)),
    ];

    let mut written = Vec::new();
    for (name, document) in charts {
        let Some(document) = document else {
            debug!(chart = name, "Skipping chart without data");
            continue;
        };
        let path = out_dir.join(name);
        svg::save(&path, &document)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}

/// Monthly income vs expense lines, `None` when both series are empty
pub fn monthly_trend_chart(
    expense: &[TrendDataPoint],
    income: &[TrendDataPoint],
) -> Option<Document> {
    let periods: Vec<&str> = expense
        .iter()
        .chain(income)
        .map(|p| p.period.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if periods.is_empty() {
        return None;
    }

    let max = expense
        .iter()
        .chain(income)
        .map(|p| p.amount)
        .fold(0.0, f64::max);
    let frame = Frame::new(max);
    let n = periods.len();

    let mut document = canvas("Monthly Income vs Expense Trend", &frame);

    for (series, color) in [(expense, EXPENSE_COLOR), (income, INCOME_COLOR)] {
        let points: Vec<(f64, f64)> = series
            .iter()
            .filter_map(|p| {
                let i = periods.iter().position(|q| *q == p.period)?;
                Some((frame.x(i, n), frame.y(p.amount)))
            })
            .collect();
        document = add_polyline(document, &points, color);
    }

    for (i, period) in periods.iter().enumerate() {
        document = document.add(label(frame.x(i, n), HEIGHT - MARGIN / 2.0, period));
    }

    document = add_legend_entry(document, 0, "Expense", EXPENSE_COLOR);
    document = add_legend_entry(document, 1, "Income", INCOME_COLOR);

    Some(document)
}

/// Horizontal bars with each category's share, `None` without categories
pub fn category_chart(categories: &[CategoryTotal]) -> Option<Document> {
    if categories.is_empty() {
        return None;
    }

    let total: f64 = categories.iter().map(|c| c.total).sum();
    let max = categories.iter().map(|c| c.total).fold(0.0, f64::max);
    let frame = Frame::new(max);
    let row_height = frame.plot_height() / categories.len() as f64;
    let label_width = 120.0;
    let bar_space = frame.plot_width() - label_width;

    let mut document = canvas("Expense Distribution by Category", &frame);

    for (i, cat) in categories.iter().enumerate() {
        let y = MARGIN + row_height * i as f64;
        let width = cat.total.max(0.0) / frame.max * bar_space;
        let share = if total > 0.0 {
            cat.total / total * 100.0
        } else {
            0.0
        };

        document = document
            .add(
                Text::new()
                    .set("x", MARGIN + label_width - 8.0)
                    .set("y", y + row_height / 2.0)
                    .set("text-anchor", "end")
                    .set("dominant-baseline", "middle")
                    .set("font-size", 12)
                    .add(svg::node::Text::new(cat.category.clone())),
            )
            .add(
                Rectangle::new()
                    .set("x", MARGIN + label_width)
                    .set("y", y + row_height * 0.15)
                    .set("width", width)
                    .set("height", row_height * 0.7)
                    .set("fill", CATEGORY_COLORS[i % CATEGORY_COLORS.len()]),
            )
            .add(
                Text::new()
                    .set("x", MARGIN + label_width + width + 6.0)
                    .set("y", y + row_height / 2.0)
                    .set("dominant-baseline", "middle")
                    .set("font-size", 12)
                    .add(svg::node::Text::new(format!("{:.1}%", share))),
            );
    }

    Some(document)
}

/// Seven bars, Monday first, `None` when every day totals zero
pub fn weekday_chart(days: &[WeekdayTotal]) -> Option<Document> {
    if days.iter().all(|d| d.amount <= 0.0) {
        return None;
    }

    let max = days.iter().map(|d| d.amount).fold(0.0, f64::max);
    let frame = Frame::new(max);
    let n = days.len();
    let slot = frame.plot_width() / n.max(1) as f64;

    let mut document = canvas("Spending by Day of Week", &frame);

    for (i, day) in days.iter().enumerate() {
        let x = frame.x(i, n);
        let top = frame.y(day.amount);
        document = document
            .add(
                Rectangle::new()
                    .set("x", x - slot * 0.35)
                    .set("y", top)
                    .set("width", slot * 0.7)
                    .set("height", frame.baseline() - top)
                    .set("fill", BAR_COLOR),
            )
            .add(label(x, HEIGHT - MARGIN / 2.0, &day.label));
    }

    Some(document)
}

/// Filled area of expense per date, `None` without expenses
pub fn daily_chart(daily: &[DailyAmount]) -> Option<Document> {
    let (first, last) = (daily.first()?, daily.last()?);

    let max = daily.iter().map(|d| d.amount).fold(0.0, f64::max);
    let frame = Frame::new(max);
    let n = daily.len();

    let mut data = Data::new().move_to((frame.x(0, n), frame.baseline()));
    for (i, day) in daily.iter().enumerate() {
        data = data.line_to((frame.x(i, n), frame.y(day.amount)));
    }
    data = data.line_to((frame.x(n - 1, n), frame.baseline())).close();

    let area = SvgPath::new()
        .set("fill", AREA_COLOR)
        .set("fill-opacity", 0.6)
        .set("stroke", AREA_COLOR)
        .set("stroke-width", STROKE_WIDTH)
        .set("d", data);

    let document = canvas("Daily Spending Trend", &frame)
        .add(area)
        .add(label(
            frame.x(0, n),
            HEIGHT - MARGIN / 2.0,
            &first.date.format("%Y-%m-%d").to_string(),
        ))
        .add(label(
            frame.x(n - 1, n),
            HEIGHT - MARGIN / 2.0,
            &last.date.format("%Y-%m-%d").to_string(),
        ));

    Some(document)
}

/// Empty chart with title, axes and the max value on the y axis
fn canvas(title: &str, frame: &Frame) -> Document {
    let yaxis = Line::new()
        .set("x1", MARGIN)
        .set("x2", MARGIN)
        .set("y1", MARGIN)
        .set("y2", frame.baseline())
        .set("stroke", "black")
        .set("stroke-width", STROKE_WIDTH);
    let xaxis = Line::new()
        .set("x1", MARGIN)
        .set("x2", WIDTH - MARGIN)
        .set("y1", frame.baseline())
        .set("y2", frame.baseline())
        .set("stroke", "black")
        .set("stroke-width", STROKE_WIDTH);

    Document::new()
        .set("viewBox", (0.0, 0.0, WIDTH, HEIGHT))
        .add(
            Rectangle::new()
                .set("width", WIDTH)
                .set("height", HEIGHT)
                .set("fill", "white"),
        )
        .add(
            Text::new()
                .set("x", WIDTH / 2.0)
                .set("y", MARGIN / 2.0)
                .set("text-anchor", "middle")
                .set("font-size", 18)
                .set("font-weight", "bold")
                .add(svg::node::Text::new(title)),
        )
        .add(
            Text::new()
                .set("x", MARGIN - 6.0)
                .set("y", MARGIN)
                .set("text-anchor", "end")
                .set("font-size", 11)
                .add(svg::node::Text::new(format!("₹{:.0}", frame.max))),
        )
        .add(yaxis)
        .add(xaxis)
}

fn add_polyline(mut document: Document, points: &[(f64, f64)], color: &str) -> Document {
    let Some((&start, rest)) = points.split_first() else {
        return document;
    };

    let data = rest
        .iter()
        .fold(Data::new().move_to(start), |data, &p| data.line_to(p));
    document = document.add(
        SvgPath::new()
            .set("fill", "none")
            .set("stroke", color)
            .set("stroke-width", STROKE_WIDTH)
            .set("d", data),
    );

    for &(x, y) in points {
        document = document.add(
            Circle::new()
                .set("cx", x)
                .set("cy", y)
                .set("r", 4)
                .set("fill", color),
        );
    }
    document
}

fn add_legend_entry(document: Document, index: usize, name: &str, color: &str) -> Document {
    let x = WIDTH - MARGIN - 90.0;
    let y = MARGIN + 18.0 * index as f64;
    document
        .add(
            Rectangle::new()
                .set("x", x)
                .set("y", y)
                .set("width", 12)
                .set("height", 12)
                .set("fill", color),
        )
        .add(
            Text::new()
                .set("x", x + 18.0)
                .set("y", y + 10.0)
                .set("font-size", 12)
                .add(svg::node::Text::new(name)),
        )
}

fn label(x: f64, y: f64, text: &str) -> Text {
    Text::new()
        .set("x", x)
        .set("y", y)
        .set("text-anchor", "middle")
        .set("font-size", 11)
        .add(svg::node::Text::new(text))
}
