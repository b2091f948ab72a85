//! Analytics command implementation

use anyhow::Result;

use spendlens_core::charts::{self, TimeSeriesChart, VendorRow};
use spendlens_core::format::{format_compact_currency, format_currency};
use spendlens_core::{CategoryPie, FilterState, ReceiptClient, VendorBars};

use super::truncate;

/// Widest a spend bar gets, in block characters
const BAR_WIDTH: usize = 30;

/// Show the analytics charts for the given filters
///
/// A failed read logs the error and renders the empty state; analytics is
/// a read-only view and has nothing to roll back.
pub async fn cmd_analytics(client: &ReceiptClient, filters: &FilterState) -> Result<()> {
    let snapshot = match client.analytics(filters).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!("Failed to load analytics: {}", e);
            println!("No analytics available.");
            return Ok(());
        }
    };

    if snapshot.is_empty() {
        println!("No receipts match the current filters.");
        return Ok(());
    }

    let stats = &snapshot.statistics;
    println!();
    println!("📊 Spending Analytics");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Receipts: {}    Total: {}    Average: {}",
        stats.count,
        format_compact_currency(stats.total_spend),
        format_currency(stats.mean_spend)
    );
    println!(
        "   Median: {}    Range: {} – {}    Std Dev: {}",
        format_currency(stats.median_spend),
        format_currency(stats.min_spend),
        format_currency(stats.max_spend),
        format_currency(stats.std_deviation)
    );

    if let Some(pie) = charts::category_pie(&snapshot) {
        render_category_pie(&pie, stats.total_spend);
    }
    if let Some(bars) = charts::vendor_bars(&snapshot) {
        render_vendor_bars(&bars);
    }
    if let Some(series) = charts::time_series_chart(&snapshot) {
        render_time_series(&series);
    }

    let rows = charts::vendor_table(&snapshot);
    if !rows.is_empty() {
        render_vendor_table(&rows);
    }

    Ok(())
}

fn bar(value: f64, max: f64) -> String {
    let width = if max > 0.0 {
        ((value / max) * BAR_WIDTH as f64).round() as usize
    } else {
        0
    };
    "█".repeat(width.clamp(1, BAR_WIDTH))
}

fn render_category_pie(pie: &CategoryPie, total: f64) {
    println!();
    println!("🥧 Spending by Category");
    println!("   ─────────────────────────────────────────────────────────────");

    let max = pie.slices.iter().map(|s| s.value).fold(0.0, f64::max);
    for slice in &pie.slices {
        let pct = if total > 0.0 {
            slice.value / total * 100.0
        } else {
            0.0
        };
        println!(
            "   {:15} {:30} {:>12} {:>5.1}%",
            truncate(&slice.label, 15),
            bar(slice.value, max),
            format_currency(slice.value),
            pct
        );
    }
}

fn render_vendor_bars(bars: &VendorBars) {
    println!();
    println!("🏪 Top Vendors by Spend");
    println!("   ─────────────────────────────────────────────────────────────");

    let max = bars.bars.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    for (vendor, spend) in &bars.bars {
        println!(
            "   {:20} {:30} {:>12}",
            truncate(vendor, 20),
            bar(*spend, max),
            format_currency(*spend)
        );
    }
}

fn render_time_series(series: &TimeSeriesChart) {
    println!();
    println!("📈 Spending Over Time");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:12} │ {:>12} │ {:>12}",
        "Date", "Spend", "Moving Avg"
    );
    println!("   ─────────────┼──────────────┼──────────────");

    for point in &series.points {
        println!(
            "   {:12} │ {:>12} │ {:>12}",
            point.date,
            format_currency(point.amount),
            format_currency(point.moving_avg)
        );
    }
}

fn render_vendor_table(rows: &[VendorRow]) {
    println!();
    println!("🔎 Vendor Analysis");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:20} │ {:>6} │ {:>12} │ {:>13}",
        "Vendor", "Visits", "Total", "Avg per Visit"
    );
    println!("   ─────────────────────┼────────┼──────────────┼───────────────");

    for row in rows {
        println!(
            "   {:20} │ {:>6} │ {:>12} │ {:>13}",
            truncate(&row.vendor, 20),
            row.visits,
            format_currency(row.total_spend),
            format_currency(row.avg_per_visit)
        );
    }
}
