//! Chart projections over an analytics snapshot
//!
//! Pure reshaping from the server's precomputed aggregates into the three
//! chart panels (category pie, vendor bars, time-series line with moving
//! average) plus the vendor table. Each panel is `Option`-gated on its data
//! being non-empty so partial payloads drop panels instead of rendering
//! degenerate charts; an all-empty snapshot yields no panels at all.

use crate::models::{AnalyticsSnapshot, Category};

/// How many vendors the bar chart and table show
pub const TOP_VENDOR_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

/// Category spending distribution
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPie {
    pub slices: Vec<PieSlice>,
}

/// Top vendors ranked by total spend
#[derive(Debug, Clone, PartialEq)]
pub struct VendorBars {
    pub bars: Vec<(String, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimePoint {
    pub date: String,
    pub amount: f64,
    pub moving_avg: f64,
}

/// Daily spend with moving average, date ascending
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesChart {
    pub points: Vec<TimePoint>,
}

/// One row of the vendor analysis table
#[derive(Debug, Clone, PartialEq)]
pub struct VendorRow {
    pub vendor: String,
    pub visits: u32,
    pub total_spend: f64,
    pub avg_per_visit: f64,
}

/// Build the category pie, using the shared category labels where the
/// server's key is a known category
pub fn category_pie(snapshot: &AnalyticsSnapshot) -> Option<CategoryPie> {
    if snapshot.is_empty() || snapshot.category_distribution.is_empty() {
        return None;
    }

    let slices = snapshot
        .category_distribution
        .iter()
        .map(|(key, totals)| PieSlice {
            label: key
                .parse::<Category>()
                .map(|c| c.label().to_string())
                .unwrap_or_else(|_| key.clone()),
            value: totals.total,
        })
        .collect();

    Some(CategoryPie { slices })
}

/// Build the top-vendor bar chart (at most [`TOP_VENDOR_LIMIT`] bars)
pub fn vendor_bars(snapshot: &AnalyticsSnapshot) -> Option<VendorBars> {
    if snapshot.is_empty() || snapshot.top_vendors.is_empty() {
        return None;
    }

    let bars = snapshot
        .top_vendors
        .iter()
        .take(TOP_VENDOR_LIMIT)
        .map(|v| (v.vendor.clone(), v.total_spend))
        .collect();

    Some(VendorBars { bars })
}

/// Zip the parallel time-series sequences into aligned points
///
/// The three sequences share one date-ascending order; if their lengths
/// disagree the extra tail is dropped rather than misaligned.
pub fn time_series_chart(snapshot: &AnalyticsSnapshot) -> Option<TimeSeriesChart> {
    if snapshot.is_empty() {
        return None;
    }

    let series = &snapshot.time_series;
    let len = series
        .dates
        .len()
        .min(series.amounts.len())
        .min(series.moving_avg.len());
    if len == 0 {
        return None;
    }

    let points = (0..len)
        .map(|i| TimePoint {
            date: series.dates[i].clone(),
            amount: series.amounts[i],
            moving_avg: series.moving_avg[i],
        })
        .collect();

    Some(TimeSeriesChart { points })
}

/// Build the vendor analysis table: visits from the frequency mapping
/// (defaulting to a single visit when absent) and average spend per visit
pub fn vendor_table(snapshot: &AnalyticsSnapshot) -> Vec<VendorRow> {
    if snapshot.is_empty() {
        return Vec::new();
    }

    snapshot
        .top_vendors
        .iter()
        .take(TOP_VENDOR_LIMIT)
        .map(|v| {
            let visits = snapshot.vendor_frequency.get(&v.vendor).copied().unwrap_or(1);
            VendorRow {
                vendor: v.vendor.clone(),
                visits,
                total_spend: v.total_spend,
                avg_per_visit: v.total_spend / f64::from(visits.max(1)),
            }
        })
        .collect()
}
