//! Dashboard command implementation

use anyhow::Result;

use spendlens_core::format::{format_compact_currency, format_currency, format_date};
use spendlens_core::{AnalyticsSnapshot, FilterState, Receipt, ReceiptClient, SortBy};

use super::truncate;

/// How many receipts the recent panel shows
const RECENT_LIMIT: u32 = 5;

/// Show the spending overview cards and the most recent receipts
///
/// The two reads run concurrently and fail independently: a broken
/// analytics endpoint still leaves the recent panel usable, and vice
/// versa. Failed reads render as their empty state.
pub async fn cmd_dashboard(client: &ReceiptClient) -> Result<()> {
    let analytics_filters = FilterState::new();
    let recent_filters = FilterState::new()
        .sort_by(Some(SortBy::parse("-created_at")))
        .limit(Some(RECENT_LIMIT));

    let (analytics, recent) = tokio::join!(
        client.analytics(&analytics_filters),
        client.list_receipts(&recent_filters),
    );

    let snapshot = analytics.unwrap_or_else(|e| {
        tracing::error!("Failed to load analytics: {}", e);
        AnalyticsSnapshot::default()
    });
    let recent = recent.unwrap_or_else(|e| {
        tracing::error!("Failed to load recent receipts: {}", e);
        Vec::new()
    });

    println!();
    println!("💸 Spending Overview");
    println!("   ─────────────────────────────────────────────────────────────");

    let stats = &snapshot.statistics;
    println!(
        "   Total Spend:    {:>14}",
        format_compact_currency(stats.total_spend)
    );
    println!("   Total Receipts: {:>14}", stats.count);
    println!(
        "   Average Spend:  {:>14}",
        format_currency(stats.mean_spend)
    );
    println!(
        "   Highest Spend:  {:>14}",
        format_currency(stats.max_spend)
    );

    println!();
    println!("🧾 Recent Receipts");
    println!("   ─────────────────────────────────────────────────────────────");
    if recent.is_empty() {
        println!("   No receipts yet. Add one with: spendlens upload <file>");
        return Ok(());
    }

    for receipt in &recent {
        print_recent_row(receipt);
    }

    Ok(())
}

fn print_recent_row(receipt: &Receipt) {
    println!(
        "   {} {:25} │ {:>12} │ {:12} │ {}",
        receipt.category.icon(),
        truncate(&receipt.vendor, 25),
        format_currency(receipt.amount),
        format_date(receipt.transaction_date),
        receipt.category.label(),
    );
}
