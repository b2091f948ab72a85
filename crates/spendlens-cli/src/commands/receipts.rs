//! Receipt list, edit, and delete commands

use anyhow::{bail, Result};

use spendlens_core::format::{format_confidence, format_currency, format_date};
use spendlens_core::{FilterState, Receipt, ReceiptClient, ReceiptUpdate};

use super::truncate;

/// List receipts matching the given filters
pub async fn cmd_list(client: &ReceiptClient, filters: &FilterState) -> Result<()> {
    let receipts = client.list_receipts(filters).await?;
    render_receipts(&receipts);
    Ok(())
}

/// Apply a partial update, then refetch and render the list
///
/// The server owns ordering and filtering, so the refreshed list is a new
/// fetch rather than a local splice.
pub async fn cmd_edit(client: &ReceiptClient, id: i64, update: &ReceiptUpdate) -> Result<()> {
    if update.is_empty() {
        bail!("Nothing to update. Pass at least one of --vendor, --amount, --date, --category");
    }

    let updated = client.update_receipt(id, update).await?;
    println!(
        "✓ Updated receipt #{}: {} {}",
        updated.id,
        truncate(&updated.vendor, 30),
        format_currency(updated.amount)
    );

    let receipts = client.list_receipts(&FilterState::new()).await?;
    render_receipts(&receipts);
    Ok(())
}

/// Delete a receipt, then refetch and render the list
///
/// `confirmed` is resolved by the caller (the `--yes` flag or the
/// interactive prompt); when it is false no request is sent at all.
/// Deletion failures surface to the user like any other error.
pub async fn cmd_delete(client: &ReceiptClient, id: i64, confirmed: bool) -> Result<()> {
    if !confirmed {
        println!("Cancelled.");
        return Ok(());
    }

    client.delete_receipt(id).await?;
    println!("✓ Deleted receipt #{}", id);

    let receipts = client.list_receipts(&FilterState::new()).await?;
    render_receipts(&receipts);
    Ok(())
}

/// Render a receipt table with a count/total/average footer
pub fn render_receipts(receipts: &[Receipt]) {
    println!();
    if receipts.is_empty() {
        println!("No receipts match the current filters.");
        return;
    }

    println!(
        "   {:>5} │ {:25} │ {:>12} │ {:12} │ {:14} │ {:>6}",
        "ID", "Vendor", "Amount", "Date", "Category", "Conf"
    );
    println!("   ──────┼───────────────────────────┼──────────────┼──────────────┼────────────────┼────────");

    for receipt in receipts {
        println!(
            "   {:>5} │ {:25} │ {:>12} │ {:12} │ {} {:12} │ {:>6}",
            receipt.id,
            truncate(&receipt.vendor, 25),
            format_currency(receipt.amount),
            format_date(receipt.transaction_date),
            receipt.category.icon(),
            receipt.category.label(),
            format_confidence(receipt.confidence_score),
        );
    }

    let total: f64 = receipts.iter().map(|r| r.amount).sum();
    let average = total / receipts.len() as f64;
    println!();
    println!(
        "   {} receipt(s) │ Total {} │ Average {}",
        receipts.len(),
        format_currency(total),
        format_currency(average)
    );
}
