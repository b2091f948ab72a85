//! Receipt upload command

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use spendlens_core::format::{format_confidence, format_currency, format_date};
use spendlens_core::ReceiptClient;

/// How often the processing ticker prints while the upload is in flight
const TICK_INTERVAL: Duration = Duration::from_millis(500);

/// Brief pause after the response so the final ticker line is readable
const SETTLE_DELAY: Duration = Duration::from_millis(400);

/// Upload a receipt file for server-side extraction
///
/// Extraction time depends on the document, so progress is shown as an
/// indeterminate elapsed-time ticker rather than a made-up percentage.
pub async fn cmd_upload(client: &ReceiptClient, file: Option<&Path>) -> Result<()> {
    let Some(path) = file else {
        bail!("Please select a file to upload");
    };

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("receipt")
        .to_string();
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    println!("Uploading {} ({} bytes)...", filename, data.len());

    let (cancel_tx, mut cancel_rx) = tokio::sync::oneshot::channel::<()>();
    let ticker = tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        interval.tick().await;
        let started = tokio::time::Instant::now();
        loop {
            tokio::select! {
                _ = &mut cancel_rx => break,
                _ = interval.tick() => {
                    println!("   Processing... {}s", started.elapsed().as_secs());
                }
            }
        }
    });

    let result = client.upload_receipt(&filename, data).await;

    // Stop the ticker whether the upload worked or not.
    let _ = cancel_tx.send(());
    let _ = ticker.await;

    let extraction = result?;
    tokio::time::sleep(SETTLE_DELAY).await;

    println!();
    println!("✓ Receipt extracted");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Vendor:     {}", extraction.vendor);
    println!("   Amount:     {}", format_currency(extraction.amount));
    println!("   Date:       {}", format_date(extraction.transaction_date));
    println!(
        "   Category:   {} {}",
        extraction.category.icon(),
        extraction.category.label()
    );
    println!(
        "   Confidence: {}",
        format_confidence(extraction.confidence_score)
    );

    Ok(())
}
