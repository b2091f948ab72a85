//! Export command implementation

use std::path::Path;

use anyhow::Result;

use spendlens_core::{export, ExportFormat, FilterState, ReceiptClient};

/// Download the filtered export and write it to a dated file
///
/// The server builds the document; the client only picks where the bytes
/// land. `output` is a directory, defaulting to the current one.
pub async fn cmd_export(
    client: &ReceiptClient,
    format: ExportFormat,
    filters: &FilterState,
    output: Option<&Path>,
) -> Result<()> {
    let data = client.export(format, filters).await?;

    let dir = output.unwrap_or_else(|| Path::new("."));
    let today = chrono::Local::now().date_naive();
    let path = export::write_export(dir, format, today, &data)?;

    println!(
        "✓ Exported {} bytes to {}",
        data.len(),
        path.display()
    );
    Ok(())
}
