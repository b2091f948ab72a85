//! Spendlens CLI - Receipt manager frontend
//!
//! Usage:
//!   spendlens dashboard              Spending overview + recent receipts
//!   spendlens list --category groceries --sort -amount
//!   spendlens upload bill.pdf        Extract a receipt server-side
//!   spendlens export --format csv    Download filtered receipts

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use spendlens_core::{Config, ReceiptClient};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    // One explicit client per invocation; no ambient singleton.
    let config = match &cli.api_url {
        Some(url) => Config::with_api_url(url),
        None => Config::load(),
    };
    let client = ReceiptClient::from_config(&config);

    match cli.command {
        Commands::Dashboard => commands::cmd_dashboard(&client).await,
        Commands::List { filters } => {
            let mut filters = filters.to_filter_state()?;
            // The list view opens sorted newest-first unless told otherwise.
            if filters.sort_by.is_none() {
                filters.sort_by = Some(spendlens_core::SortBy::newest_first());
            }
            commands::cmd_list(&client, &filters).await
        }
        Commands::Upload { file } => commands::cmd_upload(&client, file.as_deref()).await,
        Commands::Edit {
            id,
            vendor,
            amount,
            date,
            category,
        } => {
            let update = build_update(vendor, amount, date.as_deref(), category.as_deref())?;
            commands::cmd_edit(&client, id, &update).await
        }
        Commands::Delete { id, yes } => {
            let confirmed = yes || commands::confirm(&format!("Delete receipt #{}?", id))?;
            commands::cmd_delete(&client, id, confirmed).await
        }
        Commands::Analytics { filters } => {
            commands::cmd_analytics(&client, &filters.to_filter_state()?).await
        }
        Commands::Export {
            format,
            output,
            filters,
        } => {
            let format = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            commands::cmd_export(&client, format, &filters.to_filter_state()?, output.as_deref())
                .await
        }
    }
}
