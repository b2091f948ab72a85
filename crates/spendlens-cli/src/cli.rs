//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use spendlens_core::{Category, FilterState, ReceiptUpdate, SortBy};

/// Spendlens - Manage digitized purchase receipts
#[derive(Parser)]
#[command(name = "spendlens")]
#[command(about = "Dashboard, list, upload, analytics and export for digitized receipts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Receipts API base URL (overrides SPENDLENS_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the spending overview and recent receipts
    Dashboard,

    /// List receipts, filtered and sorted by the server
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Upload a receipt file (PDF, PNG, JPG, TXT) for extraction
    Upload {
        /// File to upload; the server enforces format and size limits
        file: Option<PathBuf>,
    },

    /// Edit receipt fields, then refetch the list
    Edit {
        /// Receipt ID
        id: i64,

        /// New vendor name
        #[arg(long)]
        vendor: Option<String>,

        /// New amount
        #[arg(long)]
        amount: Option<f64>,

        /// New transaction date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// New category (electricity, internet, groceries, restaurant,
        /// shopping, transportation, other)
        #[arg(long)]
        category: Option<String>,
    },

    /// Delete a receipt (asks for confirmation)
    Delete {
        /// Receipt ID
        id: i64,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Show spending analytics charts
    Analytics {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Export filtered receipts to a dated file
    Export {
        /// Export format: csv or json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Directory to write the export into (defaults to the current dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,
    },
}

/// List-query constraints shared by the list, analytics, and export views
#[derive(Args, Default)]
pub struct FilterArgs {
    /// Free-text search over vendor and receipt text
    #[arg(long)]
    pub search: Option<String>,

    /// Category filter
    #[arg(long)]
    pub category: Option<String>,

    /// Exact vendor filter
    #[arg(long)]
    pub vendor: Option<String>,

    /// Minimum amount
    #[arg(long)]
    pub min_amount: Option<String>,

    /// Maximum amount
    #[arg(long)]
    pub max_amount: Option<String>,

    /// Start date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub to: Option<String>,

    /// Sort key: transaction_date, amount, or vendor, with a leading `-`
    /// for descending
    #[arg(long)]
    pub sort: Option<String>,
}

impl FilterArgs {
    /// Build the filter state, validating enum and date inputs up front
    /// while passing the literal values through on the wire
    pub fn to_filter_state(&self) -> Result<FilterState> {
        let category = self
            .category
            .as_deref()
            .map(|c| c.parse::<Category>())
            .transpose()
            .map_err(|e| anyhow::anyhow!(e))?;

        for date in [&self.from, &self.to].into_iter().flatten() {
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .with_context(|| format!("Invalid date '{}' (use YYYY-MM-DD)", date))?;
        }

        let mut filters = FilterState::new().category(category);
        if let Some(search) = &self.search {
            filters.search = search.clone();
        }
        if let Some(vendor) = &self.vendor {
            filters.vendor = vendor.clone();
        }
        if let Some(min) = &self.min_amount {
            filters.min_amount = min.clone();
        }
        if let Some(max) = &self.max_amount {
            filters.max_amount = max.clone();
        }
        if let Some(from) = &self.from {
            filters.start_date = from.clone();
        }
        if let Some(to) = &self.to {
            filters.end_date = to.clone();
        }
        filters.sort_by = self.sort.as_deref().map(SortBy::parse);

        Ok(filters)
    }
}

/// Build a partial update from the edit flags
pub fn build_update(
    vendor: Option<String>,
    amount: Option<f64>,
    date: Option<&str>,
    category: Option<&str>,
) -> Result<ReceiptUpdate> {
    let transaction_date = date
        .map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d"))
        .transpose()
        .context("Invalid --date format (use YYYY-MM-DD)")?;
    let category = category
        .map(|c| c.parse::<Category>())
        .transpose()
        .map_err(|e| anyhow::anyhow!(e))?;

    Ok(ReceiptUpdate {
        vendor,
        amount,
        transaction_date,
        category,
    })
}
