//! Spendlens Core Library
//!
//! Shared functionality for the spendlens receipt manager:
//! - Typed API client for the remote receipts service
//! - Filter/query model mapping filter state to request parameters
//! - Filter sessions with stale-response protection
//! - Analytics snapshot projections for chart rendering
//! - Export helpers (format, dated filename, write to disk)
//! - Locale formatting utilities (INR currency, dates)
//!
//! Extraction/OCR, storage, and analytics computation live behind the
//! receipts API; this crate only speaks its REST contract.

pub mod charts;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod format;
pub mod models;
pub mod session;

/// Test utilities including the mock receipts server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use charts::{CategoryPie, PieSlice, TimeSeriesChart, VendorBars, VendorRow};
pub use client::ReceiptClient;
pub use config::Config;
pub use error::{Error, Result};
pub use export::ExportFormat;
pub use filter::{FilterState, SortBy};
pub use models::{AnalyticsSnapshot, Category, ExtractionResult, Receipt, ReceiptUpdate};
pub use session::{FetchOutcome, FilterSession};
