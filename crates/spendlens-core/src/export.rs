//! Export helpers
//!
//! The server produces the export content; this side only picks the format,
//! names the file after the current calendar date, and writes the bytes out.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Json => "application/json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown export format: {} (use csv or json)", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Download filename with the calendar date embedded: `receipts_2024-03-05.csv`
pub fn export_filename(format: ExportFormat, date: NaiveDate) -> String {
    format!("receipts_{}.{}", date.format("%Y-%m-%d"), format.extension())
}

/// Write export bytes into `dir` under the dated filename, returning the path
pub fn write_export(
    dir: &Path,
    format: ExportFormat,
    date: NaiveDate,
    data: &[u8],
) -> Result<PathBuf> {
    let path = dir.join(export_filename(format, date));
    std::fs::write(&path, data)?;
    Ok(path)
}
