//! Data model shared across views
//!
//! Receipts and analytics snapshots are server-owned; the client reads and
//! mutates them over REST but never computes derived fields locally.
//! Deserialization is deliberately forgiving: the amount field arrives either
//! as a JSON number or as a decimal string, list responses come bare or
//! wrapped in `{"results": [...]}`, and every analytics field falls back to
//! an empty default so a partial payload degrades instead of crashing.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Spending category - the single source of truth for wire names,
/// display labels, and icons
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electricity,
    Internet,
    Groceries,
    Restaurant,
    Shopping,
    Transportation,
    #[default]
    Other,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 7] = [
        Category::Electricity,
        Category::Internet,
        Category::Groceries,
        Category::Restaurant,
        Category::Shopping,
        Category::Transportation,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Electricity => "electricity",
            Self::Internet => "internet",
            Self::Groceries => "groceries",
            Self::Restaurant => "restaurant",
            Self::Shopping => "shopping",
            Self::Transportation => "transportation",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Electricity => "Electricity",
            Self::Internet => "Internet",
            Self::Groceries => "Groceries",
            Self::Restaurant => "Restaurant",
            Self::Shopping => "Shopping",
            Self::Transportation => "Transportation",
            Self::Other => "Other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Electricity => "⚡",
            Self::Internet => "🌐",
            Self::Groceries => "🛒",
            Self::Restaurant => "🍽️",
            Self::Shopping => "🛍️",
            Self::Transportation => "🚗",
            Self::Other => "📦",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "electricity" => Ok(Self::Electricity),
            "internet" => Ok(Self::Internet),
            "groceries" => Ok(Self::Groceries),
            "restaurant" => Ok(Self::Restaurant),
            "shopping" => Ok(Self::Shopping),
            "transportation" => Ok(Self::Transportation),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A digitized purchase receipt as stored by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub id: i64,
    pub vendor: String,
    /// Purchase total; the server serializes decimals as strings
    #[serde(deserialize_with = "flexible_f64")]
    pub amount: f64,
    /// Date of purchase (distinct from record-creation time)
    pub transaction_date: NaiveDate,
    #[serde(default)]
    pub category: Category,
    /// Extraction reliability in [0,1]; display-only on this side
    #[serde(default, deserialize_with = "flexible_f64")]
    pub confidence_score: f64,
    pub created_at: DateTime<Utc>,
}

/// Structured fields returned by the extraction endpoint
///
/// The server responds with a full receipt record; the upload view only
/// cares about the extracted fields, so anything else is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub vendor: String,
    #[serde(deserialize_with = "flexible_f64")]
    pub amount: f64,
    pub transaction_date: NaiveDate,
    #[serde(default)]
    pub category: Category,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub confidence_score: f64,
}

/// Partial update body for PATCH /receipts/{id}/
///
/// `None` fields are omitted from the JSON entirely so the server only
/// touches what the user actually changed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReceiptUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl ReceiptUpdate {
    pub fn is_empty(&self) -> bool {
        self.vendor.is_none()
            && self.amount.is_none()
            && self.transaction_date.is_none()
            && self.category.is_none()
    }
}

/// List responses arrive either as a bare array or wrapped in `{"results": []}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListPayload {
    Paginated { results: Vec<Receipt> },
    Plain(Vec<Receipt>),
}

impl ListPayload {
    pub fn into_receipts(self) -> Vec<Receipt> {
        match self {
            Self::Paginated { results } => results,
            Self::Plain(receipts) => receipts,
        }
    }
}

/// Aggregate scalars over the filtered receipt set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub total_spend: f64,
    #[serde(default)]
    pub mean_spend: f64,
    #[serde(default)]
    pub median_spend: f64,
    #[serde(default)]
    pub min_spend: f64,
    #[serde(default)]
    pub max_spend: f64,
    #[serde(default)]
    pub std_deviation: f64,
}

/// Per-category aggregate within the analytics payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryTotals {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub total: f64,
}

/// One entry of the spend-ranked vendor list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorSpend {
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub total_spend: f64,
}

/// Parallel date/amount/moving-average sequences, ordered by date ascending
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeSeries {
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub amounts: Vec<f64>,
    #[serde(default)]
    pub moving_avg: Vec<f64>,
}

/// Precomputed analytics payload from GET /receipts/analytics/
///
/// Every field is defaulted: a missing mapping becomes an empty mapping and
/// a missing sequence an empty sequence, so malformed payloads degrade to
/// omitted chart panels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    #[serde(default)]
    pub statistics: Statistics,
    #[serde(default)]
    pub category_distribution: BTreeMap<String, CategoryTotals>,
    #[serde(default)]
    pub top_vendors: Vec<VendorSpend>,
    #[serde(default)]
    pub vendor_frequency: BTreeMap<String, u32>,
    #[serde(default)]
    pub time_series: TimeSeries,
}

impl AnalyticsSnapshot {
    /// When no receipts matched, all other fields are considered absent
    /// and views render an empty state instead of degenerate charts.
    pub fn is_empty(&self) -> bool {
        self.statistics.count == 0
    }
}

/// Accept a float from either a JSON number or a decimal string
///
/// Non-finite values (`"inf"`, `"NaN"`) degrade to zero; monetary fields
/// never legitimately carry them and downstream formatting assumes finite
/// input.
fn flexible_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    let value = match Raw::deserialize(deserializer)? {
        Raw::Num(n) => n,
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom)?,
    };
    Ok(if value.is_finite() { value } else { 0.0 })
}
