//! Filter state and query-parameter assembly for receipt list requests
//!
//! This is the client side of the query contract: a `FilterState` maps to
//! request parameters containing only the non-empty fields, each in its raw
//! user-entered representation (amounts as decimal strings, dates as ISO
//! calendar strings). An all-empty filter is indistinguishable from "no
//! filter" at the wire level. Matching and ordering of the response are the
//! server's responsibility; nothing is re-filtered or re-sorted locally.

use crate::models::Category;

/// Sort key for the receipt list, mirrored on both ends of the wire
///
/// A leading `-` marks descending order. Keys the client does not recognize
/// are passed through verbatim; interpreting them is the server's problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortBy {
    TransactionDate { descending: bool },
    Amount { descending: bool },
    Vendor { descending: bool },
    Verbatim(String),
}

impl SortBy {
    /// Newest-first date order, the list view's initial sort
    pub fn newest_first() -> Self {
        Self::TransactionDate { descending: true }
    }

    pub fn parse(value: &str) -> Self {
        let (descending, key) = match value.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, value),
        };
        match key {
            "transaction_date" => Self::TransactionDate { descending },
            "amount" => Self::Amount { descending },
            "vendor" => Self::Vendor { descending },
            _ => Self::Verbatim(value.to_string()),
        }
    }

    pub fn as_param(&self) -> String {
        let (key, descending) = match self {
            Self::TransactionDate { descending } => ("transaction_date", *descending),
            Self::Amount { descending } => ("amount", *descending),
            Self::Vendor { descending } => ("vendor", *descending),
            Self::Verbatim(raw) => return raw.clone(),
        };
        if descending {
            format!("-{}", key)
        } else {
            key.to_string()
        }
    }
}

/// Client-local list-query constraints for one view session
///
/// Initialized all-empty, mutated field by field from user input, and reset
/// in full by the clear action. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Free-text search over vendor and raw receipt text
    pub search: String,
    pub category: Option<Category>,
    /// Exact-match vendor constraint
    pub vendor: String,
    /// Numeric bounds, kept as the user typed them
    pub min_amount: String,
    pub max_amount: String,
    /// ISO calendar date bounds (YYYY-MM-DD)
    pub start_date: String,
    pub end_date: String,
    pub sort_by: Option<SortBy>,
    /// Maximum number of rows to return (dashboard recent-receipts panel)
    pub limit: Option<u32>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, value: &str) -> Self {
        self.search = value.to_string();
        self
    }

    pub fn category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn vendor(mut self, value: &str) -> Self {
        self.vendor = value.to_string();
        self
    }

    pub fn min_amount(mut self, value: &str) -> Self {
        self.min_amount = value.to_string();
        self
    }

    pub fn max_amount(mut self, value: &str) -> Self {
        self.max_amount = value.to_string();
        self
    }

    pub fn start_date(mut self, value: &str) -> Self {
        self.start_date = value.to_string();
        self
    }

    pub fn end_date(mut self, value: &str) -> Self {
        self.end_date = value.to_string();
        self
    }

    pub fn sort_by(mut self, sort: Option<SortBy>) -> Self {
        self.sort_by = sort;
        self
    }

    pub fn limit(mut self, limit: Option<u32>) -> Self {
        self.limit = limit;
        self
    }

    /// Reset every field to its empty default
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Build the outbound query-parameter set
    ///
    /// Only non-empty fields appear, each with its literal value unchanged.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if !self.search.is_empty() {
            params.push(("search", self.search.clone()));
        }
        if let Some(category) = self.category {
            params.push(("category", category.as_str().to_string()));
        }
        if !self.vendor.is_empty() {
            params.push(("vendor", self.vendor.clone()));
        }
        if !self.min_amount.is_empty() {
            params.push(("min_amount", self.min_amount.clone()));
        }
        if !self.max_amount.is_empty() {
            params.push(("max_amount", self.max_amount.clone()));
        }
        if !self.start_date.is_empty() {
            params.push(("start_date", self.start_date.clone()));
        }
        if !self.end_date.is_empty() {
            params.push(("end_date", self.end_date.clone()));
        }
        if let Some(sort) = &self.sort_by {
            params.push(("sort_by", sort.as_param()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_builds_no_params() {
        let filters = FilterState::new();
        assert!(filters.to_query().is_empty());
        assert!(filters.is_empty());
    }

    #[test]
    fn test_non_empty_fields_pass_through_literally() {
        let filters = FilterState::new()
            .search("chai")
            .category(Some(Category::Restaurant))
            .min_amount("10.50")
            .max_amount("0250.00")
            .start_date("2024-01-01")
            .sort_by(Some(SortBy::Amount { descending: true }));

        let params = filters.to_query();
        assert_eq!(
            params,
            vec![
                ("search", "chai".to_string()),
                ("category", "restaurant".to_string()),
                ("min_amount", "10.50".to_string()),
                ("max_amount", "0250.00".to_string()),
                ("start_date", "2024-01-01".to_string()),
                ("sort_by", "-amount".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_strings_are_omitted_not_sent() {
        let filters = FilterState::new().vendor("").search("tea");
        let params = filters.to_query();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0], ("search", "tea".to_string()));
    }

    #[test]
    fn test_clear_resets_every_field() {
        let mut filters = FilterState::new()
            .search("groceries")
            .vendor("DMart")
            .end_date("2024-06-30")
            .sort_by(Some(SortBy::newest_first()))
            .limit(Some(20));

        filters.clear();
        assert_eq!(filters, FilterState::default());
        assert!(filters.to_query().is_empty());
    }

    #[test]
    fn test_sort_by_round_trip() {
        for raw in ["transaction_date", "-transaction_date", "amount", "-amount", "vendor", "-vendor"] {
            assert_eq!(SortBy::parse(raw).as_param(), raw);
        }
    }

    #[test]
    fn test_unrecognized_sort_passes_through_verbatim() {
        let sort = SortBy::parse("-created_at");
        assert_eq!(sort, SortBy::Verbatim("-created_at".to_string()));
        assert_eq!(sort.as_param(), "-created_at");
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        assert_eq!(SortBy::newest_first().as_param(), "-transaction_date");
    }
}
