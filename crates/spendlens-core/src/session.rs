//! Filter session with stale-response protection
//!
//! Filter changes trigger immediate re-fetches with no cancellation, so a
//! slow response issued under an older filter state can arrive after the
//! user has already moved on. Each mutation bumps a monotonic generation
//! token; a response is only accepted if the token captured at request time
//! still matches the current generation, otherwise it is discarded.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::client::ReceiptClient;
use crate::error::Result;
use crate::filter::FilterState;
use crate::models::Receipt;

/// Result of a session fetch: either fresh data or a discarded stale response
#[derive(Debug)]
pub enum FetchOutcome {
    Fresh(Vec<Receipt>),
    Stale,
}

impl FetchOutcome {
    pub fn into_receipts(self) -> Option<Vec<Receipt>> {
        match self {
            Self::Fresh(receipts) => Some(receipts),
            Self::Stale => None,
        }
    }
}

/// One view-session's filter state plus its generation counter
#[derive(Debug, Default)]
pub struct FilterSession {
    filters: FilterState,
    generation: AtomicU64,
}

impl FilterSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filters(filters: FilterState) -> Self {
        Self {
            filters,
            generation: AtomicU64::new(0),
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Mutate the filter state, invalidating any in-flight request.
    /// Returns the new generation token.
    pub fn apply<F>(&mut self, mutate: F) -> u64
    where
        F: FnOnce(&mut FilterState),
    {
        mutate(&mut self.filters);
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Reset every filter field to empty, invalidating in-flight requests
    pub fn clear(&mut self) -> u64 {
        self.apply(FilterState::clear)
    }

    /// Token identifying the current filter generation
    pub fn token(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Whether a token captured at request time still matches the latest
    /// issued generation
    pub fn is_current(&self, token: u64) -> bool {
        token == self.token()
    }

    /// Fetch the list for the current filters, discarding the response if
    /// the filters changed while the request was in flight
    pub async fn fetch(&self, client: &ReceiptClient) -> Result<FetchOutcome> {
        let token = self.token();
        let receipts = client.list_receipts(&self.filters).await?;
        if self.is_current(token) {
            Ok(FetchOutcome::Fresh(receipts))
        } else {
            Ok(FetchOutcome::Stale)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::SortBy;

    #[test]
    fn test_mutation_bumps_generation() {
        let mut session = FilterSession::new();
        let before = session.token();
        let after = session.apply(|f| f.search = "tea".to_string());
        assert_eq!(after, before + 1);
        assert_eq!(session.filters().search, "tea");
    }

    #[test]
    fn test_in_flight_token_goes_stale_on_mutation() {
        let mut session = FilterSession::new();
        let in_flight = session.token();
        assert!(session.is_current(in_flight));

        session.apply(|f| f.min_amount = "100".to_string());
        assert!(!session.is_current(in_flight));
        assert!(session.is_current(session.token()));
    }

    #[test]
    fn test_clear_resets_filters_and_invalidates() {
        let mut session = FilterSession::with_filters(
            FilterState::new()
                .search("snacks")
                .sort_by(Some(SortBy::newest_first())),
        );
        let in_flight = session.token();

        session.clear();
        assert!(session.filters().is_empty());
        assert!(session.filters().to_query().is_empty());
        assert!(!session.is_current(in_flight));
    }

    #[test]
    fn test_stale_outcome_carries_no_receipts() {
        assert!(FetchOutcome::Stale.into_receipts().is_none());
        assert_eq!(
            FetchOutcome::Fresh(Vec::new()).into_receipts().unwrap().len(),
            0
        );
    }
}
