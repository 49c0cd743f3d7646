//! Mock geocoder for testing without network access.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::error::GeocodeError;
use super::{Geocoder, Suggestion};

/// In-memory geocoder serving canned suggestions.
///
/// Lookups are keyed by trimmed, lowercased query text; unknown queries
/// yield an empty suggestion list, mirroring a provider miss. The client
/// counts upstream calls so caching layers can be tested.
#[derive(Debug, Clone, Default)]
pub struct MockGeocodeClient {
    entries: HashMap<String, Vec<Suggestion>>,
    calls: Arc<AtomicUsize>,
}

impl MockGeocodeClient {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add canned suggestions for a query.
    pub fn with_entry(mut self, query: &str, suggestions: Vec<Suggestion>) -> Self {
        self.entries
            .insert(query.trim().to_lowercase(), suggestions);
        self
    }

    /// Number of searches that reached this mock.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Geocoder for MockGeocodeClient {
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .entries
            .get(&query.trim().to_lowercase())
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GeoPoint;

    fn suggestion(label: &str) -> Suggestion {
        Suggestion {
            point: GeoPoint::new(34.0522, -118.2437).unwrap(),
            label: label.to_string(),
        }
    }

    #[tokio::test]
    async fn returns_canned_entries() {
        let mock = MockGeocodeClient::new()
            .with_entry("echo park", vec![suggestion("Echo Park, Los Angeles")]);

        let hits = mock.search("echo park").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].label, "Echo Park, Los Angeles");
    }

    #[tokio::test]
    async fn lookup_ignores_case_and_whitespace() {
        let mock = MockGeocodeClient::new().with_entry("echo park", vec![suggestion("Echo Park")]);

        let hits = mock.search("  Echo Park ").await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn unknown_query_is_empty_not_an_error() {
        let mock = MockGeocodeClient::new();

        let hits = mock.search("nowhere").await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn counts_calls() {
        let mock = MockGeocodeClient::new();
        assert_eq!(mock.call_count(), 0);

        mock.search("a query").await.unwrap();
        mock.search("another").await.unwrap();

        assert_eq!(mock.call_count(), 2);
    }
}
