//! FILENAME: core/engine/src/store.rs
//! PURPOSE: Holds the raw record snapshot obtained from the data source.
//! CONTEXT: The store is populated wholesale from one fetch result. It never
//! holds a partial load: a fetch either replaces the snapshot or fails.

use crate::record::Record;
use std::fmt;
use std::sync::Arc;

/// Load lifecycle of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// A fetch is in flight (initial state).
    Loading,
    /// The snapshot holds the result of the last successful fetch.
    Ready,
    /// The last fetch failed; the message is what the UI reports.
    Error(String),
}

/// The raw, unfiltered record snapshot.
#[derive(Debug, Clone)]
pub struct RecordStore {
    state: LoadState,
    records: Vec<Arc<Record>>,
    /// Bumped every time the snapshot is replaced or cleared.
    generation: u64,
}

impl RecordStore {
    pub fn new() -> Self {
        RecordStore {
            state: LoadState::Loading,
            records: Vec::new(),
            generation: 0,
        }
    }

    /// Create a store that is already ready with the given records.
    pub fn with_records(records: Vec<Record>) -> Self {
        let mut store = Self::new();
        store.set_records(records);
        store
    }

    /// Mark a refetch as started. The previous snapshot stays visible until
    /// the fetch resolves.
    pub fn begin_loading(&mut self) {
        self.state = LoadState::Loading;
    }

    /// Replace the snapshot with a successful fetch result.
    pub fn set_records(&mut self, records: Vec<Record>) {
        self.records = records.into_iter().map(Arc::new).collect();
        self.state = LoadState::Ready;
        self.generation += 1;
    }

    /// Record a failed fetch. The snapshot is dropped so that the UI shows
    /// "no data available" rather than stale rows.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.records.clear();
        self.state = LoadState::Error(message.into());
        self.generation += 1;
    }

    /// Apply a fetch result, whatever its outcome.
    pub fn resolve<E: fmt::Display>(&mut self, result: Result<Vec<Record>, E>) {
        match result {
            Ok(records) => self.set_records(records),
            Err(e) => self.set_error(e.to_string()),
        }
    }

    pub fn snapshot(&self) -> &[Arc<Record>] {
        &self.records
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Record> {
        vec![
            Record::new(1, "Shirt", 10.0, "men"),
            Record::new(2, "Mug", 5.0, "home"),
        ]
    }

    #[test]
    fn test_new_store_is_loading_and_empty() {
        let store = RecordStore::new();
        assert!(store.is_loading());
        assert!(store.is_empty());
        assert_eq!(store.generation(), 0);
    }

    #[test]
    fn test_successful_fetch_makes_store_ready() {
        let mut store = RecordStore::new();
        store.resolve::<String>(Ok(sample()));

        assert!(store.is_ready());
        assert_eq!(store.len(), 2);
        assert_eq!(store.snapshot()[1].title, "Mug");
        assert_eq!(store.generation(), 1);
    }

    #[test]
    fn test_failed_fetch_sets_error_and_drops_snapshot() {
        let mut store = RecordStore::with_records(sample());
        store.begin_loading();
        assert_eq!(store.len(), 2);

        store.resolve(Err("connection refused"));
        assert_eq!(store.error(), Some("connection refused"));
        assert!(store.is_empty());
        assert_eq!(store.generation(), 2);
    }

    #[test]
    fn test_refetch_replaces_wholesale() {
        let mut store = RecordStore::with_records(sample());
        store.set_records(vec![Record::new(3, "Lamp", 20.0, "home")]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot()[0].title, "Lamp");
    }
}
