//! Session-scoped prediction history.

use super::prediction::PredictionRecord;

/// Number of records the history panel shows.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Append-only list of predictions in insertion order.
///
/// Storage is unbounded; truncation happens only when reading through
/// [`HistoryStore::recent`].
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    records: Vec<PredictionRecord>,
}

impl HistoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record at the end. No deduplication.
    pub fn append(&mut self, record: PredictionRecord) {
        self.records.push(record);
    }

    /// The last `n` records, newest first.
    #[must_use]
    pub fn recent(&self, n: usize) -> Vec<&PredictionRecord> {
        self.records.iter().rev().take(n).collect()
    }

    /// Most recently appended record.
    #[must_use]
    pub fn latest(&self) -> Option<&PredictionRecord> {
        self.records.last()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClassificationResult, Label, PatientFeatures};

    fn record(name: &str) -> PredictionRecord {
        PredictionRecord::new(
            name,
            PatientFeatures::default(),
            ClassificationResult {
                label: Label::NonDiabetic,
                confidence: None,
            },
        )
    }

    fn names(records: &[&PredictionRecord]) -> Vec<String> {
        records.iter().map(|r| r.patient_name().to_string()).collect()
    }

    #[test]
    fn test_recent_is_newest_first() {
        let mut store = HistoryStore::new();
        for name in ["first", "second", "third"] {
            store.append(record(name));
        }

        assert_eq!(names(&store.recent(2)), vec!["third", "second"]);
        assert_eq!(names(&store.recent(10)), vec!["third", "second", "first"]);
        assert!(store.recent(0).is_empty());
        assert_eq!(store.latest().map(PredictionRecord::patient_name), Some("third"));
    }

    #[test]
    fn test_recent_is_idempotent() {
        let mut store = HistoryStore::new();
        store.append(record("a"));
        store.append(record("b"));

        let first: Vec<_> = store.recent(5).into_iter().cloned().collect();
        let second: Vec<_> = store.recent(5).into_iter().cloned().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_storage_is_unbounded_and_keeps_duplicates() {
        let mut store = HistoryStore::new();
        for _ in 0..(DEFAULT_RECENT_LIMIT * 3) {
            store.append(record("same"));
        }
        assert_eq!(store.len(), 30);
        assert_eq!(store.recent(DEFAULT_RECENT_LIMIT).len(), DEFAULT_RECENT_LIMIT);
    }

    #[test]
    fn test_clear() {
        let mut store = HistoryStore::new();
        store.append(record("a"));
        store.clear();

        assert!(store.is_empty());
        assert!(store.recent(3).is_empty());
        assert!(store.latest().is_none());
    }
}
